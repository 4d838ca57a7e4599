// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Metadata-driven phone number engine: parses raw text into a structured
//! [`PhoneNumber`], classifies it against per-region numbering plans and
//! renders it in E.164, international, national and RFC 3966 formats.
//!
//! ```no_run
//! use rphonevalidator::{PhoneNumberFormat, PhoneNumberUtil};
//!
//! let util = PhoneNumberUtil::new().expect("embedded metadata is valid");
//! let number = util.parse("202-555-0178", Some("US")).unwrap();
//! assert!(util.is_valid_number(&number));
//! assert_eq!(
//!     util.format(&number, PhoneNumberFormat::International).unwrap(),
//!     "+1 202-555-0178"
//! );
//! ```
//!
//! For the lenient "always answer" surface see [`validate`] and
//! [`PhoneValidator`].

mod interfaces;
/// This module is automatically generated from /resources/*.proto
mod proto_gen;
mod generated;
mod phonenumberutil;
mod prefix_mapper;
mod validator;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub(crate) mod regex_util;
pub(crate) mod string_util;

#[cfg(test)]
mod tests;

pub use proto_gen::{phonemetadata, phonenumber};
pub use phonemetadata::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc};
pub use phonenumber::{PhoneNumber, phone_number::CountryCodeSource};

pub use phonenumberutil::{
    enums, errors,
    MetadataStore, NumberingPlan, NumberLengthType, PhoneNumberFormat, PhoneNumberType,
    PhoneNumberUtil, ValidationOutcome,
};
pub use prefix_mapper::PrefixDescriptionMap;
pub use regexp_cache::InvalidRegexError;
pub use validator::{
    MetadataSource, PhoneValidator, ValidationReport, ValidatorConfig,
    carrier_name, format_international, geocoded_description, initialize, is_valid_mobile_number,
    is_valid_number, validate,
};
