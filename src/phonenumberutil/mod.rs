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

mod helper_constants;
mod helper_functions;
pub mod errors;
pub mod enums;
mod formatting;
mod metadata_store;
mod parsing;
pub mod phonenumberutil;
mod phone_number_regexps_and_mappings;
pub(self) mod helper_types;

pub use enums::{PhoneNumberFormat, PhoneNumberType, NumberLengthType};
pub use metadata_store::MetadataStore;
pub use phonenumberutil::PhoneNumberUtil;

/// Numbering plan of one region, as described by the metadata.
pub type NumberingPlan = crate::phonemetadata::PhoneMetadata;

/// Possibility, validity and type of a parsed number, recomputed per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_possible: bool,
    pub is_valid: bool,
    pub number_type: PhoneNumberType,
    /// Region the number resolves to; `None` when no region accepts it.
    pub resolved_region: Option<String>,
}
