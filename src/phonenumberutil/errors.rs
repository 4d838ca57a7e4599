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

use std::num::ParseIntError;

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// Failure to build a [`MetadataStore`](super::MetadataStore). This is the
/// only unrecoverable condition of the crate: without metadata nothing can be
/// parsed, classified or formatted.
#[derive(Debug, PartialEq, Error)]
pub enum MetadataLoadError {
    #[error("Could not parse metadata: {0}")]
    Malformed(String),
    #[error("Invalid pattern in metadata: {0}")]
    InvalidRegex(#[from] InvalidRegexError),
    #[error("Metadata entry without region id")]
    MissingRegionId,
    #[error("Region {0} is described more than once")]
    DuplicateRegion(String),
    #[error("Region {region} has invalid country calling code {country_code}")]
    InvalidCallingCode { region: String, country_code: i32 },
    #[error("Region {0} has no general description")]
    MissingGeneralDesc(String),
    #[error("Region {region}: possible length {length} of {number_type} is outside of general range")]
    LengthOutsideGeneralRange {
        region: String,
        number_type: &'static str,
        length: i32,
    },
    #[error("Country calling code {country_code} is claimed as main by both {first} and {second}")]
    DuplicateMainCountry {
        country_code: i32,
        first: String,
        second: String,
    },
    #[error("Country calling code {0} is shared by several regions, but none of them is main")]
    MissingMainCountry(i32),
}

/// The store has no numbering plan for the region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown region: {0}")]
pub struct UnknownRegionError(pub String);

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    /// No international prefix and no default region to fall back to.
    #[error("Missing region")]
    MissingRegion,
    #[error("{0}")]
    UnknownRegion(#[from] UnknownRegionError),
    #[error("Invalid country code")]
    InvalidCountryCode, // INVALID_COUNTRY_CODE in the java version.
    #[error("Not a number: {0}")]
    NotANumber(#[from] NotANumberError),
    #[error("Too short after idd")]
    TooShortAfterIdd,
    #[error("Too short Nsn")]
    TooShortNsn,
    #[error("Too long nsn")]
    TooLongNsn, // TOO_LONG in the java version.
}

impl ParseError {
    /// Human readable reason reported by the lenient validation surface.
    pub fn reason(&self) -> String {
        match self {
            ParseError::MissingRegion => "missing region".to_owned(),
            ParseError::UnknownRegion(UnknownRegionError(region)) => {
                fast_cat::concat_str!("unknown region: ", region)
            }
            ParseError::InvalidCountryCode => "invalid country calling code".to_owned(),
            ParseError::NotANumber(_) => "parse failure".to_owned(),
            ParseError::TooShortAfterIdd | ParseError::TooShortNsn => {
                "implausible length: too short".to_owned()
            }
            ParseError::TooLongNsn => "implausible length: too long".to_owned(),
        }
    }
}

#[derive(Debug, PartialEq, Error)]
pub enum NotANumberError {
    #[error("Number not matched a valid number pattern")]
    NotMatchedValidNumberPattern,
    #[error("Invalid phone context")]
    InvalidPhoneContext,
    #[error("Input is too long")]
    InputTooLong,
    #[error("{0}")]
    FailedToParseNumberAsInt(#[from] ParseIntError),
    #[error("{0}")]
    FailedToExtractNumber(#[from] ExtractNumberError),
}

#[derive(Debug, PartialEq, Error)]
pub enum ExtractNumberError {
    #[error("No valid start character found")]
    NoValidStartCharacter,
    #[error("Invalid number")]
    NotANumber,
}

impl From<ExtractNumberError> for ParseError {
    fn from(value: ExtractNumberError) -> Self {
        NotANumberError::FailedToExtractNumber(value).into()
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The calling code of the number has no metadata, so there are no rules
    /// to format it with.
    #[error("Unknown country calling code: {0}")]
    UnknownCallingCode(i32),
}

/// Possible outcomes when testing if a PhoneNumber is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// The number is longer than the shortest valid numbers for this region,
    /// shorter than the longest valid numbers for this region, and does not
    /// itself have a number length that matches valid numbers for this region.
    /// This can also be returned by `is_possible_number_for_type_with_reason`
    /// when there are no numbers of this type at all for this region.
    #[error("\
    The number is longer than the shortest valid numbers for this region,\
    shorter than the longest valid numbers for this region, and does not\
    itself have a number length that matches valid numbers for this region\
    ")]
    InvalidLength,
    /// The number is longer than all valid numbers for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}
