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

use crate::phonenumberutil::PhoneNumberType;

/// Everything the validator found out about one input. Failures are reported
/// in band: a number that did not parse has `is_valid == false` and an
/// `error_reason`, all other fields are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub is_possible: bool,
    /// True for mobile and fixed-line-or-mobile numbers.
    pub is_mobile: bool,
    pub formatted_international: Option<String>,
    pub country_code: Option<i32>,
    /// National significant number, leading zeros included.
    pub national_number: Option<String>,
    pub resolved_region: Option<String>,
    pub number_type: PhoneNumberType,
    pub error_reason: Option<String>,
    pub carrier: Option<String>,
    pub description: Option<String>,
}

impl ValidationReport {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            is_possible: false,
            is_mobile: false,
            formatted_international: None,
            country_code: None,
            national_number: None,
            resolved_region: None,
            number_type: PhoneNumberType::Unknown,
            error_reason: Some(reason.into()),
            carrier: None,
            description: None,
        }
    }
}
