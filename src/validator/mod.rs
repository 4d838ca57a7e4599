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

//! Lenient validation surface. Every call answers with a value: parse errors
//! are turned into a failure reason instead of being returned.

mod config;
mod report;

use std::sync::OnceLock;

use log::{debug, warn};

use crate::{
    phonenumber::PhoneNumber,
    phonenumberutil::{PhoneNumberFormat, PhoneNumberUtil, errors::MetadataLoadError},
    prefix_mapper::PrefixDescriptionMap,
};

pub use config::{MetadataSource, ValidatorConfig};
pub use report::ValidationReport;

/// Parses, classifies and formats numbers in one call, and attaches carrier
/// and geographical data when available.
pub struct PhoneValidator {
    util: PhoneNumberUtil,
    carriers: Option<PrefixDescriptionMap>,
    geocoding: Option<PrefixDescriptionMap>,
}

impl PhoneValidator {
    pub fn new(config: ValidatorConfig) -> Result<Self, MetadataLoadError> {
        let util = match &config.metadata {
            MetadataSource::Embedded => PhoneNumberUtil::new()?,
            MetadataSource::Text(text) => PhoneNumberUtil::new_for_metadata_text(text)?,
        };
        let carriers = config
            .carrier_lookup
            .then(|| PrefixDescriptionMap::carriers(&config.language));
        let geocoding = config
            .geocoding
            .then(|| PrefixDescriptionMap::geocoding(&config.language));
        Ok(Self { util, carriers, geocoding })
    }

    /// The strict engine behind this validator.
    pub fn util(&self) -> &PhoneNumberUtil {
        &self.util
    }

    pub fn validate(&self, number: &str, default_region: Option<&str>) -> ValidationReport {
        let phone_number = match self.util.parse(number, default_region) {
            Ok(phone_number) => phone_number,
            Err(err) => {
                debug!("Failed to parse '{}': {}", number, err);
                return ValidationReport::failure(err.reason());
            }
        };
        let outcome = self.util.validation_outcome(&phone_number);
        let formatted_international = self
            .util
            .format(&phone_number, PhoneNumberFormat::International)
            .inspect_err(|err| warn!("Parsed number can not be formatted: {}", err))
            .ok();
        let carrier = if outcome.is_valid && outcome.number_type.is_mobile_capable() {
            self.lookup_carrier(&phone_number)
        } else {
            None
        };
        let description = if outcome.is_valid {
            self.lookup_description(&phone_number)
        } else {
            None
        };

        ValidationReport {
            is_valid: outcome.is_valid,
            is_possible: outcome.is_possible,
            is_mobile: outcome.number_type.is_mobile_capable(),
            formatted_international,
            country_code: Some(phone_number.country_code()),
            national_number: Some(PhoneNumberUtil::get_national_significant_number(&phone_number)),
            resolved_region: outcome.resolved_region,
            number_type: outcome.number_type,
            error_reason: None,
            carrier,
            description,
        }
    }

    pub fn is_valid_number(&self, number: &str, default_region: Option<&str>) -> bool {
        self.util
            .parse(number, default_region)
            .is_ok_and(|phone_number| self.util.is_valid_number(&phone_number))
    }

    pub fn is_valid_mobile_number(&self, number: &str, default_region: Option<&str>) -> bool {
        self.util.parse(number, default_region).is_ok_and(|phone_number| {
            self.util.is_valid_number(&phone_number)
                && self.util.get_number_type(&phone_number).is_mobile_capable()
        })
    }

    /// International format of a number that parses, valid or not.
    pub fn format_international(&self, number: &str, default_region: Option<&str>) -> Option<String> {
        let phone_number = self.util.parse(number, default_region).ok()?;
        self.util
            .format(&phone_number, PhoneNumberFormat::International)
            .ok()
    }

    /// Carrier the number range was originally assigned to. Only valid
    /// mobile-capable numbers have one.
    pub fn carrier_name(&self, number: &str, default_region: Option<&str>) -> Option<String> {
        let phone_number = self.util.parse(number, default_region).ok()?;
        if !self.util.is_valid_number(&phone_number)
            || !self.util.get_number_type(&phone_number).is_mobile_capable()
        {
            return None;
        }
        self.lookup_carrier(&phone_number)
    }

    pub fn geocoded_description(&self, number: &str, default_region: Option<&str>) -> Option<String> {
        let phone_number = self.util.parse(number, default_region).ok()?;
        if !self.util.is_valid_number(&phone_number) {
            return None;
        }
        self.lookup_description(&phone_number)
    }

    fn lookup_carrier(&self, phone_number: &PhoneNumber) -> Option<String> {
        self.carriers.as_ref()?.lookup(phone_number).map(str::to_owned)
    }

    fn lookup_description(&self, phone_number: &PhoneNumber) -> Option<String> {
        self.geocoding.as_ref()?.lookup(phone_number).map(str::to_owned)
    }
}

static GLOBAL_VALIDATOR: OnceLock<PhoneValidator> = OnceLock::new();

/// The process-wide validator over the embedded data, built on first use.
fn global() -> Result<&'static PhoneValidator, MetadataLoadError> {
    if let Some(validator) = GLOBAL_VALIDATOR.get() {
        return Ok(validator);
    }
    let validator = PhoneValidator::new(ValidatorConfig::default())?;
    // Another thread may have won the race, its instance is kept.
    Ok(GLOBAL_VALIDATOR.get_or_init(|| validator))
}

/// Loads the embedded numbering plans for the free functions of this module.
/// Calling it again is a no-op.
pub fn initialize() -> Result<(), MetadataLoadError> {
    global().map(|_| ())
}

/// [`PhoneValidator::validate`] on the process-wide validator.
pub fn validate(number: &str, default_region: Option<&str>) -> ValidationReport {
    match global() {
        Ok(validator) => validator.validate(number, default_region),
        Err(err) => ValidationReport::failure(err.to_string()),
    }
}

pub fn is_valid_number(number: &str, default_region: Option<&str>) -> bool {
    global().is_ok_and(|validator| validator.is_valid_number(number, default_region))
}

pub fn is_valid_mobile_number(number: &str, default_region: Option<&str>) -> bool {
    global().is_ok_and(|validator| validator.is_valid_mobile_number(number, default_region))
}

pub fn format_international(number: &str, default_region: Option<&str>) -> Option<String> {
    global().ok()?.format_international(number, default_region)
}

pub fn carrier_name(number: &str, default_region: Option<&str>) -> Option<String> {
    global().ok()?.carrier_name(number, default_region)
}

pub fn geocoded_description(number: &str, default_region: Option<&str>) -> Option<String> {
    global().ok()?.geocoded_description(number, default_region)
}
