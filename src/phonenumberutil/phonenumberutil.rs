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

use std::{collections::HashSet, sync::Arc};

use log::{error, trace, warn};
use regex::Regex;

use crate::{
    generated::metadata::METADATA,
    i18n,
    interfaces::MatcherApi,
    phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    phonenumber::PhoneNumber,
    phonenumberutil::{
        NumberLengthType, PhoneNumberType, ValidationOutcome,
        errors::{MetadataLoadError, UnknownRegionError, ValidationError},
        helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY,
        helper_functions::{
            self, get_supported_types_for_metadata, load_metadata_from_text, test_number_length,
            test_number_length_with_unknown_type,
        },
        metadata_store::MetadataStore,
        phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
    },
    regex_based_matcher::RegexBasedMatcher,
    regex_util::RegexConsume,
    regexp_cache::RegexCache,
};

pub struct PhoneNumberUtil {
    /// An API for validation checking.
    pub(super) matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(super) reg_exps: PhoneNumberRegExpsAndMappings,

    /// Numbering plans, read-only after construction.
    pub(super) store: MetadataStore,
}

impl PhoneNumberUtil {
    /// Builds the engine over the numbering plans compiled into the crate.
    pub fn new() -> Result<Self, MetadataLoadError> {
        Self::new_for_metadata_text(METADATA)
    }

    /// Builds the engine over numbering plans written in protobuf text format.
    pub fn new_for_metadata_text(text: &str) -> Result<Self, MetadataLoadError> {
        Self::new_for_metadata(load_metadata_from_text(text)?)
    }

    pub fn new_for_metadata(metadata_collection: PhoneMetadataCollection) -> Result<Self, MetadataLoadError> {
        let regexp_cache = Arc::new(RegexCache::with_capacity(512));
        let store = MetadataStore::load_with_cache(metadata_collection, &regexp_cache)?;
        Ok(Self {
            matcher_api: Box::new(RegexBasedMatcher::new(regexp_cache.clone())),
            reg_exps: PhoneNumberRegExpsAndMappings::new(regexp_cache),
            store,
        })
    }

    pub fn metadata_store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn get_supported_regions(&self) -> Vec<&str> {
        self.store.supported_regions()
    }

    pub fn get_supported_global_network_calling_codes(&self) -> HashSet<i32> {
        self.store.supported_global_network_calling_codes()
    }

    pub fn get_supported_calling_codes(&self) -> HashSet<i32> {
        self.store.supported_calling_codes()
    }

    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.store
            .lookup(region_code)
            .map(get_supported_types_for_metadata)
            .inspect_err(|err| warn!("Invalid or unknown region code provided: {}", err.0))
            .ok()
    }

    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.store
            .lookup_non_geographical(country_calling_code)
            .map(get_supported_types_for_metadata)
            .or_else(|| {
                warn!(
                    "Unknown country calling code for a non-geographical entity provided: {}",
                    country_calling_code
                );
                None
            })
    }

    pub fn get_country_code_for_region(&self, region_code: &str) -> Result<i32, UnknownRegionError> {
        self.store.lookup(region_code).map(|metadata| metadata.country_code())
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.store.main_region_for_calling_code(country_calling_code)
    }

    /// Returns the region codes that match the specific country calling code,
    /// main country first.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.store.lookup_by_calling_code(country_calling_code)
    }

    /// The national significant number with any Italian leading zeros in
    /// front.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        if !phone_number.italian_leading_zero() {
            return national_number.to_owned();
        }
        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix. Ensure the number of leading zeros is at least 0 so we
        // don't crash in the case of malicious input.
        let zeros_start = "0".repeat(phone_number.number_of_leading_zeros().max(0) as usize);
        fast_cat::concat_str!(&zeros_start, national_number)
    }

    /// Region the number belongs to, or "ZZ" when its calling code is unknown
    /// or none of the regions sharing the calling code accepts it.
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.store.lookup_by_calling_code(country_calling_code);
        match region_codes {
            [] => {
                trace!("Missing/invalid country calling code ({})", country_calling_code);
                i18n::RegionCode::get_unknown()
            }
            [region_code] => region_code.as_str(),
            _ => self.get_region_code_for_number_from_region_list(phone_number, region_codes),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> &'b str {
        let national_number = Self::get_national_significant_number(phone_number);
        for code in region_codes {
            let Ok(metadata) = self.store.lookup(code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                if self
                    .get_regex(metadata.leading_digits())
                    .is_some_and(|regex| regex.matches_start(&national_number))
                {
                    return code;
                }
            } else if self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown {
                return code;
            }
        }
        i18n::RegionCode::get_unknown()
    }

    /// Gets the type of a valid phone number. The region is resolved from the
    /// calling code, never from a default region.
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self
            .store
            .metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
    }

    pub(super) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!("Number '{national_number}' type unknown - doesn't match general national number pattern");
            return PhoneNumberType::Unknown;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        let is_mobile = if metadata.same_mobile_and_fixed_line_pattern() {
            is_fixed_line
        } else {
            self.is_number_matching_desc(national_number, &metadata.mobile)
        };
        match (is_fixed_line, is_mobile) {
            (true, true) => {
                trace!("Number '{national_number}' is fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            }
            (true, false) => {
                trace!("Number '{national_number}' is a fixed line number.");
                return PhoneNumberType::FixedLine;
            }
            (false, true) => {
                trace!("Number '{national_number}' is a mobile number.");
                return PhoneNumberType::Mobile;
            }
            (false, false) => {}
        }

        let other_types = [
            (PhoneNumberType::TollFree, &metadata.toll_free),
            (PhoneNumberType::PremiumRate, &metadata.premium_rate),
            (PhoneNumberType::SharedCost, &metadata.shared_cost),
            (PhoneNumberType::VoIP, &metadata.voip),
            (PhoneNumberType::PersonalNumber, &metadata.personal_number),
            (PhoneNumberType::Pager, &metadata.pager),
            (PhoneNumberType::UAN, &metadata.uan),
            (PhoneNumberType::VoiceMail, &metadata.voicemail),
        ];
        for (number_type, desc) in other_types {
            if self.is_number_matching_desc(national_number, desc) {
                trace!("Number '{national_number}' is {}", number_type.name());
                return number_type;
            }
        }
        trace!("Number '{national_number}' type unknown - doesn't match any specific number type pattern.");
        PhoneNumberType::Unknown
    }

    pub(super) fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc
    ) -> bool {
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty() && !number_desc.possible_length.contains(&actual_length) {
            return false;
        }
        // very common name, so specify mod
        helper_functions::is_match(self.matcher_api.as_ref(), national_number, number_desc)
    }

    /// Tests whether a phone number matches a valid pattern of the region it
    /// resolves to.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. A number
    /// valid in one region sharing its calling code is not valid for the
    /// others, e.g. a Bahamas number is not valid for the US.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self
            .store
            .metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code && country_code != metadata.country_code() {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata) != PhoneNumberType::Unknown
    }

    /// Checks whether the number length is plausible for its region. This only
    /// looks at the length, so it is much faster than full validation.
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        self.is_possible_number_for_type_with_reason(phone_number, PhoneNumberType::Unknown)
    }

    pub fn is_possible_number_for_type(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> bool {
        self.is_possible_number_for_type_with_reason(phone_number, phone_number_type)
            .is_ok()
    }

    /// `PhoneNumberType::Unknown` checks against the general length range of
    /// the region, any other type against the exact lengths of that type.
    pub fn is_possible_number_for_type_with_reason(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> Result<NumberLengthType, ValidationError> {
        let country_code = phone_number.country_code();
        if !self.store.has_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let mut region_code = self.get_region_code_for_number(phone_number);
        if region_code == i18n::RegionCode::get_unknown() {
            region_code = self.store.main_region_for_calling_code(country_code);
        }
        let Some(metadata) = self
            .store
            .metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        let national_number = Self::get_national_significant_number(phone_number);
        if phone_number_type == PhoneNumberType::Unknown {
            test_number_length_with_unknown_type(&national_number, metadata)
        } else {
            test_number_length(&national_number, metadata, phone_number_type)
        }
    }

    /// Possibility, validity, type and region of a number in one pass.
    pub fn validation_outcome(&self, phone_number: &PhoneNumber) -> ValidationOutcome {
        let region_code = self.get_region_code_for_number(phone_number);
        let resolved_region = (region_code != i18n::RegionCode::get_unknown())
            .then(|| region_code.to_owned());
        let is_valid = self.is_valid_number_for_region(phone_number, region_code);
        let number_type = if is_valid {
            self.get_number_type(phone_number)
        } else {
            PhoneNumberType::Unknown
        };
        ValidationOutcome {
            is_possible: self.is_possible_number(phone_number),
            is_valid,
            number_type,
            resolved_region,
        }
    }

    pub(super) fn get_regex(&self, pattern: &str) -> Option<Arc<Regex>> {
        self.reg_exps
            .regexp_cache
            .get_regex(pattern)
            .inspect_err(|err| error!("Invalid regex! {}: {}", pattern, err))
            .ok()
    }

    pub(super) fn get_full_match_regex(&self, pattern: &str) -> Option<Arc<Regex>> {
        self.reg_exps
            .regexp_cache
            .get_full_match_regex(pattern)
            .inspect_err(|err| error!("Invalid regex! {}: {}", pattern, err))
            .ok()
    }
}
