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

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, warn};

use crate::{
    i18n,
    phonemetadata::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    phonenumberutil::{
        PhoneNumberType,
        errors::{MetadataLoadError, UnknownRegionError},
        helper_constants::{
            FIRST_GROUP, FIRST_GROUP_PLACEHOLDER, NATIONAL_PREFIX_PLACEHOLDER,
            REGION_CODE_FOR_NON_GEO_ENTITY,
        },
        helper_functions::{general_length_range, get_number_desc_by_type},
    },
    regexp_cache::RegexCache,
};

/// Numbering plans indexed by region and by country calling code.
///
/// Built once by [`MetadataStore::load`] and read-only afterwards, so it can
/// be shared between threads without locking.
#[derive(Debug)]
pub struct MetadataStore {
    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,

    /// A mapping from a country calling code to the regions represented by that
    /// country calling code, main country first. Note regions under NANPA share
    /// the country calling code 1 and Russia and Kazakhstan share the country
    /// calling code 7. This is implemented as a sorted vector to achieve better
    /// performance.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// Distinct international dialling prefixes of all regions, longest first.
    international_prefixes: Vec<String>,
}

impl MetadataStore {
    /// Validates and indexes the numbering plans. Patterns are compiled into a
    /// throwaway cache; use [`PhoneNumberUtil`](crate::PhoneNumberUtil) to keep
    /// the compiled patterns around.
    pub fn load(collection: PhoneMetadataCollection) -> Result<Self, MetadataLoadError> {
        Self::load_with_cache(collection, &RegexCache::with_capacity(256))
    }

    pub(crate) fn load_with_cache(
        collection: PhoneMetadataCollection,
        regexp_cache: &RegexCache,
    ) -> Result<Self, MetadataLoadError> {
        let mut region_to_metadata_map = HashMap::new();
        let mut country_code_to_non_geographical_metadata_map = HashMap::new();
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        let mut main_countries = HashMap::<i32, String>::new();
        let mut international_prefixes = HashSet::new();

        for mut metadata in collection.metadata {
            let region_code = metadata.id().to_owned();
            if region_code.is_empty() {
                return Err(MetadataLoadError::MissingRegionId);
            }
            if i18n::RegionCode::get_unknown() == region_code {
                warn!("Skipping metadata for the unknown region");
                continue;
            }
            let country_calling_code = metadata.country_code();
            if country_calling_code <= 0 {
                return Err(MetadataLoadError::InvalidCallingCode {
                    region: region_code,
                    country_code: country_calling_code,
                });
            }

            check_possible_lengths(&region_code, &metadata)?;
            normalize_metadata(&mut metadata);
            compile_patterns(&metadata, regexp_cache)?;

            if metadata.main_country_for_code() {
                if let Some(first) = main_countries.insert(country_calling_code, region_code.clone()) {
                    return Err(MetadataLoadError::DuplicateMainCountry {
                        country_code: country_calling_code,
                        first,
                        second: region_code,
                    });
                }
            }
            if !metadata.international_prefix().is_empty() {
                international_prefixes.insert(metadata.international_prefix().to_owned());
            }

            let main_country_code = metadata.main_country_for_code();
            let duplicate = if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
                country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata)
                    .is_some()
            } else {
                region_to_metadata_map
                    .insert(region_code.clone(), metadata)
                    .is_some()
            };
            if duplicate {
                return Err(MetadataLoadError::DuplicateRegion(region_code));
            }

            let regions = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_code {
                regions.push_front(region_code);
            } else {
                regions.push_back(region_code);
            }
        }

        let mut country_calling_code_to_region_code_map = Vec::with_capacity(country_calling_code_to_region_map.len());
        for (country_calling_code, regions) in country_calling_code_to_region_map {
            if regions.len() > 1 && !main_countries.contains_key(&country_calling_code) {
                return Err(MetadataLoadError::MissingMainCountry(country_calling_code));
            }
            country_calling_code_to_region_code_map.push((country_calling_code, Vec::from(regions)));
        }
        // Sort all the pairs in ascending order according to country calling code.
        country_calling_code_to_region_code_map.sort_by_key(|(code, _)| *code);

        let mut international_prefixes = Vec::from_iter(international_prefixes);
        international_prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        debug!(
            "Loaded metadata for {} regions and {} non-geographical entities",
            region_to_metadata_map.len(),
            country_code_to_non_geographical_metadata_map.len()
        );
        Ok(Self {
            region_to_metadata_map,
            country_code_to_non_geographical_metadata_map,
            country_calling_code_to_region_code_map,
            international_prefixes,
        })
    }

    /// Numbering plan of a geographical region such as "US" or "NG".
    pub fn lookup(&self, region_code: &str) -> Result<&PhoneMetadata, UnknownRegionError> {
        self.region_to_metadata_map
            .get(region_code)
            .ok_or_else(|| UnknownRegionError(region_code.to_owned()))
    }

    /// Regions sharing the country calling code, main country first. Empty for
    /// unknown calling codes.
    pub fn lookup_by_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn lookup_non_geographical(&self, country_calling_code: i32) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map.get(&country_calling_code)
    }

    pub fn has_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    pub fn is_valid_region(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned.
    pub fn main_region_for_calling_code(&self, country_calling_code: i32) -> &str {
        self.lookup_by_calling_code(country_calling_code)
            .first()
            .map(String::as_str)
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    pub fn metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.lookup_non_geographical(country_calling_code)
        } else {
            self.region_to_metadata_map.get(region_code)
        }
    }

    /// Sorted list of geographical regions.
    pub fn supported_regions(&self) -> Vec<&str> {
        let mut regions = Vec::from_iter(self.region_to_metadata_map.keys().map(String::as_str));
        regions.sort_unstable();
        regions
    }

    pub fn supported_calling_codes(&self) -> HashSet<i32> {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
            .collect()
    }

    pub fn supported_global_network_calling_codes(&self) -> HashSet<i32> {
        self.country_code_to_non_geographical_metadata_map
            .keys()
            .copied()
            .collect()
    }

    /// Distinct international dialling prefix patterns, longest first.
    pub fn international_prefixes(&self) -> &[String] {
        &self.international_prefixes
    }
}

/// The general description must exist and every type-specific length must lie
/// inside the general range, otherwise a valid number could be impossible.
fn check_possible_lengths(region_code: &str, metadata: &PhoneMetadata) -> Result<(), MetadataLoadError> {
    let general_desc = &metadata.general_desc;
    if !general_desc.has_national_number_pattern() || general_desc.possible_length.is_empty() {
        return Err(MetadataLoadError::MissingGeneralDesc(region_code.to_owned()));
    }
    let Some((minimum_length, maximum_length)) = general_length_range(metadata) else {
        return Err(MetadataLoadError::MissingGeneralDesc(region_code.to_owned()));
    };
    for number_type in type_descs() {
        let desc = get_number_desc_by_type(metadata, number_type);
        let out_of_range = desc
            .possible_length
            .iter()
            .chain(desc.possible_length_local_only.iter())
            .find(|length| **length < minimum_length || **length > maximum_length);
        if let Some(length) = out_of_range {
            return Err(MetadataLoadError::LengthOutsideGeneralRange {
                region: region_code.to_owned(),
                number_type: number_type.name(),
                length: *length,
            });
        }
    }
    Ok(())
}

/// Every type with its own description, i.e. all but the two derived ones.
fn type_descs() -> impl Iterator<Item = PhoneNumberType> {
    use strum::IntoEnumIterator;
    PhoneNumberType::iter().filter(|number_type| {
        !matches!(number_type, PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown)
    })
}

/// Resolves the national prefix placeholders and fills in what the data file
/// leaves implicit.
fn normalize_metadata(metadata: &mut PhoneMetadata) {
    let national_prefix = metadata.national_prefix().to_owned();
    let region_rule = metadata.national_prefix_formatting_rule().to_owned();

    for format in metadata
        .number_format
        .iter_mut()
        .chain(metadata.intl_number_format.iter_mut())
    {
        if !format.has_national_prefix_formatting_rule() && !region_rule.is_empty() {
            format.set_national_prefix_formatting_rule(region_rule.clone());
        }
        resolve_national_prefix_formatting_rule(format, &national_prefix);
    }

    if !metadata.has_national_prefix_for_parsing() && !national_prefix.is_empty() {
        metadata.set_national_prefix_for_parsing(national_prefix);
    }

    let fixed_line_pattern = metadata.fixed_line.national_number_pattern();
    let same_pattern = !fixed_line_pattern.is_empty()
        && fixed_line_pattern == metadata.mobile.national_number_pattern();
    metadata.set_same_mobile_and_fixed_line_pattern(same_pattern);
}

/// Replace $NP with national prefix and $FG with the first group ($1).
pub(super) fn resolve_national_prefix_formatting_rule(format: &mut NumberFormat, national_prefix: &str) {
    let rule = format.national_prefix_formatting_rule();
    if rule.is_empty() {
        return;
    }
    if national_prefix.is_empty() && rule.contains(NATIONAL_PREFIX_PLACEHOLDER) {
        // We don't want to have a rule for how to format the national prefix if
        // there isn't one.
        format.clear_national_prefix_formatting_rule();
        return;
    }
    let rule = rule
        .replace(NATIONAL_PREFIX_PLACEHOLDER, national_prefix)
        .replace(FIRST_GROUP_PLACEHOLDER, FIRST_GROUP);
    format.set_national_prefix_formatting_rule(rule);
}

/// Compiles every pattern of the plan once, so a broken pattern fails the load
/// instead of a later parse.
fn compile_patterns(metadata: &PhoneMetadata, regexp_cache: &RegexCache) -> Result<(), MetadataLoadError> {
    let descs: [&PhoneNumberDesc; 11] = [
        &metadata.general_desc,
        &metadata.fixed_line,
        &metadata.mobile,
        &metadata.toll_free,
        &metadata.premium_rate,
        &metadata.shared_cost,
        &metadata.personal_number,
        &metadata.voip,
        &metadata.pager,
        &metadata.uan,
        &metadata.voicemail,
    ];
    for desc in descs {
        if !desc.national_number_pattern().is_empty() {
            regexp_cache.get_full_match_regex(desc.national_number_pattern())?;
        }
    }
    for format in metadata.number_format.iter().chain(metadata.intl_number_format.iter()) {
        regexp_cache.get_full_match_regex(format.pattern())?;
        for leading_digits in &format.leading_digits_pattern {
            regexp_cache.get_regex(leading_digits)?;
        }
    }
    for prefix_pattern in [
        metadata.international_prefix(),
        metadata.national_prefix_for_parsing(),
        metadata.leading_digits(),
    ] {
        if !prefix_pattern.is_empty() {
            regexp_cache.get_regex(prefix_pattern)?;
        }
    }
    Ok(())
}
