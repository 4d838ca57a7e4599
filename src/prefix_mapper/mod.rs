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

use std::collections::HashMap;

use log::warn;

use crate::{
    generated::prefix_data::{CARRIER_DATA, GEOCODING_DATA, PrefixDataFile},
    phonenumber::PhoneNumber,
    phonenumberutil::PhoneNumberUtil,
};

/// Descriptions of one calling code, keyed by full prefix ("<cc><digits>").
#[derive(Debug, Default)]
struct CallingCodePrefixes {
    descriptions: HashMap<u64, String>,
    /// Distinct prefix lengths in digits, longest first.
    prefix_lengths: Vec<usize>,
}

/// Maps phone number prefixes to a description, such as a carrier name or
/// a geographical area. A lookup picks the longest prefix of
/// "<calling code><national significant number>" present in the data.
#[derive(Debug, Default)]
pub struct PrefixDescriptionMap {
    by_calling_code: HashMap<i32, CallingCodePrefixes>,
}

impl PrefixDescriptionMap {
    /// Carrier names shipped with the crate, in the given language.
    pub fn carriers(language: &str) -> Self {
        Self::from_files(CARRIER_DATA, language)
    }

    /// Geographical descriptions shipped with the crate, in the given language.
    pub fn geocoding(language: &str) -> Self {
        Self::from_files(GEOCODING_DATA, language)
    }

    fn from_files(files: &[PrefixDataFile], language: &str) -> Self {
        let mut map = Self::default();
        for file in files.iter().filter(|file| file.language == language) {
            map.add_calling_code_data(file.calling_code, file.content);
        }
        if map.by_calling_code.is_empty() {
            warn!("No prefix data available for language '{}'", language);
        }
        map
    }

    /// Adds `prefix|description` lines for one calling code. Blank lines and
    /// lines starting with '#' are skipped, malformed lines are skipped with a
    /// warning.
    pub fn add_calling_code_data(&mut self, calling_code: i32, content: &str) {
        let mut buf = itoa::Buffer::new();
        let calling_code_str = buf.format(calling_code);
        let entry = self.by_calling_code.entry(calling_code).or_default();

        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((prefix, description)) = line.split_once('|') else {
                warn!("Line {} of prefix data for +{} has no '|' separator", line_number + 1, calling_code);
                continue;
            };
            if !prefix.starts_with(calling_code_str) {
                warn!("Prefix {} does not belong to calling code +{}", prefix, calling_code);
                continue;
            }
            let Ok(prefix_code) = prefix.parse::<u64>() else {
                warn!("Failed to parse prefix '{}' for +{}", prefix, calling_code);
                continue;
            };
            if !entry.prefix_lengths.contains(&prefix.len()) {
                entry.prefix_lengths.push(prefix.len());
            }
            entry.descriptions.insert(prefix_code, description.trim().to_owned());
        }
        entry.prefix_lengths.sort_unstable_by(|a, b| b.cmp(a));
    }

    /// Description of the longest known prefix of the number, if any.
    pub fn lookup(&self, phone_number: &PhoneNumber) -> Option<&str> {
        let calling_code = phone_number.country_code();
        let prefixes = self.by_calling_code.get(&calling_code)?;

        let mut buf = itoa::Buffer::new();
        let national_significant_number = PhoneNumberUtil::get_national_significant_number(phone_number);
        let full_number = fast_cat::concat_str!(buf.format(calling_code), &national_significant_number);

        prefixes
            .prefix_lengths
            .iter()
            .filter(|length| **length <= full_number.len())
            .find_map(|length| {
                let prefix = full_number[..*length].parse::<u64>().ok()?;
                prefixes.descriptions.get(&prefix)
            })
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_calling_code
            .values()
            .all(|prefixes| prefixes.descriptions.is_empty())
    }
}
