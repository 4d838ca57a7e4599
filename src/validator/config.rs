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

/// Where the numbering plans come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetadataSource {
    /// The data file compiled into the crate.
    #[default]
    Embedded,
    /// Numbering plans in protobuf text format.
    Text(String),
}

/// Settings of a [`PhoneValidator`](super::PhoneValidator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub metadata: MetadataSource,
    /// Language of carrier names and geographical descriptions.
    pub language: String,
    pub carrier_lookup: bool,
    pub geocoding: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            metadata: MetadataSource::Embedded,
            language: "en".to_owned(),
            carrier_lookup: true,
            geocoding: true,
        }
    }
}

impl ValidatorConfig {
    pub fn with_metadata(mut self, metadata: MetadataSource) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Enables or disables carrier names in reports.
    pub fn with_carrier_lookup(mut self, enabled: bool) -> Self {
        self.carrier_lookup = enabled;
        self
    }

    /// Enables or disables geographical descriptions in reports.
    pub fn with_geocoding(mut self, enabled: bool) -> Self {
        self.geocoding = enabled;
        self
    }
}
