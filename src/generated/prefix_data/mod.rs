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

/// One `prefix|description` file of auxiliary data. Files are grouped by
/// language and calling code like libphonenumber's carrier and geocoding data.
#[derive(Debug, Clone, Copy)]
pub struct PrefixDataFile {
    pub language: &'static str,
    pub calling_code: i32,
    pub content: &'static str,
}

macro_rules! prefix_file {
    ($kind:literal, $language:literal, $calling_code:literal, $calling_code_str:literal) => {
        PrefixDataFile {
            language: $language,
            calling_code: $calling_code,
            content: include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/resources/", $kind, "/", $language, "/", $calling_code_str, ".txt"
            )),
        }
    };
}

pub const CARRIER_DATA: &[PrefixDataFile] = &[
    prefix_file!("carrier", "en", 44, "44"),
    prefix_file!("carrier", "en", 212, "212"),
    prefix_file!("carrier", "en", 234, "234"),
    prefix_file!("carrier", "en", 254, "254"),
];

pub const GEOCODING_DATA: &[PrefixDataFile] = &[
    prefix_file!("geocoding", "en", 1, "1"),
    prefix_file!("geocoding", "en", 33, "33"),
    prefix_file!("geocoding", "en", 44, "44"),
    prefix_file!("geocoding", "en", 49, "49"),
    prefix_file!("geocoding", "en", 212, "212"),
    prefix_file!("geocoding", "en", 234, "234"),
];
