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

use std::{collections::HashMap, sync::Arc};

use regex::Regex;

use crate::{phonenumberutil::{helper_constants::{
    CAPTURE_UP_TO_SECOND_NUMBER_START, DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS,
    PLUS_SIGN, RFC3966_VISUAL_SEPARATOR, STAR_SIGN, VALID_ALPHA, VALID_ALPHA_INCL_UPPERCASE,
    VALID_PUNCTUATION
}, helper_functions::create_extn_pattern}, regexp_cache::RegexCache};

pub(super) struct PhoneNumberRegExpsAndMappings {
    /// Patterns of the numbering plans, compiled while the metadata is loaded
    /// and shared with the matcher.
    pub regexp_cache: Arc<RegexCache>,

    /// These mappings map a character (key) to a specific digit that should
    /// replace it for normalization purposes.
    pub alpha_mappings: HashMap<char, char>,
    /// For performance reasons, store a map of combining alpha_mappings with ASCII
    /// digits.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// Regular expression of acceptable characters that may start a phone number
    /// for the purposes of parsing. This allows us to strip away meaningless
    /// prefixes to phone numbers that may be mistakenly given to us. This consists
    /// of digits, the plus symbol and arabic-indic digits. This does not contain
    /// alpha characters, although they may be used later in the number. It also
    /// does not include other punctuation, as this will be stripped later during
    /// parsing and is of no information value when parsing a number. The string
    /// starting with this valid character is captured.
    pub valid_start_char_pattern: Regex,

    /// Regular expression of valid characters before a marker that might indicate
    /// a second number.
    pub capture_up_to_second_number_start_pattern: Regex,

    /// Regular expression of trailing characters that we want to remove. We remove
    /// all characters that are not alpha or numerical characters. The hash
    /// character is retained here, as it may signify the previous block was an
    /// extension.
    pub unwanted_end_char_pattern: Regex,

    /// Regular expression of groups of valid punctuation characters.
    pub separator_pattern: Regex,

    /// Regexp of all known extension prefixes used by different regions followed
    /// by 1 or more valid digits, for use when parsing.
    pub extn_pattern: Regex,

    /// Regular expression of viable phone numbers. This is location independent.
    /// Checks we have at least three leading digits, and only valid punctuation,
    /// alpha characters and digits in the phone number. Does not include extension
    /// data. The symbol 'x' is allowed here as valid punctuation since it is often
    /// used as a placeholder for carrier codes, for example in Brazilian phone
    /// numbers. We also allow multiple plus-signs at the start.
    ///
    /// Corresponds to the following:
    /// `plus_sign*(([punctuation]|[star])*[digits]){3,}
    /// ([punctuation]|[star]|[digits]|[alpha])*|[digits]{minLengthNsn}`
    ///
    /// The first expression restricts the number of digits to three or
    /// more, but then allows them to be in international form, and to have
    /// alpha-characters and punctuation. The second one allows short numbers
    /// (two digits long) to be parsed if they are entered as "15" etc, but only
    /// if there is no punctuation in them.
    ///
    /// We append optionally the extension pattern to the end here, as a valid
    /// phone number may have an extension prefix appended, followed by 1 or more
    /// digits.
    pub valid_phone_number_pattern: Regex,

    /// We use this pattern to check if the phone number has at least three letters
    /// in it - if so, then we treat it as a number where some phone-number digits
    /// are represented by letters.
    pub valid_alpha_phone_pattern: Regex,

    /// The first_group_capturing_pattern was originally set to $1 but there
    /// are some countries for which the first group is not used in the
    /// national pattern (e.g. Argentina) so the $1 group does not match
    /// correctly. Therefore, we use \d, so that the first group actually
    /// used in the pattern will be matched.
    pub first_group_capturing_pattern: Regex,

    pub plus_chars_pattern: Regex,

    /// Regular expression of valid global-number-digits for the phone-context
    /// parameter, following the syntax defined in RFC3966.
    pub rfc3966_global_number_digits_pattern: Regex,

    /// Regular expression of valid domainname for the phone-context parameter,
    /// following the syntax defined in RFC3966.
    pub rfc3966_domainname_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn initialize_regexp_mappings(&mut self) {
        // Simple ASCII digits map used to populate ALPHA_PHONE_MAPPINGS.
        let ascii_digit_mappings = ('0'..='9').map(|d| (d, d));

        // IMPORTANT: only uppercase letters like in Java version
        let keypad = [
            ("ABC", '2'), ("DEF", '3'), ("GHI", '4'), ("JKL", '5'),
            ("MNO", '6'), ("PQRS", '7'), ("TUV", '8'), ("WXYZ", '9'),
        ];
        self.alpha_mappings = keypad
            .iter()
            .flat_map(|(letters, digit)| letters.chars().map(move |letter| (letter, *digit)))
            .collect();

        let mut combined_map = HashMap::with_capacity(self.alpha_mappings.len() + 10);
        combined_map.extend(self.alpha_mappings.iter());
        combined_map.extend(ascii_digit_mappings);
        self.alpha_phone_mappings = combined_map;
    }

    pub fn new(regexp_cache: Arc<RegexCache>) -> Self {
        let alphanum = fast_cat::concat_str!(VALID_ALPHA_INCL_UPPERCASE, DIGITS);
        let extn_patterns_for_parsing = create_extn_pattern();
        // it'll be initialized only once, so we can use slow format!
        let valid_phone_number = format!(
                // moved 2-digits pattern to an end for match full number first
                "[{}]*(?:[{}{}]*[{}]){{3,}}[{}{}{}{}]*|[{}]{{{}}}",
                PLUS_CHARS,
                VALID_PUNCTUATION, STAR_SIGN, DIGITS,
                VALID_PUNCTUATION, STAR_SIGN, DIGITS, VALID_ALPHA,
                DIGITS, MIN_LENGTH_FOR_NSN,
            );

        let rfc3966_phone_digit = format!("(?:[{}]|{})", DIGITS, RFC3966_VISUAL_SEPARATOR);
        let rfc3966_domainlabel = format!("[{}]+(?:-*[{}])*", alphanum, alphanum);
        let rfc3966_toplabel = format!("[{}]+(?:-*[{}])*", VALID_ALPHA_INCL_UPPERCASE, alphanum);

        let mut instance = Self {
            regexp_cache,
            alpha_mappings: Default::default(),
            alpha_phone_mappings: Default::default(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            capture_up_to_second_number_start_pattern: Regex::new(CAPTURE_UP_TO_SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new("^[^\\p{N}\\p{L}#]$").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!("(?i)^(?:{})(?:{})?$",
                &valid_phone_number,
                &extn_patterns_for_parsing
            )).unwrap(),
            // from java
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            rfc3966_global_number_digits_pattern: Regex::new(
                &format!("^\\{}{}*[{}]{}*$", PLUS_SIGN, &rfc3966_phone_digit, DIGITS, rfc3966_phone_digit)
            ).unwrap(),
            rfc3966_domainname_pattern: Regex::new(
                &format!("^(?:{}\\.)*{}\\.?$", rfc3966_domainlabel, rfc3966_toplabel)
            ).unwrap(),
        };
        instance.initialize_regexp_mappings();
        instance
    }
}
