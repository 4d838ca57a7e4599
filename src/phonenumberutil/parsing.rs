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

use std::borrow::Cow;

use log::debug;

use crate::{
    phonemetadata::PhoneMetadata,
    phonenumber::{PhoneNumber, phone_number::CountryCodeSource},
    phonenumberutil::{
        errors::{ExtractNumberError, NotANumberError, ParseError, ValidationError},
        helper_constants::{
            MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
            PLUS_SIGN, RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
        },
        helper_functions::{self, normalize_helper, test_number_length_with_unknown_type},
        helper_types::{ExtractedCountryCode, NumberWithExtension, PhoneNumberWithCountryCodeSource},
        phonenumberutil::PhoneNumberUtil,
    },
    regex_util::RegexConsume,
    string_util::{cut_cow_start, split_at_marker},
};

impl PhoneNumberUtil {
    /// Parses a string and returns it as a phone number in proto buffer format.
    ///
    /// The method is quite lenient and looks for a number in the input text
    /// (raw input) and does not check whether the string is definitely only a
    /// phone number. To do this, it ignores punctuation and white-space, as well
    /// as any text before the number (e.g. a leading "Tel: ") and trims the
    /// non-number bits. It will accept a number in any format (E164, national,
    /// international etc), assuming it can be interpreted with the defaultRegion
    /// supplied. It also attempts to convert any alpha characters into digits if
    /// it thinks this is a vanity number of the type "1800 MICROSOFT".
    ///
    /// `default_region` is only consulted when the number is not written in
    /// international format (leading "+" or an international dialling prefix).
    /// Without it such numbers fail with [`ParseError::MissingRegion`]; the
    /// region is never guessed.
    pub fn parse(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false)
    }

    /// Same as [`parse`](Self::parse), but keeps the raw input and records how
    /// the country calling code was written.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true)
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. At the moment, checks to see that the string begins with at
    /// least 2 digits, ignoring any punctuation commonly found in phone numbers.
    /// This method does not require the number to be normalized in advance - but
    /// does assume that leading non-number symbols have been removed, such as by
    /// the method `extract_possible_number`.
    pub fn is_viable_phone_number(&self, phone_number: &str) -> bool {
        if phone_number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(phone_number)
    }

    /// Attempts to extract a possible number from the string passed in. This
    /// currently strips all leading characters that cannot be used to start a
    /// phone number. Characters that can be used to start a phone number are
    /// defined in the valid_start_char_pattern. If none of these characters are
    /// found in the number passed in, an error is returned. This function also
    /// attempts to strip off any alternative extensions or endings if two or more
    /// are present, such as in the case of: (530) 583-6985 x302/x2303. The second
    /// extension here makes this actually two phone numbers, (530) 583-6985 x302
    /// and (530) 583-6985 x2303. We remove the second extension so that the first
    /// number is parsed correctly.
    pub fn extract_possible_number<'a>(&self, phone_number: &'a str) -> Result<&'a str, ExtractNumberError> {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(phone_number) else {
            debug!("Number '{}' has no valid start character", phone_number);
            return Err(ExtractNumberError::NoValidStartCharacter);
        };
        let mut possible_number = self.trim_unwanted_end_chars(&phone_number[start.start()..]);
        // Check for extra numbers at the end.
        if let Some(captures) = self
            .reg_exps
            .capture_up_to_second_number_start_pattern
            .captures(possible_number)
        {
            if let Some(first_number) = captures.get(1) {
                possible_number = first_number.as_str();
            }
        }
        if possible_number.is_empty() {
            return Err(ExtractNumberError::NotANumber);
        }
        Ok(possible_number)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
        keep_raw_input: bool,
    ) -> Result<PhoneNumber, ParseError> {
        if number_to_parse.len() > MAX_INPUT_STRING_LENGTH {
            return Err(NotANumberError::InputTooLong.into());
        }
        let national_number = self.build_national_number_for_parsing(number_to_parse)?;
        if !self.is_viable_phone_number(&national_number) {
            debug!("The string supplied did not seem to be a phone number '{}'", national_number);
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        let default_region = default_region.filter(|region| !region.is_empty());
        let default_region_metadata = match default_region.map(|region| self.store.lookup(region)) {
            Some(Ok(metadata)) => Some(metadata),
            // An unknown region is fine as long as the number carries its own
            // calling code after a plus sign.
            Some(Err(err)) if !self.starts_with_plus_chars(&national_number) => {
                debug!("Number '{}' has no plus sign and {}", national_number, err);
                return Err(err.into());
            }
            Some(Err(_)) | None => None,
        };

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_owned());
        }
        // Attempt to parse extension first, since it doesn't require
        // region-specific data and we want to have the non-normalised number here.
        let NumberWithExtension { number, extension } = self.maybe_strip_extension(&national_number);
        if let Some(extension) = extension {
            phone_number.set_extension(Self::normalize_digits_only(extension).into_owned());
        }

        let extracted = self.maybe_extract_country_code(number, default_region_metadata)?;
        let (country_code, region_metadata) = if extracted.country_code != 0 {
            let region_code = self.store.main_region_for_calling_code(extracted.country_code);
            (
                extracted.country_code,
                self.store
                    .metadata_for_region_or_calling_code(extracted.country_code, region_code),
            )
        } else {
            let Some(metadata) = default_region_metadata else {
                debug!("Number '{}' has no international prefix and no default region", number);
                return Err(ParseError::MissingRegion);
            };
            (metadata.country_code(), Some(metadata))
        };
        if keep_raw_input {
            phone_number.set_country_code_source(extracted.country_code_source);
        }

        let mut normalized_national_number = extracted.national_number;
        if let Some(metadata) = region_metadata {
            normalized_national_number =
                self.maybe_strip_national_prefix(normalized_national_number, metadata);
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            debug!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            debug!("The string supplied is too long to be a phone number.");
            return Err(ParseError::TooLongNsn);
        }
        if let Some(metadata) = region_metadata {
            if test_number_length_with_unknown_type(&normalized_national_number, metadata)
                == Err(ValidationError::TooShort)
            {
                debug!("Number '{}' is shorter than any number of {}", normalized_national_number, metadata.id());
                return Err(ParseError::TooShortNsn);
            }
        }

        Self::set_italian_leading_zeros(&normalized_national_number, &mut phone_number);
        let national_number = normalized_national_number
            .parse::<u64>()
            .map_err(NotANumberError::from)?;
        phone_number.set_country_code(country_code);
        phone_number.set_national_number(national_number);
        Ok(phone_number)
    }

    /// Converts number_to_parse to a form that we can parse and returns it if it
    /// is written in RFC3966; otherwise extract a possible number out of it and
    /// return it.
    fn build_national_number_for_parsing(&self, number_to_parse: &str) -> Result<String, ParseError> {
        let (before_phone_context, phone_context_and_rest) =
            split_at_marker(number_to_parse, RFC3966_PHONE_CONTEXT);

        let mut national_number = if let Some(phone_context_and_rest) = phone_context_and_rest {
            // The phone context ends at the next parameter, if any.
            let phone_context = phone_context_and_rest.split(';').next().unwrap_or_default();
            if !self.is_phone_context_valid(phone_context) {
                debug!("The phone-context value '{}' is invalid.", phone_context);
                return Err(NotANumberError::InvalidPhoneContext.into());
            }
            let mut national_number = String::with_capacity(number_to_parse.len());
            // If the phone context contains a phone number prefix, we need to capture
            // it, whereas domains will be ignored.
            if phone_context.starts_with(PLUS_SIGN) {
                national_number.push_str(phone_context);
            }
            // Now append everything between the "tel:" prefix and the phone-context.
            // This should include the national number, an optional extension or
            // isdn-subaddress component. Note we also handle the case when "tel:" is
            // missing, as we have seen in some of the phone number inputs.
            let number_start = before_phone_context
                .find(RFC3966_PREFIX)
                .map(|index| index + RFC3966_PREFIX.len())
                .unwrap_or(0);
            national_number.push_str(&before_phone_context[number_start..]);
            national_number
        } else {
            // Extract a possible number from the string passed in (this strips leading
            // characters that could not be the start of a phone number.)
            self.extract_possible_number(number_to_parse)?.to_owned()
        };

        // Delete the isdn-subaddress and everything after it if it is present. Note
        // extension won't appear at the same time with isdn-subaddress according to
        // paragraph 5.3 of RFC 3966.
        if let Some(index) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            national_number.truncate(index);
        }
        // If both phone context and isdn-subaddress are absent but other parameters
        // are present, the parameters are left in national_number. This is because
        // we are concerned about deleting content from a potential number string
        // when there is no strong evidence that the number is actually written in
        // RFC3966.
        Ok(national_number)
    }

    /// Returns whether the value of phoneContext follows the syntax defined in
    /// RFC3966.
    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        // Does phone-context value match pattern of global-number-digits or
        // domainname
        self.reg_exps.rfc3966_global_number_digits_pattern.is_match(phone_context)
            || self.reg_exps.rfc3966_domainname_pattern.is_match(phone_context)
    }

    fn trim_unwanted_end_chars<'a>(&self, phone_number: &'a str) -> &'a str {
        let mut end = phone_number.len();
        let mut buf = [0u8; 4];
        for (index, char) in phone_number.char_indices().rev() {
            if !self
                .reg_exps
                .unwanted_end_char_pattern
                .is_match(char.encode_utf8(&mut buf))
            {
                break;
            }
            end = index;
        }
        &phone_number[..end]
    }

    fn starts_with_plus_chars(&self, phone_number: &str) -> bool {
        self.reg_exps.plus_chars_pattern.matches_start(phone_number)
    }

    /// Strips any extension (as in, the part of the number dialled after the
    /// call is connected, usually indicated with extn, ext, x or similar) from
    /// the end of the number.
    fn maybe_strip_extension<'a>(&self, phone_number: &'a str) -> NumberWithExtension<'a> {
        let no_extension = NumberWithExtension { number: phone_number, extension: None };
        let Some(captures) = self.reg_exps.extn_pattern.captures(phone_number) else {
            return no_extension;
        };
        let Some(full_match) = captures.get(0) else {
            return no_extension;
        };
        let number_without_extension = &phone_number[..full_match.start()];
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !self.is_viable_phone_number(number_without_extension) {
            return no_extension;
        }
        // The numbers are captured into groups in the regular expression.
        match captures
            .iter()
            .skip(1)
            .flatten()
            .find(|group| !group.as_str().is_empty())
        {
            Some(extension) => NumberWithExtension {
                number: number_without_extension,
                extension: Some(extension.as_str()),
            },
            None => no_extension,
        }
    }

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals, and
    /// strips punctuation and alpha characters. Numbers with three or more
    /// letters are vanity numbers, their letters are mapped to keypad digits.
    fn normalize<'a>(&self, phone_number: &'a str) -> Cow<'a, str> {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            let decimals = dec_from_char::normalize_decimals(phone_number);
            Cow::Owned(normalize_helper(&self.reg_exps.alpha_phone_mappings, true, &decimals))
        } else {
            Self::normalize_digits_only(phone_number)
        }
    }

    /// Keeps only the decimal digits of the string, converted to ASCII.
    pub(super) fn normalize_digits_only(phone_number: &str) -> Cow<'_, str> {
        if phone_number.bytes().all(|byte| byte.is_ascii_digit()) {
            return Cow::Borrowed(phone_number);
        }
        let decimals = dec_from_char::normalize_decimals(phone_number);
        Cow::Owned(decimals.chars().filter(char::is_ascii_digit).collect())
    }

    /// Strips the IDD from the start of the number if present. Helper function
    /// used by maybe_strip_international_prefix_and_normalize. Returns the
    /// length of the prefix.
    fn parse_prefix_as_idd(&self, idd_pattern: &str, phone_number: &str) -> Option<usize> {
        let found = self.get_regex(idd_pattern)?.find_start(phone_number)?;
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if phone_number[found.end()..].starts_with('0') {
            return None;
        }
        Some(found.end())
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    ///
    /// With `require_known_calling_code` a prefix is only accepted when a known
    /// calling code follows it; several candidate prefixes are then tried in
    /// order.
    fn maybe_strip_international_prefix_and_normalize<'a>(
        &self,
        phone_number: &'a str,
        possible_idd_prefixes: &[&str],
        require_known_calling_code: bool,
    ) -> PhoneNumberWithCountryCodeSource<'a> {
        if phone_number.is_empty() {
            return PhoneNumberWithCountryCodeSource::new(
                Cow::Borrowed(phone_number),
                CountryCodeSource::FROM_DEFAULT_COUNTRY,
            );
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(phone_number) {
            return PhoneNumberWithCountryCodeSource::new(
                self.normalize(rest),
                CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN,
            );
        }
        let normalized_number = self.normalize(phone_number);
        for idd_pattern in possible_idd_prefixes {
            let Some(prefix_length) = self.parse_prefix_as_idd(idd_pattern, &normalized_number) else {
                continue;
            };
            if require_known_calling_code
                && self.extract_country_code(&normalized_number[prefix_length..]).is_none()
            {
                continue;
            }
            return PhoneNumberWithCountryCodeSource::new(
                cut_cow_start(normalized_number, prefix_length),
                CountryCodeSource::FROM_NUMBER_WITH_IDD,
            );
        }
        PhoneNumberWithCountryCodeSource::new(normalized_number, CountryCodeSource::FROM_DEFAULT_COUNTRY)
    }

    /// Extracts country calling code from full_number and returns it with the
    /// number of digits it takes. It assumes that the leading plus sign or IDD
    /// has already been removed. Returns `None` if full_number doesn't start
    /// with a valid country calling code.
    fn extract_country_code(&self, full_number: &str) -> Option<(i32, usize)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let country_code = full_number.get(..length)?.parse::<i32>().ok()?;
            if self.store.has_calling_code(country_code) {
                return Some((country_code, length));
            }
        }
        None
    }

    /// Tries to extract a country calling code from a number. Country calling
    /// codes are extracted in the following ways:
    ///   - by stripping the international dialing prefix of the region the person
    ///   is dialing from, if this is present in the number, and looking at the next
    ///   digits
    ///   - by stripping the '+' sign if present and then looking at the next digits
    ///   - by comparing the start of the number and the country calling code of the
    ///   default region. If the number is not considered possible for the numbering
    ///   plan of the default region initially, but starts with the country calling
    ///   code of this region, validation will be reattempted after stripping this
    ///   country calling code. If this number is considered a possible number, then
    ///   the first digits will be considered the country calling code and removed as
    ///   such.
    ///
    /// Without default region every known international dialling prefix is
    /// tried, longest first.
    ///
    /// A country calling code of 0 is returned when none was found, the
    /// returned national number is normalized either way.
    fn maybe_extract_country_code<'a>(
        &self,
        phone_number: &'a str,
        default_region_metadata: Option<&PhoneMetadata>,
    ) -> Result<ExtractedCountryCode<'a>, ParseError> {
        let possible_idd_prefixes: Vec<&str> = match default_region_metadata {
            Some(metadata) if metadata.international_prefix().is_empty() => Vec::new(),
            Some(metadata) => vec![metadata.international_prefix()],
            None => self
                .store
                .international_prefixes()
                .iter()
                .map(String::as_str)
                .collect(),
        };
        let stripped = self.maybe_strip_international_prefix_and_normalize(
            phone_number,
            &possible_idd_prefixes,
            default_region_metadata.is_none(),
        );

        if stripped.country_code_source != CountryCodeSource::FROM_DEFAULT_COUNTRY {
            if stripped.phone_number.len() <= MIN_LENGTH_FOR_NSN {
                debug!("Phone number had an IDD, but after this was not \
                    long enough to be a viable phone number.");
                return Err(ParseError::TooShortAfterIdd);
            }
            let Some((country_code, length)) = self.extract_country_code(&stripped.phone_number) else {
                // If this fails, they must be using a strange country calling code
                // that we don't recognize, or that doesn't exist.
                return Err(ParseError::InvalidCountryCode);
            };
            return Ok(ExtractedCountryCode {
                country_code,
                national_number: cut_cow_start(stripped.phone_number, length),
                country_code_source: stripped.country_code_source,
            });
        }

        if let Some(metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code for the
            // default region. If so, we remove the country calling code, and do some
            // checks on the validity of the number before and after.
            let mut buf = itoa::Buffer::new();
            let default_country_code = buf.format(metadata.country_code());
            if let Some(potential_national_number) = stripped.phone_number.strip_prefix(default_country_code) {
                let general_desc = &metadata.general_desc;
                let potential_national_number = self.maybe_strip_national_prefix(
                    Cow::Borrowed(potential_national_number),
                    metadata,
                );
                // If the number was not valid before but is valid now, or if it was too
                // long before, we consider the number with the country calling code
                // stripped to be a better result and keep that instead.
                if (!helper_functions::is_match(self.matcher_api.as_ref(), &stripped.phone_number, general_desc)
                    && helper_functions::is_match(self.matcher_api.as_ref(), &potential_national_number, general_desc))
                    || test_number_length_with_unknown_type(&stripped.phone_number, metadata)
                        == Err(ValidationError::TooLong)
                {
                    return Ok(ExtractedCountryCode {
                        country_code: metadata.country_code(),
                        national_number: cut_cow_start(stripped.phone_number, default_country_code.len()),
                        country_code_source: CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN,
                    });
                }
            }
        }
        // No country calling code present.
        Ok(ExtractedCountryCode {
            country_code: 0,
            national_number: stripped.phone_number,
            country_code_source: CountryCodeSource::FROM_DEFAULT_COUNTRY,
        })
    }

    /// Strips the national prefix of the region from the start of the number.
    /// The prefix is kept when what would remain no longer matches the general
    /// pattern of the region, since it is then part of the number itself.
    fn maybe_strip_national_prefix<'a>(
        &self,
        phone_number: Cow<'a, str>,
        metadata: &PhoneMetadata,
    ) -> Cow<'a, str> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if phone_number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length.
            return phone_number;
        }
        let Some(prefix_length) = self
            .get_regex(possible_national_prefix)
            .and_then(|regex| regex.find_start(&phone_number).map(|found| found.end()))
        else {
            return phone_number;
        };
        if prefix_length == 0
            || !helper_functions::is_match(
                self.matcher_api.as_ref(),
                &phone_number[prefix_length..],
                &metadata.general_desc,
            )
        {
            return phone_number;
        }
        cut_cow_start(phone_number, prefix_length)
    }

    /// A helper function to set the values related to leading zeros in a
    /// PhoneNumber.
    fn set_italian_leading_zeros(national_number: &str, phone_number: &mut PhoneNumber) {
        if national_number.len() > 1 && national_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
            // Note that if the number is all "0"s, the last "0" is not counted as a
            // leading zero.
            let number_of_leading_zeros = national_number
                .bytes()
                .take(national_number.len() - 1)
                .take_while(|byte| *byte == b'0')
                .count();
            if number_of_leading_zeros != 1 {
                phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
            }
        }
    }
}
