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

use log::trace;

use crate::{
    phonemetadata::{NumberFormat, PhoneMetadata},
    phonenumber::PhoneNumber,
    phonenumberutil::{
        PhoneNumberFormat,
        errors::FormatError,
        helper_constants::{DEFAULT_EXTN_PREFIX, RFC3966_EXTN_PREFIX},
        helper_functions::prefix_number_with_country_calling_code,
        metadata_store::resolve_national_prefix_formatting_rule,
        phonenumberutil::PhoneNumberUtil,
    },
    regex_util::RegexConsume,
};

impl PhoneNumberUtil {
    /// Formats a phone number in the specified format using default rules. Note
    /// that this does not promise to produce a phone number that the user can
    /// dial from where they are - although we do format in either NATIONAL or
    /// INTERNATIONAL format depending on what the client asks for, we do not
    /// currently support a more abbreviated format, such as for users in the
    /// same area who could potentially dial the number without area code.
    ///
    /// Fails when the calling code of the number has no numbering plan, for
    /// every format including E164.
    pub fn format(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Result<String, FormatError> {
        let country_calling_code = phone_number.country_code();
        let metadata = self.formatting_metadata(country_calling_code)?;
        let national_significant_number = Self::get_national_significant_number(phone_number);

        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case since no formatting of the national number
            // needs to be applied. Extensions are not formatted.
            let mut formatted_number = national_significant_number;
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }

        let mut formatted_number = self
            .format_nsn(&national_significant_number, metadata, number_format)
            .into_owned();
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata, number_format)
        {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    /// Groups the national significant number the way the national format
    /// does, without national prefix, calling code or extension.
    pub fn format_national_significant_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<String, FormatError> {
        let metadata = self.formatting_metadata(phone_number.country_code())?;
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let Some(formatting_pattern) =
            self.choose_formatting_pattern_for_number(&metadata.number_format, &national_significant_number)
        else {
            return Ok(national_significant_number);
        };
        // International style skips the national prefix formatting rule.
        Ok(self
            .format_nsn_using_pattern(
                &national_significant_number,
                formatting_pattern,
                PhoneNumberFormat::International,
            )
            .into_owned())
    }

    /// Formats a phone number in the specified format using client-defined
    /// formatting rules. Note that if the phone number has a country calling
    /// code of zero or an otherwise invalid country calling code, we cannot work
    /// out things like whether there should be a national prefix applied, or how
    /// to format extensions, so we return the national significant number with
    /// no formatting applied.
    ///
    /// The `$NP` and `$FG` placeholders of the rules are resolved against the
    /// numbering plan of the number.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> Result<String, FormatError> {
        let country_calling_code = phone_number.country_code();
        // Formatting information for regions which share a country calling code is
        // contained by only one region. For example, for NANPA regions it will be
        // contained in the metadata for US.
        let metadata = self.formatting_metadata(country_calling_code)?;
        let national_significant_number = Self::get_national_significant_number(phone_number);

        let mut formatted_number = match self
            .choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number)
        {
            Some(formatting_pattern) => {
                // Before we do a replacement of the national prefix pattern $NP with the
                // national prefix, we need to copy the rule so that subsequent replacements
                // for different numbers have the appropriate national prefix.
                let mut num_format_copy = formatting_pattern.clone();
                resolve_national_prefix_formatting_rule(&mut num_format_copy, metadata.national_prefix());
                self.format_nsn_using_pattern(&national_significant_number, &num_format_copy, number_format)
                    .into_owned()
            }
            None => national_significant_number,
        };
        if let Some(extension) = Self::get_formatted_extension(phone_number, metadata, number_format) {
            formatted_number.push_str(&extension);
        }
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        Ok(formatted_number)
    }

    /// Numbering plan holding the format rules of a calling code: the main
    /// country's for shared codes, the non-geographical entity's for codes
    /// like 800.
    fn formatting_metadata(&self, country_calling_code: i32) -> Result<&PhoneMetadata, FormatError> {
        let region_code = self.store.main_region_for_calling_code(country_calling_code);
        self.store
            .metadata_for_region_or_calling_code(country_calling_code, region_code)
            .ok_or(FormatError::UnknownCallingCode(country_calling_code))
    }

    fn format_nsn<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        match self.choose_formatting_pattern_for_number(available_formats, number) {
            Some(formatting_pattern) => {
                self.format_nsn_using_pattern(number, formatting_pattern, number_format)
            }
            None => {
                trace!("No format rule of {} matches '{}'", metadata.id(), number);
                Cow::Borrowed(number)
            }
        }
    }

    fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Option<&'b NumberFormat> {
        available_formats.iter().find(|format| {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            let leading_digits_match = format.leading_digits_pattern.last().is_none_or(|last| {
                self.get_regex(last)
                    .is_some_and(|regex| regex.matches_start(national_number))
            });
            leading_digits_match
                && self
                    .get_full_match_regex(format.pattern())
                    .is_some_and(|regex| regex.is_match(national_number))
        })
    }

    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        // Use the national prefix formatting rule instead.
        let national_prefix_formatting_rule = formatting_pattern.national_prefix_formatting_rule();
        if number_format == PhoneNumberFormat::National && !national_prefix_formatting_rule.is_empty() {
            // Apply the national_prefix_formatting_rule as the formatting_pattern
            // contains only information on how the national significant number
            // should be formatted at this point.
            let with_national_prefix = self
                .reg_exps
                .first_group_capturing_pattern
                .replace(formatting_pattern.format(), national_prefix_formatting_rule);
            number_format_rule = Cow::Owned(with_national_prefix.into_owned());
        }

        let Some(pattern_to_match) = self.get_full_match_regex(formatting_pattern.pattern()) else {
            return Cow::Borrowed(national_number);
        };
        let formatted_number = pattern_to_match
            .replace(national_number, number_format_rule.as_ref())
            .into_owned();

        if number_format != PhoneNumberFormat::RFC3966 {
            return Cow::Owned(formatted_number);
        }
        // First consume any leading punctuation, if any was present.
        let formatted_number = self
            .reg_exps
            .separator_pattern
            .consume_start(&formatted_number)
            .unwrap_or(formatted_number.as_str());
        // Then replace all separators with a "-".
        Cow::Owned(
            self.reg_exps
                .separator_pattern
                .replace_all(formatted_number, "-")
                .into_owned(),
        )
    }

    /// Returns the formatted extension of a phone number, if the phone number had an
    /// extension specified else None.
    fn get_formatted_extension(
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if !phone_number.has_extension() || phone_number.extension().is_empty() {
            return None;
        }

        let prefix = if number_format == PhoneNumberFormat::RFC3966 {
            RFC3966_EXTN_PREFIX
        } else if metadata.has_preferred_extn_prefix() {
            metadata.preferred_extn_prefix()
        } else {
            DEFAULT_EXTN_PREFIX
        };
        Some(fast_cat::concat_str!(prefix, phone_number.extension()))
    }
}
