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

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use crate::{
    interfaces::MatcherApi,
    phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    phonenumberutil::{
        NumberLengthType, PhoneNumberFormat, PhoneNumberType,
        errors::{MetadataLoadError, ValidationError},
        helper_constants::{
            DIGITS, OPTIONAL_EXT_SUFFIX, PLUS_SIGN, POSSIBLE_CHARS_AFTER_EXT_LABEL,
            POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
        },
    },
};

/// Parses numbering plans written in protobuf text format.
pub(super) fn load_metadata_from_text(text: &str) -> Result<PhoneMetadataCollection, MetadataLoadError> {
    protobuf::text_format::parse_from_str::<PhoneMetadataCollection>(text)
        .map_err(|err| MetadataLoadError::Malformed(format!("{:?}", err)))
}

/// Returns a pointer to the description inside the metadata of the appropriate
/// type.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        PhoneNumberType::Pager => &metadata.pager,
        PhoneNumberType::UAN => &metadata.uan,
        PhoneNumberType::VoiceMail => &metadata.voicemail,
        // Instead of the default case, we only match `Unknown`
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// A helper function that is used by Format and FormatByPattern.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    // we anyway allocate a new string in concatenation, so we'l do it once
    // with capacity of resulting string
    match number_format {
        PhoneNumberFormat::E164 => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, &formatted_number);
        }
        PhoneNumberFormat::International => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, " ", &formatted_number);
        }
        PhoneNumberFormat::RFC3966 => {
            *formatted_number = fast_cat::concat_str!(
                RFC3966_PREFIX,
                PLUS_SIGN,
                country_calling_code_str,
                "-",
                &formatted_number
            );
        }
        PhoneNumberFormat::National => {}
    }
}

/// Helper method for constructing regular expressions for parsing. Creates an
/// expression that captures up to max_length digits.
pub(super) fn extn_digits(max_length: u32) -> String {
    let mut buf = itoa::Buffer::new();
    let max_length_str = buf.format(max_length);
    fast_cat::concat_str!("([", DIGITS, "]{1,", max_length_str, "})")
}

// Helper initialiser method to create the regular-expression pattern to match
// extensions. Note that:
// - There are currently six capturing groups for the extension itself. If this
// number is changed, maybe_strip_extension needs to be updated.
// - The only capturing groups should be around the digits that you want to
// capture as part of the extension, or else parsing will fail!
pub(super) fn create_extn_pattern() -> String {
    // We cap the maximum length of an extension based on the ambiguity of the
    // way the extension is prefixed. As per ITU, the officially allowed
    // length for extensions is actually 40, but we don't support this since we
    // haven't seen real examples and this introduces many false interpretations
    // as the extension labels are not standardized.
    let ext_limit_after_explicit_label = 20;
    let ext_limit_after_likely_label = 15;
    let ext_limit_after_ambiguous_char = 9;
    let ext_limit_when_not_sure = 6;

    // Here the extension is called out in a more explicit way, i.e mentioning it
    // obvious patterns like "ext.".
    let explicit_ext_labels = "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|\u{0434}\u{043E}\u{0431}|anexo)";
    // One-character symbols that can be used to indicate an extension, and less
    // commonly used or more ambiguous extension labels.
    let ambiguous_ext_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54})";
    // When extension is not separated clearly.
    let ambiguous_separator = "[- ]+";

    let rfc_extn = fast_cat::concat_str!(
        RFC3966_EXTN_PREFIX,
        &extn_digits(ext_limit_after_explicit_label)
    );
    let explicit_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        explicit_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_explicit_label),
        OPTIONAL_EXT_SUFFIX
    );
    let ambiguous_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        ambiguous_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_ambiguous_char),
        OPTIONAL_EXT_SUFFIX
    );
    let american_style_extn_with_suffix = fast_cat::concat_str!(
        ambiguous_separator,
        &extn_digits(ext_limit_when_not_sure),
        "#"
    );

    // ",," is commonly used for auto dialling the extension when connected.
    // Semi-colon works in Iphone and also in Android to pop up a button with
    // the extension number following.
    let auto_dialling_and_ext_labels_found = "(?:,{2}|;)";
    // This is same as POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, but not
    // matching comma as extension label may have it.
    let possible_separators_number_ext_label_no_comma = "[ \u{00A0}\\t]*";

    let auto_dialling_extn = fast_cat::concat_str!(
        possible_separators_number_ext_label_no_comma,
        auto_dialling_and_ext_labels_found,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_likely_label),
        OPTIONAL_EXT_SUFFIX
    );
    let only_commas_extn = fast_cat::concat_str!(
        possible_separators_number_ext_label_no_comma,
        "(?:,)+",
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_ambiguous_char),
        OPTIONAL_EXT_SUFFIX
    );

    // The first regular expression covers RFC 3966 format, where the extension is
    // added using ";ext=". The second more generic where extension is mentioned
    // with explicit labels like "ext:". In both the above cases we allow more
    // numbers in extension than any other extension labels. The third one
    // captures when single character extension labels or less commonly used
    // labels are present. In such cases we capture fewer extension digits in
    // order to reduce the chance of falsely interpreting two numbers beside each
    // other as a number + extension. The fourth one covers the special case of
    // American numbers where the extension is written with a hash at the end,
    // such as "- 503#". The last two are the auto dialling forms.
    fast_cat::concat_str!(
        &rfc_extn,
        "|",
        &explicit_extn,
        "|",
        &ambiguous_extn,
        "|",
        &american_style_extn_with_suffix,
        "|",
        &auto_dialling_extn,
        "|",
        &only_commas_extn
    )
}

/// Normalizes a string of characters representing a phone number by replacing
/// all characters found in the accompanying map with the values therein, and
/// stripping all other characters if remove_non_matches is true.
///
/// Parameters:
/// * `normalization_replacements` - a mapping of characters to what they should be
///   replaced by in the normalized version of the phone number
/// * `remove_non_matches` - indicates whether characters that are not able to be
///   replaced should be stripped from the number. If this is false, they will be
///   left unchanged in the number.
/// * `phone_number` - a string of characters representing a phone number to
///   be normalized.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &str,
) -> String {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) = normalization_replacements.get(&phone_char.to_ascii_uppercase()) {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // If neither of the above are true, we remove this character.
    }
    normalized_number
}

/// Returns `true` if there is any data set for a particular PhoneNumberDesc.
pub(super) fn desc_has_data(desc: &PhoneNumberDesc) -> bool {
    desc.has_example_number() || !desc.national_number_pattern().is_empty()
}

/// Returns the types we have metadata for based on the PhoneMetadata object
/// passed in.
pub(super) fn get_supported_types_for_metadata(metadata: &PhoneMetadata) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        // Never return FIXED_LINE_OR_MOBILE (it is a convenience type, and
        // represents that a particular number type can't be
        // determined) or UNKNOWN (the non-type).
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| desc_has_data(get_number_desc_by_type(metadata, *number_type)))
        .collect()
}

/// Smallest and largest length of the general description, local-only
/// lengths included. `None` when the description lists no lengths.
pub(super) fn general_length_range(metadata: &PhoneMetadata) -> Option<(i32, i32)> {
    let general_desc = &metadata.general_desc;
    let lengths = general_desc
        .possible_length
        .iter()
        .chain(general_desc.possible_length_local_only.iter());
    let min = lengths.clone().min()?;
    let max = lengths.max()?;
    Some((*min, *max))
}

/// Helper method to check a number against possible lengths for this number
/// type, and determine whether it matches, or is too short or too long.
pub(super) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<NumberLengthType, ValidationError> {
    if phone_number_type == PhoneNumberType::Unknown {
        return test_number_length_with_unknown_type(phone_number, phone_metadata);
    }
    let desc_for_type = get_number_desc_by_type(phone_metadata, phone_number_type);
    if !desc_has_data(desc_for_type) && phone_number_type != PhoneNumberType::FixedLineOrMobile {
        // No numbers of this type exist in the region.
        return Err(ValidationError::InvalidLength);
    }
    // Where a sub-description has the same lengths as the general description
    // they are left out, so we fall back to the general desc.
    let lengths_of = |desc: &PhoneNumberDesc| {
        if desc.possible_length.is_empty() {
            phone_metadata.general_desc.possible_length.clone()
        } else {
            desc.possible_length.clone()
        }
    };

    let mut possible_lengths = lengths_of(desc_for_type);
    let mut local_lengths = desc_for_type.possible_length_local_only.clone();
    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        let fixed_line_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::FixedLine);
        let mobile_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::Mobile);
        if !desc_has_data(fixed_line_desc) {
            // The rare case has been encountered where no fixedLine data is available
            // (true for some non-geographical entities), so we just check mobile.
            return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
        }
        if desc_has_data(mobile_desc) {
            possible_lengths.extend(lengths_of(mobile_desc));
            local_lengths.extend_from_slice(&mobile_desc.possible_length_local_only);
        }
    }
    possible_lengths.sort_unstable();
    possible_lengths.dedup();

    let actual_length = phone_number.len() as i32;
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }
    let (Some(minimum_length), Some(maximum_length)) =
        (possible_lengths.first(), possible_lengths.last())
    else {
        return Err(ValidationError::InvalidLength);
    };

    if *minimum_length > actual_length {
        Err(ValidationError::TooShort)
    } else if *maximum_length < actual_length {
        Err(ValidationError::TooLong)
    } else if possible_lengths.contains(&actual_length) {
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(ValidationError::InvalidLength)
    }
}

/// Checks a number against the general length range of the region. Any length
/// between the shortest and the longest known length counts as possible.
pub(super) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<NumberLengthType, ValidationError> {
    let Some((minimum_length, maximum_length)) = general_length_range(phone_metadata) else {
        return Err(ValidationError::InvalidLength);
    };
    let actual_length = phone_number.len() as i32;
    if actual_length < minimum_length {
        return Err(ValidationError::TooShort);
    }
    if actual_length > maximum_length {
        return Err(ValidationError::TooLong);
    }
    if phone_metadata.general_desc.possible_length_local_only.contains(&actual_length) {
        Ok(NumberLengthType::IsPossibleLocalOnly)
    } else {
        Ok(NumberLengthType::IsPossible)
    }
}

/// Determines whether the given number is a national number match for the given
/// PhoneNumberDesc. Does not check against possible lengths!
pub(super) fn is_match(
    matcher_api: &dyn MatcherApi,
    number: &str,
    number_desc: &PhoneNumberDesc,
) -> bool {
    matcher_api.match_national_number(number, number_desc, false)
}
