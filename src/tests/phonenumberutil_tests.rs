use protobuf::Message;

use crate::{
    enums::{NumberLengthType, PhoneNumberFormat, PhoneNumberType},
    errors::{
        ExtractNumberError, FormatError, MetadataLoadError, NotANumberError, ParseError,
        UnknownRegionError, ValidationError,
    },
    phonemetadata::{NumberFormat, PhoneMetadataCollection},
    phonenumber::{PhoneNumber, phone_number::CountryCodeSource},
    PhoneNumberUtil, ValidationOutcome,
};

use super::region_code::RegionCode;

static ONCE: std::sync::Once = std::sync::Once::new();

fn get_phone_util() -> PhoneNumberUtil {
    ONCE.call_once(|| colog::default_builder()
        .filter_level(log::LevelFilter::Trace)
        .init()
    );
    PhoneNumberUtil::new().expect("Metadata should be valid")
}

fn number(country_code: i32, national_number: u64) -> PhoneNumber {
    let mut number = PhoneNumber::new();
    number.set_country_code(country_code);
    number.set_national_number(national_number);
    number
}

fn it_number(national_number: u64) -> PhoneNumber {
    let mut number = number(39, national_number);
    number.set_italian_leading_zero(true);
    number
}

#[test]
fn interchange_invalid_codepoints() {
    let phone_util = get_phone_util();

    let valid_inputs = vec![
        "+44\u{2013}2087654321", // U+2013, EN DASH
    ];
    for input in valid_inputs {
        assert_eq!(input, dec_from_char::normalize_decimals(input));
        assert!(phone_util.is_viable_phone_number(input));
        phone_util.parse(input, Some(RegionCode::gb())).unwrap();
    }

    let invalid_inputs = vec![
        "+44\u{96}2087654321",     // Invalid sequence
        "+44\u{0096}2087654321", // U+0096
        "+44\u{fffe}2087654321", // U+FFFE
    ];
    for input in invalid_inputs {
        assert!(!phone_util.is_viable_phone_number(input));
        assert!(
            phone_util.parse(input, Some(RegionCode::gb())).is_err_and(|err| matches!(err, ParseError::NotANumber(_)))
        );
    }
}

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert!(regions.contains(&RegionCode::us()));
    assert!(regions.contains(&RegionCode::ng()));
    assert!(!regions.contains(&RegionCode::un001()));
    assert!(regions.is_sorted());

    let store = phone_util.metadata_store();
    assert!(store.is_valid_region(RegionCode::fr()));
    assert!(store.is_valid_region(RegionCode::ma()));
    assert!(!store.is_valid_region(RegionCode::un001()));
    assert!(!store.is_valid_region(RegionCode::zz()));
}

#[test]
fn get_supported_global_network_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_global_network_calling_codes();
    assert!(!calling_codes.is_empty());
    for &code in &calling_codes {
        assert!(code > 0);
        let region_code = phone_util.get_region_code_for_country_code(code);
        assert_eq!(RegionCode::un001(), region_code);
    }
}

#[test]
fn get_supported_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_calling_codes();
    assert!(!calling_codes.is_empty());
    for &code in &calling_codes {
        assert!(code > 0);
        let region_code = phone_util.get_region_code_for_country_code(code);
        assert_ne!(RegionCode::zz(), region_code);
    }
    let supported_global_network_calling_codes = phone_util.get_supported_global_network_calling_codes();
    assert!(calling_codes.len() > supported_global_network_calling_codes.len());
    assert!(calling_codes.contains(&800));
    assert!(calling_codes.contains(&234));
}

#[test]
fn get_supported_types_for_region() {
    let phone_util = get_phone_util();
    let types = phone_util
        .get_supported_types_for_region(RegionCode::us())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::FixedLine));
    assert!(types.contains(&PhoneNumberType::Mobile));
    assert!(types.contains(&PhoneNumberType::TollFree));
    assert!(!types.contains(&PhoneNumberType::VoIP));
    assert!(!types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!types.contains(&PhoneNumberType::Unknown));

    let types = phone_util
        .get_supported_types_for_region(RegionCode::gb())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::Pager));
    assert!(types.contains(&PhoneNumberType::UAN));

    assert!(
        phone_util
        .get_supported_types_for_region(RegionCode::zz())
        .is_none()
    );
}

#[test]
fn get_supported_types_for_non_geo_entity() {
    let phone_util = get_phone_util();
    let types = phone_util.get_supported_types_for_non_geo_entity(999);
    assert!(types.is_none());

    let types = phone_util
        .get_supported_types_for_non_geo_entity(800)
        .expect("Code should exist");
    assert!(types.contains(&PhoneNumberType::TollFree));
    assert!(!types.contains(&PhoneNumberType::Mobile));
    assert!(!types.contains(&PhoneNumberType::Unknown));
}

#[test]
fn get_region_codes_for_country_calling_code() {
    let phone_util = get_phone_util();

    let regions = phone_util.get_region_codes_for_country_calling_code(1);
    assert_eq!(RegionCode::us(), regions[0], "main country goes first");
    assert!(regions.iter().any(|region| region == RegionCode::bs()));

    let regions = phone_util.get_region_codes_for_country_calling_code(7);
    assert_eq!(vec![RegionCode::ru(), RegionCode::kz()], regions);

    let regions = phone_util.get_region_codes_for_country_calling_code(800);
    assert_eq!(vec![RegionCode::un001()], regions);

    const INVALID_COUNTRY_CODE: i32 = 2;
    assert!(
        phone_util
            .get_region_codes_for_country_calling_code(INVALID_COUNTRY_CODE)
            .is_empty()
    );
}

#[test]
fn get_country_code_for_region() {
    let phone_util = get_phone_util();
    assert_eq!(Ok(1), phone_util.get_country_code_for_region(RegionCode::us()));
    assert_eq!(Ok(234), phone_util.get_country_code_for_region(RegionCode::ng()));
    assert_eq!(
        Err(UnknownRegionError(RegionCode::zz().to_owned())),
        phone_util.get_country_code_for_region(RegionCode::zz())
    );
}

#[test]
fn load_normalizes_national_prefix_rules() {
    let phone_util = get_phone_util();
    let store = phone_util.metadata_store();

    let gb = store.lookup(RegionCode::gb()).unwrap();
    // GB declares the rule once for the region, every format inherits it.
    assert!(gb.number_format.iter().all(|format| format.national_prefix_formatting_rule() == "0$1"));

    let ru = store.lookup(RegionCode::ru()).unwrap();
    assert_eq!("8 ($1)", ru.number_format[0].national_prefix_formatting_rule());
    assert_eq!("8", ru.national_prefix_for_parsing());

    let us = store.lookup(RegionCode::us()).unwrap();
    assert!(us.same_mobile_and_fixed_line_pattern());
    assert!(!store.lookup(RegionCode::gb()).unwrap().same_mobile_and_fixed_line_pattern());

    // Longest first, so "00" never shadows "000" or "009".
    assert_eq!(
        vec!["000", "009", "011", "810", "00"],
        store.international_prefixes()
    );
}

#[test]
fn load_rejects_broken_metadata() {
    let err = PhoneNumberUtil::new_for_metadata_text("metadata { id: ").err().unwrap();
    assert!(matches!(err, MetadataLoadError::Malformed(_)));

    let err = PhoneNumberUtil::new_for_metadata_text(
        r#"metadata {
            id: "XX"
            country_code: 99
            general_desc { national_number_pattern: "[" possible_length: 5 }
        }"#,
    )
    .err()
    .unwrap();
    assert!(matches!(err, MetadataLoadError::InvalidRegex(_)));
}

#[test]
fn load_from_collection() {
    let phone_util = get_phone_util();
    let mut collection = PhoneMetadataCollection::new();
    collection.metadata.push(phone_util.metadata_store().lookup(RegionCode::ng()).unwrap().clone());
    let bytes = collection.write_to_bytes().unwrap();

    let ng_only = PhoneNumberUtil::new_for_metadata(
        PhoneMetadataCollection::parse_from_bytes(&bytes).unwrap()
    ).unwrap();
    assert_eq!(vec![RegionCode::ng()], ng_only.get_supported_regions());
    let number = ng_only.parse("0803 123 4567", Some(RegionCode::ng())).unwrap();
    assert!(ng_only.is_valid_number(&number));
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        ng_only.parse("+1 202-555-0178", None)
    );
}

#[test]
fn get_national_significant_number() {
    assert_eq!("2025550178", PhoneNumberUtil::get_national_significant_number(&number(1, 2025550178)));
    assert_eq!("312345678", PhoneNumberUtil::get_national_significant_number(&number(39, 312345678)));
    assert_eq!("0236618300", PhoneNumberUtil::get_national_significant_number(&it_number(236618300)));
    assert_eq!("12345678", PhoneNumberUtil::get_national_significant_number(&number(800, 12345678)));
}

#[test]
fn get_national_significant_number_many_leading_zeros() {
    let mut number = number(1, 650);
    number.set_italian_leading_zero(true);
    number.set_number_of_leading_zeros(2);
    assert_eq!("00650", PhoneNumberUtil::get_national_significant_number(&number));

    // Set a bad value; we shouldn't crash, we shouldn't output any leading zeros
    // at all.
    number.set_number_of_leading_zeros(-3);
    assert_eq!("650", PhoneNumberUtil::get_national_significant_number(&number));
}

#[test]
fn get_region_code_for_number() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_number(&number(1, 2025550178)));
    assert_eq!(RegionCode::bs(), phone_util.get_region_code_for_number(&number(1, 2423591234)));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_number(&number(44, 2087654321)));
    assert_eq!(RegionCode::kz(), phone_util.get_region_code_for_number(&number(7, 7710009998)));
    assert_eq!(RegionCode::un001(), phone_util.get_region_code_for_number(&number(800, 12345678)));
    // Nobody sharing +1 accepts it.
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&number(1, 1234567890)));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&number(999, 1234567)));
}

#[test]
fn get_number_type() {
    let phone_util = get_phone_util();
    let cases = [
        (number(1, 2025550178), PhoneNumberType::FixedLineOrMobile),
        (number(1, 8002345678), PhoneNumberType::TollFree),
        (number(1, 9002345678), PhoneNumberType::PremiumRate),
        (number(1, 5002345678), PhoneNumberType::PersonalNumber),
        (number(1, 2423456789), PhoneNumberType::FixedLine),
        (number(1, 2425912345), PhoneNumberType::Mobile),
        (number(44, 2087654321), PhoneNumberType::FixedLine),
        (number(44, 7400123456), PhoneNumberType::Mobile),
        (number(44, 7646412345), PhoneNumberType::Pager),
        (number(44, 8001234567), PhoneNumberType::TollFree),
        (number(44, 9012345678), PhoneNumberType::PremiumRate),
        (number(44, 8431234567), PhoneNumberType::SharedCost),
        (number(44, 7012345678), PhoneNumberType::PersonalNumber),
        (number(44, 5612345678), PhoneNumberType::VoIP),
        (number(44, 3012345678), PhoneNumberType::UAN),
        (number(33, 912345678), PhoneNumberType::VoIP),
        (number(49, 15123456789), PhoneNumberType::Mobile),
        (number(49, 30123456), PhoneNumberType::FixedLine),
        (it_number(212345678), PhoneNumberType::FixedLine),
        (number(39, 3123456789), PhoneNumberType::Mobile),
        (number(7, 9123456789), PhoneNumberType::Mobile),
        (number(7, 7710009998), PhoneNumberType::Mobile),
        (number(212, 650123456), PhoneNumberType::Mobile),
        (number(234, 8031234567), PhoneNumberType::Mobile),
        (number(234, 12345678), PhoneNumberType::FixedLine),
        (number(254, 712123456), PhoneNumberType::Mobile),
        (number(800, 12345678), PhoneNumberType::TollFree),
        (number(1, 1234567890), PhoneNumberType::Unknown),
        (number(44, 4412345678), PhoneNumberType::Unknown),
    ];
    for (phone_number, expected) in cases {
        assert_eq!(expected, phone_util.get_number_type(&phone_number), "{:?}", phone_number);
    }
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_number(&number(1, 2025550178)));
    assert!(phone_util.is_valid_number(&it_number(236618300)));
    assert!(phone_util.is_valid_number(&number(44, 7400123456)));
    assert!(phone_util.is_valid_number(&number(49, 15123456789)));
    assert!(phone_util.is_valid_number(&number(800, 12345678)));
}

#[test]
fn is_not_valid_number() {
    let phone_util = get_phone_util();
    assert!(!phone_util.is_valid_number(&number(1, 2530000)));
    assert!(!phone_util.is_valid_number(&number(44, 791234567)));
    assert!(!phone_util.is_valid_number(&number(49, 1234)));
    assert!(!phone_util.is_valid_number(&number(234, 1234567890)));
    assert!(!phone_util.is_valid_number(&number(3923, 2366)));
    assert!(!phone_util.is_valid_number(&number(0, 2366)));
    assert!(!phone_util.is_valid_number(&number(800, 123456789)));
}

#[test]
fn is_valid_for_region() {
    let phone_util = get_phone_util();
    // This number is valid for the Bahamas, but is not a valid US number.
    let bs_number = number(1, 2423232345);
    assert!(phone_util.is_valid_number(&bs_number));
    assert!(phone_util.is_valid_number_for_region(&bs_number, RegionCode::bs()));
    assert!(!phone_util.is_valid_number_for_region(&bs_number, RegionCode::us()));

    let us_number = number(1, 2025550178);
    assert!(phone_util.is_valid_number_for_region(&us_number, RegionCode::us()));
    assert!(!phone_util.is_valid_number_for_region(&us_number, RegionCode::gb()));
    assert!(!phone_util.is_valid_number_for_region(&us_number, RegionCode::zz()));

    let toll_free = number(800, 12345678);
    assert!(phone_util.is_valid_number_for_region(&toll_free, RegionCode::un001()));
    assert!(!phone_util.is_valid_number_for_region(&toll_free, RegionCode::us()));
}

#[test]
fn is_possible_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number(&number(1, 2025550178)));
    assert!(phone_util.is_possible_number(&number(1, 2530000)));
    assert!(phone_util.is_possible_number(&number(44, 2087654321)));
    // Every length between the shortest and longest of the region counts.
    assert!(phone_util.is_possible_number(&number(1, 25300001)));
    assert!(!phone_util.is_possible_number(&number(1, 253000)));
    assert!(!phone_util.is_possible_number(&number(44, 20876543210)));
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();
    let mut number = number(1, 2025550178);
    assert_eq!(Ok(NumberLengthType::IsPossible), phone_util.is_possible_number_with_reason(&number));

    number.set_national_number(2530000);
    assert_eq!(Ok(NumberLengthType::IsPossibleLocalOnly), phone_util.is_possible_number_with_reason(&number));

    number.set_country_code(0);
    assert_eq!(Err(ValidationError::InvalidCountryCode), phone_util.is_possible_number_with_reason(&number));

    number.set_country_code(1);
    number.set_national_number(253000);
    assert_eq!(Err(ValidationError::TooShort), phone_util.is_possible_number_with_reason(&number));

    number.set_national_number(65025300000);
    assert_eq!(Err(ValidationError::TooLong), phone_util.is_possible_number_with_reason(&number));
}

#[test]
fn is_possible_number_for_type() {
    let phone_util = get_phone_util();
    let gb_mobile = number(44, 7400123456);
    assert!(phone_util.is_possible_number_for_type(&gb_mobile, PhoneNumberType::Mobile));
    assert!(phone_util.is_possible_number_for_type(&gb_mobile, PhoneNumberType::FixedLineOrMobile));

    // Mobile numbers in GB are never nine digits long.
    let short = number(44, 740012345);
    assert!(phone_util.is_possible_number_for_type(&short, PhoneNumberType::FixedLine));
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_for_type_with_reason(&short, PhoneNumberType::Mobile)
    );

    // No voicemail numbers exist in the US.
    assert_eq!(
        Err(ValidationError::InvalidLength),
        phone_util.is_possible_number_for_type_with_reason(&number(1, 2025550178), PhoneNumberType::VoiceMail)
    );
    // Types without own lengths fall back to the general ones.
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_for_type_with_reason(&number(1, 8002345678), PhoneNumberType::TollFree)
    );
}

#[test]
fn validity_implies_possibility() {
    let phone_util = get_phone_util();
    let store = phone_util.metadata_store();
    for region in phone_util.get_supported_regions() {
        let metadata = store.lookup(region).unwrap();
        for desc in [&metadata.fixed_line, &metadata.mobile, &metadata.toll_free, &metadata.premium_rate] {
            if !desc.has_example_number() {
                continue;
            }
            let phone_number = phone_util.parse(desc.example_number(), Some(region)).unwrap();
            if phone_util.is_valid_number(&phone_number) {
                assert!(phone_util.is_possible_number(&phone_number), "{} {}", region, desc.example_number());
            }
        }
    }
}

#[test]
fn validation_outcome() {
    let phone_util = get_phone_util();
    assert_eq!(
        ValidationOutcome {
            is_possible: true,
            is_valid: true,
            number_type: PhoneNumberType::FixedLineOrMobile,
            resolved_region: Some(RegionCode::us().to_owned()),
        },
        phone_util.validation_outcome(&number(1, 2025550178))
    );
    assert_eq!(
        ValidationOutcome {
            is_possible: true,
            is_valid: false,
            number_type: PhoneNumberType::Unknown,
            resolved_region: None,
        },
        phone_util.validation_outcome(&number(1, 1234567890))
    );
}

#[test]
fn is_viable_phone_number() {
    let phone_util = get_phone_util();
    assert!(!phone_util.is_viable_phone_number("1"));
    assert!(phone_util.is_viable_phone_number("12"));
    assert!(phone_util.is_viable_phone_number("+1 202 555 0178"));
    assert!(phone_util.is_viable_phone_number("0800-4-PIZZA"));
    assert!(phone_util.is_viable_phone_number("\u{FF11}\u{FF12}\u{FF13}"));
    assert!(!phone_util.is_viable_phone_number("abc"));
    assert!(!phone_util.is_viable_phone_number("1+1+1"));
}

#[test]
fn extract_possible_number() {
    let phone_util = get_phone_util();
    // Removes preceding funky punctuation and letters but leaves the rest
    // untouched.
    assert_eq!(Ok("0800-345-600"), phone_util.extract_possible_number("Tel:0800-345-600"));
    assert_eq!(Ok("0800 FOR PIZZA"), phone_util.extract_possible_number("Tel:0800 FOR PIZZA"));
    // Should not remove plus sign
    assert_eq!(Ok("+800-345-600"), phone_util.extract_possible_number("Tel:+800-345-600"));
    // Should recognise wide digits as possible start values.
    assert_eq!(Ok("\u{FF10}\u{FF12}\u{FF13}"), phone_util.extract_possible_number("\u{FF10}\u{FF12}\u{FF13}"));
    // Removes trailing characters.
    assert_eq!(Ok("0800 345 600"), phone_util.extract_possible_number("(0800 345 600)."));
    // A second number is cut off.
    assert_eq!(
        Ok("530) 583-6985 x302"),
        phone_util.extract_possible_number("(530) 583-6985 x302/x2303")
    );
    assert_eq!(
        Err(ExtractNumberError::NoValidStartCharacter),
        phone_util.extract_possible_number("Num-(....)")
    );
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let us_number = number(1, 2025550178);
    assert_eq!(Ok(us_number.clone()), phone_util.parse("202-555-0178", Some(RegionCode::us())));
    assert_eq!(Ok(us_number.clone()), phone_util.parse("(202) 555-0178", Some(RegionCode::us())));
    // National prefix is stripped.
    assert_eq!(Ok(us_number.clone()), phone_util.parse("1 (202) 555-0178", Some(RegionCode::us())));

    let parsed = phone_util.parse("202-555-0178", Some(RegionCode::us())).unwrap();
    assert!(!parsed.has_country_code_source());
    assert!(!parsed.has_raw_input());

    assert_eq!(Ok(number(44, 2087654321)), phone_util.parse("020 8765 4321", Some(RegionCode::gb())));
    assert_eq!(Ok(number(44, 7400123456)), phone_util.parse("07400 123456", Some(RegionCode::gb())));
    assert_eq!(Ok(number(234, 8031234567)), phone_util.parse("0803 123 4567", Some(RegionCode::ng())));
    assert_eq!(Ok(number(7, 9123456789)), phone_util.parse("8 912 345-67-89", Some(RegionCode::ru())));
    assert_eq!(Ok(number(49, 30123456)), phone_util.parse("030 123456", Some(RegionCode::de())));
    assert_eq!(Ok(number(254, 712123456)), phone_util.parse("0712 123456", Some(RegionCode::ke())));
    // Italy has no national prefix, leading zeros belong to the number.
    assert_eq!(Ok(it_number(212345678)), phone_util.parse("02 1234 5678", Some(RegionCode::it())));
}

#[test]
fn parse_keeps_national_prefix_when_stripping_breaks_the_number() {
    let phone_util = get_phone_util();
    // Stripping the leading 8 would leave a number no Russian pattern knows.
    assert_eq!(Ok(number(7, 8123456789)), phone_util.parse("812 345 67 89", Some(RegionCode::ru())));
}

#[test]
fn parse_number_with_international_prefix() {
    let phone_util = get_phone_util();
    let gb_number = number(44, 2087654321);
    assert_eq!(Ok(gb_number.clone()), phone_util.parse("+44 20 8765 4321", None));
    assert_eq!(Ok(gb_number.clone()), phone_util.parse("+44 20 8765 4321", Some(RegionCode::us())));
    assert_eq!(Ok(gb_number.clone()), phone_util.parse("011 44 20 8765 4321", Some(RegionCode::us())));
    assert_eq!(Ok(gb_number.clone()), phone_util.parse("00 44 20 8765 4321", Some(RegionCode::de())));
    // Without default region every known IDD is tried.
    assert_eq!(Ok(gb_number.clone()), phone_util.parse("0044 20 8765 4321", None));
    assert_eq!(Ok(gb_number.clone()), phone_util.parse("011 44 20 8765 4321", None));
    // The region's calling code written without plus sign.
    assert_eq!(Ok(number(1, 2025550178)), phone_util.parse("1 202 555 0178", Some(RegionCode::us())));
    // An unknown default region does not matter when the calling code is given.
    assert_eq!(Ok(gb_number), phone_util.parse("+44 20 8765 4321", Some(RegionCode::zz())));
    assert_eq!(Ok(number(800, 12345678)), phone_util.parse("+800 1234 5678", None));
}

#[test]
fn parse_non_ascii_digits() {
    let phone_util = get_phone_util();
    let gb_number = number(44, 2087654321);
    assert_eq!(
        Ok(gb_number.clone()),
        phone_util.parse("\u{FF0B}\u{FF14}\u{FF14} \u{FF12}\u{FF10} \u{FF18}\u{FF17}\u{FF16}\u{FF15} \u{FF14}\u{FF13}\u{FF12}\u{FF11}", None)
    );
    // Arabic-Indic digits.
    assert_eq!(
        Ok(gb_number),
        phone_util.parse("\u{0660}\u{0662}\u{0660} \u{0668}\u{0667}\u{0666}\u{0665} \u{0664}\u{0663}\u{0662}\u{0661}", Some(RegionCode::gb()))
    );
}

#[test]
fn parse_vanity_number() {
    let phone_util = get_phone_util();
    assert_eq!(Ok(number(1, 8003569377)), phone_util.parse("1-800-FLOWERS", Some(RegionCode::us())));
    assert_eq!(Ok(number(1, 8003569377)), phone_util.parse("+1 800 flowers", None));
}

#[test]
fn parse_extensions() {
    let phone_util = get_phone_util();
    let mut us_number = number(1, 2025550178);
    us_number.set_extension("1234".to_owned());

    assert_eq!(Ok(us_number.clone()), phone_util.parse("202-555-0178 ext. 1234", Some(RegionCode::us())));
    assert_eq!(Ok(us_number.clone()), phone_util.parse("202-555-0178 x1234", Some(RegionCode::us())));
    assert_eq!(Ok(us_number.clone()), phone_util.parse("+1 202-555-0178 extension 1234", None));
    assert_eq!(Ok(us_number.clone()), phone_util.parse("tel:+1-202-555-0178;ext=1234", None));

    let mut first_of_two = number(1, 5305836985);
    first_of_two.set_extension("302".to_owned());
    assert_eq!(Ok(first_of_two), phone_util.parse("(530) 583-6985 x302/x2303", Some(RegionCode::us())));
}

#[test]
fn parse_rfc3966() {
    let phone_util = get_phone_util();
    let us_number = number(1, 2025550178);
    assert_eq!(Ok(us_number.clone()), phone_util.parse("tel:+1-202-555-0178", None));
    assert_eq!(Ok(us_number.clone()), phone_util.parse("tel:202-555-0178;phone-context=+1", None));
    assert_eq!(
        Ok(us_number.clone()),
        phone_util.parse("tel:202-555-0178;phone-context=example.com", Some(RegionCode::us()))
    );
    assert_eq!(Ok(us_number), phone_util.parse("tel:+1-202-555-0178;isub=12345", None));

    for context in ["", "+", "1-202", "example..com"] {
        let input = format!("tel:202-555-0178;phone-context={}", context);
        assert_eq!(
            Err(ParseError::NotANumber(NotANumberError::InvalidPhoneContext)),
            phone_util.parse(&input, Some(RegionCode::us())),
            "{}",
            input
        );
    }
}

#[test]
fn parse_and_keep_raw_input() {
    let phone_util = get_phone_util();
    let cases = [
        ("+44 20 8765 4321", None, CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN),
        ("011 44 20 8765 4321", Some(RegionCode::us()), CountryCodeSource::FROM_NUMBER_WITH_IDD),
        ("44 20 8765 4321", Some(RegionCode::gb()), CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN),
        ("020 8765 4321", Some(RegionCode::gb()), CountryCodeSource::FROM_DEFAULT_COUNTRY),
    ];
    for (input, region, source) in cases {
        let parsed = phone_util.parse_and_keep_raw_input(input, region).unwrap();
        assert_eq!(44, parsed.country_code());
        assert_eq!(2087654321, parsed.national_number());
        assert_eq!(input, parsed.raw_input());
        assert_eq!(source, parsed.country_code_source(), "{}", input);
    }
}

#[test]
fn failed_parse_on_invalid_numbers() {
    let phone_util = get_phone_util();
    assert_eq!(
        Err(ParseError::NotANumber(NotANumberError::FailedToExtractNumber(ExtractNumberError::NoValidStartCharacter))),
        phone_util.parse("This is not a phone number", Some(RegionCode::us()))
    );
    assert!(matches!(
        phone_util.parse("1 + 1", Some(RegionCode::us())),
        Err(ParseError::NotANumber(_))
    ));
    assert_eq!(
        Err(ParseError::NotANumber(NotANumberError::InputTooLong)),
        phone_util.parse(&"1".repeat(251), Some(RegionCode::us()))
    );
    assert_eq!(Err(ParseError::MissingRegion), phone_util.parse("202-555-0178", None));
    assert_eq!(Err(ParseError::MissingRegion), phone_util.parse("202-555-0178", Some("")));
    assert_eq!(
        Err(ParseError::UnknownRegion(UnknownRegionError("XX".to_owned()))),
        phone_util.parse("202-555-0178", Some("XX"))
    );
    assert_eq!(Err(ParseError::InvalidCountryCode), phone_util.parse("+999 123 4567", None));
    assert_eq!(Err(ParseError::TooShortAfterIdd), phone_util.parse("011 12", Some(RegionCode::us())));
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("123", Some(RegionCode::us())));
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("+44 12", None));
    assert_eq!(Err(ParseError::TooLongNsn), phone_util.parse("+1 2025550178 123456789", None));
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let test_number = number(1, 2025550178);
    assert_eq!(Ok("(202) 555-0178".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+1 202-555-0178".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::International));
    assert_eq!(Ok("+12025550178".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::E164));
    assert_eq!(Ok("tel:+1-202-555-0178".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::RFC3966));

    // Bahamas numbers use the rules of the main country.
    let bs_number = number(1, 2423591234);
    assert_eq!(Ok("+1 242-359-1234".to_owned()), phone_util.format(&bs_number, PhoneNumberFormat::International));
}

#[test]
fn format_gb_number() {
    let phone_util = get_phone_util();
    let mut test_number = number(44, 2087654321);
    assert_eq!(Ok("020 8765 4321".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+44 20 8765 4321".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::International));
    assert_eq!(Ok("tel:+44-20-8765-4321".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::RFC3966));

    test_number.set_national_number(7400123456);
    assert_eq!(Ok("07400 123456".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+44 7400 123456".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::International));
}

#[test]
fn format_with_national_prefix_rule() {
    let phone_util = get_phone_util();
    let ru_number = number(7, 9123456789);
    assert_eq!(Ok("8 (912) 345-67-89".to_owned()), phone_util.format(&ru_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+7 912 345-67-89".to_owned()), phone_util.format(&ru_number, PhoneNumberFormat::International));
    assert_eq!(Ok("tel:+7-912-345-67-89".to_owned()), phone_util.format(&ru_number, PhoneNumberFormat::RFC3966));

    let ng_number = number(234, 8031234567);
    assert_eq!(Ok("0803 123 4567".to_owned()), phone_util.format(&ng_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+234 803 123 4567".to_owned()), phone_util.format(&ng_number, PhoneNumberFormat::International));

    let fr_number = number(33, 123456789);
    assert_eq!(Ok("01 23 45 67 89".to_owned()), phone_util.format(&fr_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+33 1 23 45 67 89".to_owned()), phone_util.format(&fr_number, PhoneNumberFormat::International));
}

#[test]
fn format_it_number() {
    let phone_util = get_phone_util();
    let test_number = it_number(212345678);
    assert_eq!(Ok("02 1234 5678".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+39 02 1234 5678".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::International));
    assert_eq!(Ok("+390212345678".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::E164));
}

#[test]
fn format_de_number() {
    let phone_util = get_phone_util();
    assert_eq!(Ok("030 123456".to_owned()), phone_util.format(&number(49, 30123456), PhoneNumberFormat::National));
    assert_eq!(Ok("+49 151 23456789".to_owned()), phone_util.format(&number(49, 15123456789), PhoneNumberFormat::International));
}

#[test]
fn format_non_geographical_number() {
    let phone_util = get_phone_util();
    let test_number = number(800, 12345678);
    assert_eq!(Ok("+800 1234 5678".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::International));
    assert_eq!(Ok("+80012345678".to_owned()), phone_util.format(&test_number, PhoneNumberFormat::E164));
}

#[test]
fn format_without_matching_rule() {
    let phone_util = get_phone_util();
    // Kazakh numbers are formatted with the Russian rules, none of which fits.
    let kz_number = number(7, 7710009998);
    assert_eq!(Ok("7710009998".to_owned()), phone_util.format(&kz_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+7 7710009998".to_owned()), phone_util.format(&kz_number, PhoneNumberFormat::International));
}

#[test]
fn format_number_with_extension() {
    let phone_util = get_phone_util();
    let mut gb_number = number(44, 7400123456);
    gb_number.set_extension("1234".to_owned());
    assert_eq!(Ok("07400 123456 ext. 1234".to_owned()), phone_util.format(&gb_number, PhoneNumberFormat::National));
    assert_eq!(Ok("+44 7400 123456 ext. 1234".to_owned()), phone_util.format(&gb_number, PhoneNumberFormat::International));
    assert_eq!(Ok("tel:+44-7400-123456;ext=1234".to_owned()), phone_util.format(&gb_number, PhoneNumberFormat::RFC3966));
    // Extensions are not part of E164.
    assert_eq!(Ok("+447400123456".to_owned()), phone_util.format(&gb_number, PhoneNumberFormat::E164));
}

#[test]
fn format_unknown_calling_code() {
    let phone_util = get_phone_util();
    let unknown = number(999, 1234567);
    for number_format in [
        PhoneNumberFormat::E164,
        PhoneNumberFormat::International,
        PhoneNumberFormat::National,
        PhoneNumberFormat::RFC3966,
    ] {
        assert_eq!(Err(FormatError::UnknownCallingCode(999)), phone_util.format(&unknown, number_format));
    }
}

#[test]
fn format_national_significant_number() {
    let phone_util = get_phone_util();
    assert_eq!(Ok("20 8765 4321".to_owned()), phone_util.format_national_significant_number(&number(44, 2087654321)));
    assert_eq!(Ok("912 345-67-89".to_owned()), phone_util.format_national_significant_number(&number(7, 9123456789)));
    assert_eq!(
        Err(FormatError::UnknownCallingCode(999)),
        phone_util.format_national_significant_number(&number(999, 1234567))
    );
}

#[test]
fn format_by_pattern() {
    let phone_util = get_phone_util();
    let mut new_num_format = NumberFormat::new();
    new_num_format.set_pattern("(\\d{3})(\\d{3})(\\d{4})".to_owned());
    new_num_format.set_format("$1 $2-$3".to_owned());
    new_num_format.set_national_prefix_formatting_rule("$NP ($FG)".to_owned());
    let formats = vec![new_num_format];

    let us_number = number(1, 2025550178);
    assert_eq!(
        Ok("1 (202) 555-0178".to_owned()),
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::National, &formats)
    );
    assert_eq!(
        Ok("+1 202 555-0178".to_owned()),
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::International, &formats)
    );

    let mut gb_format = NumberFormat::new();
    gb_format.set_pattern("(20)(\\d{4})(\\d{4})".to_owned());
    gb_format.set_format("$1 $2 $3".to_owned());
    gb_format.set_national_prefix_formatting_rule("($NP$FG)".to_owned());
    let formats = vec![gb_format];
    let gb_number = number(44, 2087654321);
    assert_eq!(
        Ok("(020) 8765 4321".to_owned()),
        phone_util.format_by_pattern(&gb_number, PhoneNumberFormat::National, &formats)
    );
    // No user rule fits, the number is left ungrouped.
    assert_eq!(
        Ok("+44 7400123456".to_owned()),
        phone_util.format_by_pattern(&number(44, 7400123456), PhoneNumberFormat::International, &formats)
    );
}

#[test]
fn e164_round_trip() {
    let phone_util = get_phone_util();
    for e164 in [
        "+12025550178",
        "+12423591234",
        "+442087654321",
        "+2348031234567",
        "+79123456789",
        "+390212345678",
        "+33123456789",
        "+4930123456",
        "+254712123456",
        "+80012345678",
    ] {
        let parsed = phone_util.parse(e164, None).unwrap();
        assert_eq!(Ok(e164.to_owned()), phone_util.format(&parsed, PhoneNumberFormat::E164));

        let international = phone_util.format(&parsed, PhoneNumberFormat::International).unwrap();
        assert_eq!(Ok(parsed), phone_util.parse(&international, None), "{}", international);
    }
}

#[test]
fn shared_between_threads() {
    let phone_util = get_phone_util();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let parsed = phone_util.parse("+2348031234567", None).unwrap();
                    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type(&parsed));
                    assert_eq!(
                        Ok("+234 803 123 4567".to_owned()),
                        phone_util.format(&parsed, PhoneNumberFormat::International)
                    );
                }
            });
        }
    });
}
