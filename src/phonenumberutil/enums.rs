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

use strum::{EnumIter, IntoStaticStr};

/// Output styles of [`PhoneNumberUtil::format`](crate::PhoneNumberUtil::format).
///
/// The Washington number 202-555-0178 renders as:
/// - **E164**: `+12025550178`
/// - **INTERNATIONAL**: `+1 202-555-0178`
/// - **NATIONAL**: `(202) 555-0178`
/// - **RFC3966**: `tel:+1-202-555-0178`
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// "+" and digits only, extensions are dropped.
    E164,
    /// Calling code followed by the groups of the region's international
    /// layout. No national prefix.
    International,
    /// Layout used when dialling inside the region, national prefix included
    /// where the region's rule asks for it.
    National,
    /// `tel:` URI, groups joined by dashes and the extension as `;ext=`.
    RFC3966,
}

/// What a number is used for, decided by the first matching description of
/// its region.
///
/// The variant names convert into the stable upper-case names used by
/// libphonenumber (`FIXED_LINE`, `VOIP`, ...) through [`Into<&'static str>`].
#[derive(Debug, EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// The region's fixed-line and mobile ranges can not be told apart, as in
    /// the NANPA countries.
    FixedLineOrMobile,
    TollFree,
    PremiumRate,
    /// Caller and recipient split the cost of the call.
    SharedCost,
    #[strum(serialize = "VOIP")]
    VoIP,
    /// Follows a person rather than a line, routed where its owner chooses.
    PersonalNumber,
    Pager,
    /// Universal access number: one number routed to several offices.
    #[strum(serialize = "UAN")]
    UAN,
    #[strum(serialize = "VOICEMAIL")]
    VoiceMail,
    /// Matches none of the descriptions of its region, or the region is not
    /// known.
    Unknown,
}

/// Successful outcome of a length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    /// Long enough to be dialled from anywhere in the region.
    IsPossible,
    /// Only dialable inside a local area, without its area code.
    IsPossibleLocalOnly,
}

impl PhoneNumberType {
    /// Stable upper-case name of the type, e.g. `FIXED_LINE_OR_MOBILE`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Mobile and fixed-line-or-mobile numbers can receive calls on a mobile
    /// device.
    pub fn is_mobile_capable(self) -> bool {
        matches!(self, PhoneNumberType::Mobile | PhoneNumberType::FixedLineOrMobile)
    }
}
