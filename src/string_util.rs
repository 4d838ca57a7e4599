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

/// Drops the first `len` bytes of the string, keeping it borrowed when it
/// was borrowed.
///
/// Calls `drain` if string is owned and returns slice if string is borrowed
pub fn cut_cow_start<'a>(cow: Cow<'a, str>, len: usize) -> Cow<'a, str> {
    match cow {
        Cow::Borrowed(s) => Cow::Borrowed(&s[len..]),
        Cow::Owned(mut s) => {
            s.drain(..len);
            Cow::Owned(s)
        }
    }
}

/// Cuts `s` at the first occurrence of `marker`, returning the part before it
/// and the part after it (without the marker).
pub fn split_at_marker<'a>(s: &'a str, marker: &str) -> (&'a str, Option<&'a str>) {
    match s.find(marker) {
        Some(index) => (&s[..index], Some(&s[index + marker.len()..])),
        None => (s, None),
    }
}
