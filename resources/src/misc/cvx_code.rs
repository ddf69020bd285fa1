/*
 * Copyright (c) 2021 gematik GmbH
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *    http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::convert::TryFrom;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

/// External standard vaccine identifier. Always a non-empty string of digits.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CvxCode(String);

impl CvxCode {
    pub fn new<T: Display>(value: T) -> Result<Self, String> {
        let value = value.to_string();
        if check_str(&value) {
            Ok(Self(value))
        } else {
            Err(format!("Invalid CVX code: {}!", value))
        }
    }

    pub fn as_string(&self) -> &String {
        &self.0
    }
}

impl TryFrom<String> for CvxCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if check_str(&value) {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}

impl From<CvxCode> for String {
    fn from(v: CvxCode) -> Self {
        v.0
    }
}

impl Deref for CvxCode {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for CvxCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CvxCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CvxCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;

        Self::try_from(s).map_err(|err| D::Error::custom(format!("Invalid CVX code: {}", err)))
    }
}

fn check_str(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn accepts_digits_only() {
        assert!(CvxCode::new("208").is_ok());
        assert!(CvxCode::new("3").is_ok());
        assert!(CvxCode::new("20a").is_err());
        assert!(CvxCode::new("").is_err());
    }
}
