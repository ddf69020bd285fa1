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

use chrono::{DateTime, Duration, Utc};
use miscellaneous::jwt::{sign, verify, Error as JwtError, Key};
use resources::{
    primitives::Id,
    user::{Role, User},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a bearer token. The subject is the user id; routes
/// use it for audit fields and ownership checks.
#[derive(Clone, Deserialize, Serialize)]
pub struct AccessToken {
    pub sub: Id,
    pub name: String,
    pub role: Role,

    #[serde(with = "from_timestamp")]
    pub iat: DateTime<Utc>,

    #[serde(with = "from_timestamp")]
    pub exp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authorization header is missing!")]
    Missing,

    #[error("Authorization header is invalid!")]
    InvalidValue,

    #[error("Access Token is invalid: {0}")]
    Invalid(JwtError),

    #[error("Access Token is expired!")]
    Expired,

    #[error("Access denied!")]
    InvalidRole,

    #[error("Unable to sign Access Token: {0}")]
    Sign(JwtError),
}

const TOKEN_VALIDITY_DAYS: i64 = 7;

impl AccessToken {
    pub fn issue(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            sub: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now,
            exp: now + Duration::days(TOKEN_VALIDITY_DAYS),
        }
    }

    pub fn sign(&self, key: &Key) -> Result<String, Error> {
        sign(self, key).map_err(Error::Sign)
    }

    pub fn verify(token: &str, key: &Key, now: DateTime<Utc>) -> Result<Self, Error> {
        let token: Self = verify(token, key).map_err(Error::Invalid)?;

        if token.exp < now {
            return Err(Error::Expired);
        }

        Ok(token)
    }

    pub fn check_role<F>(&self, f: F) -> Result<(), Error>
    where
        F: FnOnce(Role) -> bool,
    {
        if f(self.role) {
            Ok(())
        } else {
            Err(Error::InvalidRole)
        }
    }

    pub fn actor(&self) -> String {
        self.sub.to_string()
    }
}

mod from_timestamp {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(v.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let v = i64::deserialize(deserializer)?;

        Utc.timestamp_opt(v, 0)
            .single()
            .ok_or_else(|| D::Error::custom(format!("Invalid timestamp: {}", v)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use std::convert::TryInto;

    use miscellaneous::jwt::key_from_secret;
    use resources::user::{AccountStatus, Address};

    fn test_user() -> User {
        let now = Utc::now();

        User {
            id: "user-1".try_into().unwrap(),
            name: "Test User".into(),
            email: "test@example.com".into(),
            phone: "0123456789".into(),
            password_hash: String::new(),
            role: Role::Doctor,
            address: Address::default(),
            account_status: AccountStatus::Active,
            agree_to_terms: true,
            doctor_credentials: None,
            remember_me: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn sign_verify_roundtrip() {
        let key = key_from_secret("test-secret");
        let now = Utc::now();

        let token = AccessToken::issue(&test_user(), now).sign(&key).unwrap();
        let token = AccessToken::verify(&token, &key, now).unwrap();

        assert_eq!(token.sub.to_string(), "user-1");
        assert_eq!(token.role, Role::Doctor);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let key = key_from_secret("test-secret");
        let now = Utc::now();

        let token = AccessToken::issue(&test_user(), now).sign(&key).unwrap();
        let later = now + Duration::days(TOKEN_VALIDITY_DAYS + 1);

        assert!(matches!(
            AccessToken::verify(&token, &key, later),
            Err(Error::Expired)
        ));
    }

    #[test]
    fn check_role() {
        let token = AccessToken::issue(&test_user(), Utc::now());

        assert!(token.check_role(|r| r == Role::Doctor).is_ok());
        assert!(matches!(
            token.check_role(|r| r == Role::Admin),
            Err(Error::InvalidRole)
        ));
    }
}
