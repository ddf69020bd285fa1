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

use hmac::{Hmac, Mac};
use jwt::{FromBase64, SignWithKey, VerifyWithKey};
use serde::Serialize;
use sha2::Sha256;

pub use jwt::Error;

/// HS256 key shared by all tokens issued by this service.
pub type Key = Hmac<Sha256>;

pub fn key_from_secret(secret: &str) -> Key {
    Key::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length")
}

pub fn sign<T>(claims: &T, key: &Key) -> Result<String, Error>
where
    T: Serialize,
{
    claims.sign_with_key(key)
}

pub fn verify<T>(jwt: &str, key: &Key) -> Result<T, Error>
where
    T: FromBase64,
{
    jwt.verify_with_key(key)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    #[test]
    fn sign_verify_roundtrip() {
        let key = key_from_secret("test-secret");
        let claims = Claims {
            sub: "user-1".into(),
            exp: 4102444800,
        };

        let token = sign(&claims, &key).unwrap();
        let verified: Claims = verify(&token, &key).unwrap();

        assert_eq!(claims, verified);
    }

    #[test]
    fn verify_rejects_foreign_key() {
        let key = key_from_secret("test-secret");
        let other = key_from_secret("other-secret");
        let claims = Claims {
            sub: "user-1".into(),
            exp: 4102444800,
        };

        let token = sign(&claims, &key).unwrap();
        let verified: Result<Claims, _> = verify(&token, &other);

        assert!(verified.is_err());
    }
}
