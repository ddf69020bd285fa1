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

use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};

/// Stored format: `<hex salt>$<hex digest>`.
const ROUNDS: usize = 4096;

pub fn hash(password: &str) -> String {
    let salt: [u8; 16] = thread_rng().gen();
    let salt = hex::encode(salt);
    let digest = digest(&salt, password);

    format!("{}${}", salt, digest)
}

pub fn verify(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(2, '$');

    let salt = match parts.next() {
        Some(salt) => salt,
        None => return false,
    };
    let expected = match parts.next() {
        Some(digest) => digest,
        None => return false,
    };

    digest(salt, password) == expected
}

fn digest(salt: &str, password: &str) -> String {
    let mut data = format!("{}:{}", salt, password).into_bytes();
    for _ in 0..ROUNDS {
        data = Sha256::digest(&data).to_vec();
    }

    hex::encode(data)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn verify_accepts_original_password() {
        let stored = hash("secret123");

        assert!(verify("secret123", &stored));
    }

    #[test]
    fn verify_rejects_other_passwords() {
        let stored = hash("secret123");

        assert!(!verify("secret124", &stored));
        assert!(!verify("", &stored));
    }

    #[test]
    fn verify_rejects_malformed_storage() {
        assert!(!verify("secret123", "no-separator"));
    }

    #[test]
    fn hash_is_salted() {
        assert_ne!(hash("secret123"), hash("secret123"));
    }
}
