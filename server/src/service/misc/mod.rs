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

pub mod access_token;
pub mod from_query;
pub mod response;

pub use access_token::{AccessToken, Error as AccessTokenError};
pub use from_query::{FromQuery, Query, QueryValue};
pub use response::Envelope;

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use miscellaneous::jwt::{key_from_secret, Key};

use super::RequestError;

/// HMAC key all access tokens are signed and verified with. Shared with
/// every worker through the application data of the HTTP server.
#[derive(Clone)]
pub struct TokenKey(pub Key);

impl TokenKey {
    pub fn from_secret(secret: &str) -> Self {
        Self(key_from_secret(secret))
    }
}

impl FromRequest for TokenKey {
    type Error = RequestError;
    type Future = Ready<Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.app_data::<TokenKey>()
                .cloned()
                .ok_or_else(|| RequestError::internal("Shared data 'TokenKey' is missing!")),
        )
    }
}
