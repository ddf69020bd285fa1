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

use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use chrono::Utc;
use log::debug;
use resources::user::{RegisterParameters, UserProfile};
use serde::Serialize;

use crate::{
    service::{
        misc::{AccessToken, TokenKey},
        RequestError,
    },
    state::State,
};

#[derive(Serialize)]
pub struct AuthResponse<'a> {
    pub success: bool,
    pub message: &'a str,
    pub token: String,
    pub user: UserProfile,
}

pub async fn register(
    state: Data<State>,
    token_key: TokenKey,
    args: Json<RegisterParameters>,
) -> Result<HttpResponse, RequestError> {
    let args = args.into_inner();
    validate(&args)?;

    let mut state = state.lock().await;
    let user = state.user_register(args)?;

    debug!(target: "vaccination_record_server", "User registered with id: {}", user.id);

    let token = AccessToken::issue(user, Utc::now()).sign(&token_key.0)?;

    Ok(HttpResponse::Created().json(&AuthResponse {
        success: true,
        message: "User registered successfully",
        token,
        user: user.into(),
    }))
}

fn validate(args: &RegisterParameters) -> Result<(), RequestError> {
    if args.name.trim().is_empty()
        || args.email.trim().is_empty()
        || args.phone.trim().is_empty()
        || args.password.is_empty()
        || !args.agree_to_terms
    {
        return Err(RequestError::Validation("All fields are required".into()));
    }

    if let Some(confirm_password) = &args.confirm_password {
        if confirm_password != &args.password {
            return Err(RequestError::Validation("Passwords do not match".into()));
        }
    }

    if args.password.len() < 6 {
        return Err(RequestError::Validation(
            "Password must be at least 6 characters long".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn args() -> RegisterParameters {
        RegisterParameters {
            name: "Test User".into(),
            email: "test@example.com".into(),
            phone: "0123456789".into(),
            password: "secret123".into(),
            confirm_password: Some("secret123".into()),
            agree_to_terms: true,
            role: None,
            address: None,
            doctor_credentials: None,
        }
    }

    #[test]
    fn accepts_complete_registration() {
        assert!(validate(&args()).is_ok());
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        let mut args = args();
        args.confirm_password = Some("something-else".into());

        assert!(validate(&args).is_err());
    }

    #[test]
    fn rejects_short_passwords() {
        let mut args = args();
        args.password = "abc".into();
        args.confirm_password = Some("abc".into());

        assert!(validate(&args).is_err());
    }

    #[test]
    fn rejects_missing_terms_agreement() {
        let mut args = args();
        args.agree_to_terms = false;

        assert!(validate(&args).is_err());
    }
}
