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
use resources::user::LoginParameters;

use crate::{
    service::{
        misc::{AccessToken, TokenKey},
        RequestError,
    },
    state::State,
};

use super::register::AuthResponse;

pub async fn login(
    state: Data<State>,
    token_key: TokenKey,
    args: Json<LoginParameters>,
) -> Result<HttpResponse, RequestError> {
    let args = args.into_inner();

    if args.email.trim().is_empty() || args.password.is_empty() {
        return Err(RequestError::Validation(
            "Email and password are required".into(),
        ));
    }

    let mut state = state.lock().await;
    let user = state.user_login(&args.email, &args.password, args.remember_me)?;

    let token = AccessToken::issue(user, Utc::now()).sign(&token_key.0)?;

    Ok(HttpResponse::Ok().json(&AuthResponse {
        success: true,
        message: "Login successful",
        token,
        user: user.into(),
    }))
}
