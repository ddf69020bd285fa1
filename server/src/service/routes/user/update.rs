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
    web::{Data, Json, Path},
    HttpResponse,
};
use resources::{
    primitives::Id,
    user::{ProfileUpdateParameters, Role, UserProfile, UserUpdateParameters},
};

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn update(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Json<UserUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Admin)?;

    let mut state = state.lock().await;
    let user = state.user_update(&id, args.into_inner())?;

    Ok(Envelope::new(UserProfile::from(user))
        .message("User updated successfully")
        .respond())
}

pub async fn update_profile(
    state: Data<State>,
    access_token: Authorization,
    args: Json<ProfileUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|_| true)?;

    let mut state = state.lock().await;
    let user = state.user_update_profile(&access_token.sub, args.into_inner())?;

    Ok(Envelope::new(UserProfile::from(user))
        .message("Profile updated successfully")
        .respond())
}
