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
    http::StatusCode,
    web::{Data, Json, Path},
    HttpResponse,
};
use resources::{
    immunization::{ImmunizationCreateParameters, ImmunizationUpdateParameters},
    primitives::Id,
    user::Role,
};
use serde_json::json;

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn create(
    state: Data<State>,
    access_token: Authorization,
    args: Json<ImmunizationCreateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let mut state = state.lock().await;
    let log = state.immunization_create(args.into_inner())?;

    Ok(Envelope::new(log)
        .message("Immunization log created successfully")
        .respond_with(StatusCode::CREATED))
}

pub async fn get_all(
    state: Data<State>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|_| true)?;

    let user_id = if access_token.role == Role::Admin {
        None
    } else {
        Some(&access_token.sub)
    };

    let state = state.lock().await;
    let logs = state.immunization_list(user_id);

    Ok(Envelope::new(&logs).count(logs.len()).respond())
}

pub async fn get_one(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|_| true)?;

    let state = state.lock().await;
    let log = state.immunization_get(&id)?;

    Ok(Envelope::new(log).respond())
}

pub async fn update(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Json<ImmunizationUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let mut state = state.lock().await;
    let log = state.immunization_update(&id, args.into_inner())?;

    Ok(Envelope::new(log)
        .message("Immunization log updated successfully")
        .respond())
}

pub async fn remove(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Admin)?;

    let mut state = state.lock().await;
    state.immunization_delete(&id)?;

    Ok(Envelope::new(json!({}))
        .message("Immunization log deleted successfully")
        .respond())
}
