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
    clinic::{ClinicCreateParameters, ClinicUpdateParameters},
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
    args: Json<ClinicCreateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Admin)?;

    let mut state = state.lock().await;
    let clinic = state.clinic_create(args.into_inner())?;

    Ok(Envelope::new(clinic)
        .message("Clinic created successfully")
        .respond_with(StatusCode::CREATED))
}

pub async fn get_all(
    state: Data<State>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| matches!(r, Role::Patient | Role::Doctor | Role::Admin))?;

    let state = state.lock().await;
    let clinics = state.clinic_list()?;

    Ok(Envelope::new(&clinics).count(clinics.len()).respond())
}

pub async fn get_one(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| matches!(r, Role::Patient | Role::Doctor | Role::Admin))?;

    let state = state.lock().await;
    let clinic = state.clinic_get(&id)?;

    Ok(Envelope::new(clinic).respond())
}

pub async fn update(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Json<ClinicUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Admin)?;

    let mut state = state.lock().await;
    let clinic = state.clinic_update(&id, args.into_inner())?;

    Ok(Envelope::new(clinic)
        .message("Clinic updated successfully")
        .respond())
}

pub async fn remove(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Admin)?;

    let mut state = state.lock().await;
    state.clinic_delete(&id)?;

    Ok(Envelope::new(json!({}))
        .message("Clinic deleted successfully")
        .respond())
}
