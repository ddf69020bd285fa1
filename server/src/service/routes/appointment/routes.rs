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
    appointment::{AppointmentCreateParameters, AppointmentUpdateParameters},
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
    args: Json<AppointmentCreateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Patient)?;

    let mut state = state.lock().await;
    let appointment = state.appointment_create(args.into_inner())?;

    Ok(Envelope::new(appointment)
        .message("Appointment created successfully")
        .respond_with(StatusCode::CREATED))
}

pub async fn get_all(
    state: Data<State>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Admin)?;

    let state = state.lock().await;
    let appointments = state.appointment_list()?;

    Ok(Envelope::new(&appointments)
        .count(appointments.len())
        .respond())
}

pub async fn get_one(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| matches!(r, Role::Patient | Role::Doctor | Role::Admin))?;

    let state = state.lock().await;
    let appointment = state.appointment_get(&id)?;

    Ok(Envelope::new(appointment).respond())
}

pub async fn update(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Json<AppointmentUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Patient || r == Role::Admin)?;

    let mut state = state.lock().await;
    let appointment = state.appointment_update(&id, args.into_inner())?;

    Ok(Envelope::new(appointment)
        .message("Appointment updated successfully")
        .respond())
}

pub async fn remove(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Patient || r == Role::Admin)?;

    let mut state = state.lock().await;
    state.appointment_delete(&id)?;

    Ok(Envelope::new(json!({}))
        .message("Appointment deleted successfully")
        .respond())
}
