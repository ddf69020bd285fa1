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
    web::{Data, Json},
    HttpResponse,
};
use log::debug;
use resources::{user::Role, vaccine::VaccineCreateParameters};

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn create(
    state: Data<State>,
    access_token: Authorization,
    args: Json<VaccineCreateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let args = args.into_inner();
    validate(&args)?;

    let mut state = state.lock().await;
    let vaccine = state.vaccine_create(args, &access_token.actor())?;

    debug!(target: "vaccination_record_server", "Vaccine created with id: {}", vaccine.id);

    Ok(Envelope::new(vaccine)
        .message("Vaccine created successfully")
        .respond_with(StatusCode::CREATED))
}

fn validate(args: &VaccineCreateParameters) -> Result<(), RequestError> {
    let mut errors = Vec::new();

    if args.name.trim().len() < 2 {
        errors.push("Vaccine name must be at least 2 characters");
    }

    if args.manufacturer.trim().is_empty() {
        errors.push("Manufacturer is required");
    }

    if args.total_doses < 1 {
        errors.push("Total doses must be at least 1");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RequestError::Validation(errors.join(", ")))
    }
}
