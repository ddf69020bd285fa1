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
use log::debug;
use resources::{primitives::Id, user::Role, vaccine::VaccineUpdateParameters};

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn update(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Json<VaccineUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let args = args.into_inner();
    validate(&args)?;

    let mut state = state.lock().await;
    let (vaccine, previous_version) = state.vaccine_update(&id, args, &access_token.actor())?;

    if let Some(version) = previous_version {
        debug!(
            target: "vaccination_record_server",
            "Vaccine {} versioned: {} -> {}", vaccine.cvx_code, version, vaccine.version
        );

        return Ok(Envelope::new(vaccine)
            .message("Vaccine updated with new version")
            .previous_version(version)
            .respond());
    }

    Ok(Envelope::new(vaccine)
        .message("Vaccine updated successfully")
        .respond())
}

fn validate(args: &VaccineUpdateParameters) -> Result<(), RequestError> {
    let mut errors = Vec::new();

    if let Some(name) = &args.name {
        if name.trim().len() < 2 {
            errors.push("Vaccine name must be at least 2 characters");
        }
    }

    if let Some(manufacturer) = &args.manufacturer {
        if manufacturer.trim().is_empty() {
            errors.push("Manufacturer is required");
        }
    }

    if let Some(total_doses) = args.total_doses {
        if total_doses < 1 {
            errors.push("Total doses must be at least 1");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RequestError::Validation(errors.join(", ")))
    }
}
