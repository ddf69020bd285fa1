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
use log::debug;
use resources::{dose::DoseCreateParameters, primitives::Id, user::Role};

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn create(
    state: Data<State>,
    vaccine_id: Path<Id>,
    access_token: Authorization,
    args: Json<DoseCreateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let args = args.into_inner();
    if args.dose_number < 1 {
        return Err(RequestError::Validation(
            "Dose number must be a positive integer".into(),
        ));
    }

    let mut state = state.lock().await;
    let dose = state.dose_create(&vaccine_id, args)?;

    debug!(
        target: "vaccination_record_server",
        "Dose {} created for vaccine {}", dose.dose_number, dose.vaccine_id
    );

    Ok(Envelope::new(dose)
        .message("Dose requirement created successfully")
        .respond_with(StatusCode::CREATED))
}
