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
use resources::{dose::DoseUpdateParameters, primitives::Id, user::Role};

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn update(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Json<DoseUpdateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let mut state = state.lock().await;
    let (dose, versioned) = state.dose_update(&id, args.into_inner())?;

    let message = if versioned {
        "Dose requirement updated with new version"
    } else {
        "Dose requirement updated successfully"
    };

    Ok(Envelope::new(dose).message(message).respond())
}
