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
    web::{Data, Path},
    HttpResponse,
};
use resources::{primitives::Id, user::Role};
use serde_json::json;

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

pub async fn remove(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let mut state = state.lock().await;
    state.dose_delete(&id)?;

    Ok(Envelope::new(json!({}))
        .message("Dose requirement deleted (soft delete)")
        .respond())
}
