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
use resources::{primitives::Id, user::Role};
use serde::Deserialize;
use serde_json::json;

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParameters {
    pub reason: Option<String>,
}

pub async fn remove(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
    args: Option<Json<DeleteParameters>>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let reason = args.and_then(|args| args.into_inner().reason);

    let mut state = state.lock().await;
    state.vaccine_delete(&id, reason)?;

    Ok(Envelope::new(json!({}))
        .message("Vaccine discontinued successfully")
        .respond())
}
