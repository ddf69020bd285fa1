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
use resources::{primitives::Id, user::Role, vaccine::VaccineSummary};
use serde::Serialize;

use crate::{
    service::{header::Authorization, RequestError},
    state::State,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    success: bool,
    current_version: u32,
    history: Vec<VaccineSummary>,
}

pub async fn history(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| matches!(r, Role::Patient | Role::Doctor | Role::Admin))?;

    let state = state.lock().await;
    let (current_version, history) = state.vaccine_history(&id)?;

    Ok(HttpResponse::Ok().json(&HistoryResponse {
        success: true,
        current_version,
        history,
    }))
}
