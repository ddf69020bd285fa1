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
    web::{Data, Json},
    HttpResponse,
};
use chrono::{DateTime, Utc};
use resources::{primitives::Id, user::Role};
use serde::Deserialize;

use crate::{
    service::{header::Authorization, misc::Envelope, RequestError},
    state::State,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateParameters {
    pub vaccine_id: Id,
    pub patient_age_months: u32,
    pub last_dose_date: Option<DateTime<Utc>>,

    #[serde(default = "default_dose_number")]
    pub dose_number: u32,
}

fn default_dose_number() -> u32 {
    1
}

pub async fn calculate(
    state: Data<State>,
    access_token: Authorization,
    args: Json<CalculateParameters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| r == Role::Doctor || r == Role::Admin)?;

    let args = args.into_inner();

    let state = state.lock().await;
    let due_date = state.dose_due_date(
        &args.vaccine_id,
        args.dose_number,
        args.patient_age_months,
        args.last_dose_date,
    )?;

    Ok(Envelope::new(due_date).respond())
}
