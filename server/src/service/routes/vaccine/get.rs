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

use crate::{
    service::{
        header::Authorization,
        misc::{Envelope, FromQuery, Query, QueryValue},
        RequestError,
    },
    state::State,
};

use super::state::VaccineFilters;

impl FromQuery for VaccineFilters {
    fn parse_key_value_pair(&mut self, key: &str, value: QueryValue<'_>) -> Result<(), String> {
        match key {
            "status" => self.status = Some(value.ok()?.parse()?),
            "manufacturer" => self.manufacturer = Some(value.ok()?.to_owned()),
            "search" => self.search = Some(value.ok()?.to_owned()),
            "region" => self.region = Some(value.ok()?.to_owned()),
            _ => (),
        }

        Ok(())
    }
}

pub async fn get_all(
    state: Data<State>,
    access_token: Authorization,
    query: Query<VaccineFilters>,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| matches!(r, Role::Patient | Role::Doctor | Role::Admin))?;

    let state = state.lock().await;
    let vaccines = state.vaccine_list(&query)?;

    Ok(Envelope::new(&vaccines).count(vaccines.len()).respond())
}

pub async fn get_one(
    state: Data<State>,
    id: Path<Id>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    access_token.check_role(|r| matches!(r, Role::Patient | Role::Doctor | Role::Admin))?;

    let state = state.lock().await;
    let vaccine = state.vaccine_get(&id)?;

    Ok(Envelope::new(vaccine).respond())
}
