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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::Id;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: Id,
    pub clinic_name: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub phone: String,
    pub email: String,
    pub clinic_type: String,
    #[serde(default)]
    pub description: String,
    pub open_days: Vec<String>,
    pub open_time: String,
    pub close_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicCreateParameters {
    pub clinic_name: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub phone: String,
    pub email: String,
    pub clinic_type: String,
    #[serde(default)]
    pub description: String,
    pub open_days: Vec<String>,
    pub open_time: String,
    pub close_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicUpdateParameters {
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub clinic_type: Option<String>,
    pub description: Option<String>,
    pub open_days: Option<Vec<String>>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}
