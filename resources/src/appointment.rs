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
pub struct Appointment {
    pub id: Id,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub vaccine_type: String,
    pub dose_number: u32,
    pub age_group: String,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreateParameters {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub vaccine_type: String,
    pub dose_number: u32,
    pub age_group: String,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdateParameters {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vaccine_type: Option<String>,
    pub dose_number: Option<u32>,
    pub age_group: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_time: Option<String>,
}
