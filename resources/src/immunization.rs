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

/// One administered dose of one vaccine for one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationLog {
    pub id: Id,
    pub user_id: Id,
    pub vaccine_id: Id,
    pub date_administered: DateTime<Utc>,
    pub dose_number: u32,
    pub next_due_date: Option<DateTime<Utc>>,
    pub clinic: String,
    pub notes: Option<String>,
    pub digital_certificate: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationCreateParameters {
    pub user_id: Id,
    pub vaccine_id: Id,
    pub date_administered: DateTime<Utc>,
    pub dose_number: u32,
    pub next_due_date: Option<DateTime<Utc>>,
    pub clinic: String,
    pub notes: Option<String>,
    pub digital_certificate: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationUpdateParameters {
    pub date_administered: Option<DateTime<Utc>>,
    pub dose_number: Option<u32>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub clinic: Option<String>,
    pub notes: Option<String>,
    pub digital_certificate: Option<String>,
}
