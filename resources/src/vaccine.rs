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

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{misc::CvxCode, primitives::Id};

/// One version row of a catalog vaccine. Rows sharing a name or CVX code
/// form the version lineage of a logical vaccine; at most one row of a
/// lineage is current (`valid_until` unset) at any time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineProduct {
    pub id: Id,
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub cvx_code: CvxCode,
    #[serde(default)]
    pub description: String,
    pub presentation: Presentation,
    pub volume: Volume,
    #[serde(default)]
    pub storage_requirements: StorageRequirements,
    pub total_doses: u32,
    #[serde(default)]
    pub approved_regions: Vec<ApprovedRegion>,
    #[serde(default)]
    pub contraindications: Vec<Contraindication>,
    pub status: Status,
    pub version: u32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub update_reason: String,
    pub created_by: String,
    pub last_modified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineCreateParameters {
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub cvx_code: CvxCode,
    #[serde(default)]
    pub description: String,
    pub presentation: Presentation,
    pub volume: Volume,
    #[serde(default)]
    pub storage_requirements: StorageRequirements,
    pub total_doses: u32,
    #[serde(default)]
    pub approved_regions: Vec<ApprovedRegion>,
    #[serde(default)]
    pub contraindications: Vec<Contraindication>,
}

/// Partial update. Absent fields are left untouched; the update only takes
/// effect for fields that are actually present in the request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineUpdateParameters {
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub manufacturer: Option<String>,
    pub cvx_code: Option<CvxCode>,
    pub description: Option<String>,
    pub presentation: Option<Presentation>,
    pub volume: Option<Volume>,
    pub storage_requirements: Option<StorageRequirements>,
    pub total_doses: Option<u32>,
    pub status: Option<Status>,
    pub approved_regions: Option<Vec<ApprovedRegion>>,
    pub contraindications: Option<Vec<Contraindication>>,
    pub update_reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineSummary {
    pub name: String,
    pub version: u32,
    pub status: Status,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub update_reason: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Presentation {
    #[serde(rename = "vial")]
    Vial,

    #[serde(rename = "prefilled syringe")]
    PrefilledSyringe,

    #[serde(rename = "nasal spray")]
    NasalSpray,

    #[serde(rename = "oral")]
    Oral,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Discontinued,
    Pending,
    Archived,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub value: f64,

    #[serde(default = "Volume::default_unit")]
    pub unit: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRequirements {
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub requires_refrigeration: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedRegion {
    pub country: String,
    pub approval_date: Option<DateTime<Utc>>,
    pub regulatory_body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contraindication {
    pub condition: String,
    pub severity: Severity,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Absolute,
    Caution,
    None,
}

impl Volume {
    fn default_unit() -> String {
        "mL".into()
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "discontinued" => Ok(Self::Discontinued),
            "pending" => Ok(Self::Pending),
            "archived" => Ok(Self::Archived),
            s => Err(format!("Invalid vaccine status: {}", s)),
        }
    }
}

impl From<&VaccineProduct> for VaccineSummary {
    fn from(vaccine: &VaccineProduct) -> Self {
        Self {
            name: vaccine.name.clone(),
            version: vaccine.version,
            status: vaccine.status,
            valid_from: vaccine.valid_from,
            valid_until: vaccine.valid_until,
            update_reason: vaccine.update_reason.clone(),
        }
    }
}
