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

/// One version row of a dose requirement. For a given vaccine and dose
/// number at most one row is active at any time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseRequirement {
    pub id: Id,
    pub vaccine_id: Id,
    pub dose_number: u32,
    pub dose_name: String,
    pub min_age: Age,
    pub max_age: Option<Age>,
    #[serde(default)]
    pub interval_from_previous: Interval,
    #[serde(default)]
    pub allowable_delay: u32,
    #[serde(default)]
    pub priority: Priority,
    pub status: Status,
    pub version: u32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[serde(default)]
    pub guidelines: Vec<Guideline>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseCreateParameters {
    pub dose_number: u32,
    pub dose_name: Option<String>,
    pub min_age: Age,
    pub max_age: Option<Age>,
    #[serde(default)]
    pub interval_from_previous: Interval,
    #[serde(default)]
    pub allowable_delay: u32,
    #[serde(default)]
    pub priority: Priority,
    pub notes: Option<String>,
    #[serde(default)]
    pub guidelines: Vec<Guideline>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseUpdateParameters {
    pub dose_name: Option<String>,
    pub min_age: Option<Age>,
    pub max_age: Option<Age>,
    pub interval_from_previous: Option<Interval>,
    pub allowable_delay: Option<u32>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub notes: Option<String>,
    pub guidelines: Option<Vec<Guideline>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Age {
    pub value: u32,

    #[serde(default)]
    pub unit: AgeUnit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

/// Spacing from the previous dose, in days. `max_days` is carried for
/// catalog completeness; the due-date calculation does not consult it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    #[serde(default)]
    pub min_days: u32,
    pub max_days: Option<u32>,
    pub exact_days: Option<u32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Routine,
    Catchup,
    Special,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Superseded,
    Pending,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    pub authority: Option<String>,
    pub reference: Option<String>,
    pub url: Option<String>,
}

/// Outcome of a due-date calculation for one dose of one patient.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDate {
    pub due_date: DateTime<Utc>,
    pub status: Eligibility,
    pub dose_number: u32,
    pub min_age_required: Age,
    pub interval: Interval,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Eligible,
    Future,
    Overdue,
}

impl Age {
    /// Whole months, using the calendar approximations 30 days and 7-day
    /// weeks the catalog authors work with.
    pub fn in_months(&self) -> u32 {
        match self.unit {
            AgeUnit::Days => self.value / 30,
            AgeUnit::Weeks => self.value * 7 / 30,
            AgeUnit::Months => self.value,
            AgeUnit::Years => self.value * 12,
        }
    }
}

impl Default for AgeUnit {
    fn default() -> Self {
        Self::Months
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Routine
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn age_in_months() {
        let months = Age {
            value: 6,
            unit: AgeUnit::Months,
        };
        let years = Age {
            value: 2,
            unit: AgeUnit::Years,
        };
        let weeks = Age {
            value: 6,
            unit: AgeUnit::Weeks,
        };

        assert_eq!(months.in_months(), 6);
        assert_eq!(years.in_months(), 24);
        assert_eq!(weeks.in_months(), 1);
    }
}
