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

use std::collections::hash_map::{Entry, HashMap};

use chrono::{DateTime, Duration, Months, Utc};
use resources::{
    dose::{DoseCreateParameters, DoseUpdateParameters, DueDate, Eligibility, Status},
    primitives::Id,
    DoseRequirement,
};

use crate::state::Inner;

use super::Error;

/// All dose requirement rows, with an explicit index of the active row per
/// `(vaccine, dose number)` slot. The index is what enforces the
/// at-most-one-active invariant.
#[derive(Default)]
pub struct Doses {
    by_id: HashMap<Id, DoseRequirement>,
    by_vaccine: HashMap<Id, Vec<Id>>,
    active: HashMap<(Id, u32), Id>,
}

impl Doses {
    pub fn insert(&mut self, dose: DoseRequirement) {
        let id = dose.id.clone();
        let vaccine_id = dose.vaccine_id.clone();
        let dose_number = dose.dose_number;
        let is_active = dose.status == Status::Active;

        match self.by_id.entry(id.clone()) {
            Entry::Occupied(e) => {
                panic!("Dose with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(dose);
            }
        }

        self.by_vaccine
            .entry(vaccine_id.clone())
            .or_default()
            .push(id.clone());

        if is_active {
            match self.active.entry((vaccine_id, dose_number)) {
                Entry::Occupied(e) => {
                    panic!("Vaccine already has an active dose {}!", e.key().1);
                }
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
            }
        }
    }

    pub fn get_by_id(&self, id: &Id) -> Option<&DoseRequirement> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DoseRequirement> {
        self.by_id.values()
    }

    pub(crate) fn count_active_for(&self, vaccine_id: &Id) -> usize {
        self.active.keys().filter(|(id, _)| id == vaccine_id).count()
    }

    pub(crate) fn supersede_for_vaccine(&mut self, vaccine_id: &Id, now: DateTime<Utc>) {
        let ids = match self.by_vaccine.get(vaccine_id) {
            Some(ids) => ids.clone(),
            None => return,
        };

        for id in ids {
            let dose = self.by_id.get_mut(&id).unwrap();
            if dose.status == Status::Superseded {
                continue;
            }

            let was_active = dose.status == Status::Active;
            let dose_number = dose.dose_number;

            dose.status = Status::Superseded;
            dose.valid_until = Some(now);
            dose.updated_at = now;

            if was_active {
                self.active.remove(&(vaccine_id.clone(), dose_number));
            }
        }
    }
}

impl Inner {
    pub fn dose_create(
        &mut self,
        vaccine_id: &Id,
        args: DoseCreateParameters,
    ) -> Result<&DoseRequirement, Error> {
        if self.vaccines.get_by_id(vaccine_id).is_none() {
            return Err(Error::VaccineNotFound(vaccine_id.clone()));
        }

        if self
            .doses
            .active
            .contains_key(&(vaccine_id.clone(), args.dose_number))
        {
            return Err(Error::Duplicate(args.dose_number));
        }

        let DoseCreateParameters {
            dose_number,
            dose_name,
            min_age,
            max_age,
            interval_from_previous,
            allowable_delay,
            priority,
            notes,
            guidelines,
        } = args;

        let now = Utc::now();
        let id = Id::generate().unwrap();

        let dose = DoseRequirement {
            id: id.clone(),
            vaccine_id: vaccine_id.clone(),
            dose_number,
            dose_name: dose_name.unwrap_or_else(|| format!("Dose {}", dose_number)),
            min_age,
            max_age,
            interval_from_previous,
            allowable_delay,
            priority,
            status: Status::Active,
            version: 1,
            valid_from: now,
            valid_until: None,
            notes,
            guidelines,
            created_at: now,
            updated_at: now,
        };

        self.doses.insert(dose);

        Ok(self.doses.by_id.get(&id).unwrap())
    }

    pub fn dose_list(&self, vaccine_id: &Id) -> Result<Vec<&DoseRequirement>, Error> {
        if self.vaccines.get_by_id(vaccine_id).is_none() {
            return Err(Error::VaccineNotFound(vaccine_id.clone()));
        }

        let mut doses: Vec<&DoseRequirement> = self
            .doses
            .by_vaccine
            .get(vaccine_id)
            .into_iter()
            .flatten()
            .map(|id| self.doses.by_id.get(id).unwrap())
            .filter(|d| d.status != Status::Superseded)
            .collect();

        if doses.is_empty() {
            return Err(Error::NoneForVaccine(vaccine_id.clone()));
        }

        doses.sort_by_key(|d| d.dose_number);

        Ok(doses)
    }

    pub fn dose_get(&self, id: &Id) -> Result<&DoseRequirement, Error> {
        self.doses
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Copy-on-write update. A change to `min_age` or
    /// `interval_from_previous` supersedes the row and creates its
    /// successor; anything else mutates in place. The boolean tells the
    /// caller whether a new version was created.
    pub fn dose_update(
        &mut self,
        id: &Id,
        update: DoseUpdateParameters,
    ) -> Result<(&DoseRequirement, bool), Error> {
        let current = self
            .doses
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        let min_age_changes = update
            .min_age
            .as_ref()
            .map_or(false, |v| v != &current.min_age);
        let interval_changes = update
            .interval_from_previous
            .as_ref()
            .map_or(false, |v| v != &current.interval_from_previous);

        let now = Utc::now();

        if min_age_changes || interval_changes {
            let version = current.version;
            let vaccine_id = current.vaccine_id.clone();
            let dose_number = current.dose_number;

            let mut next = current.clone();
            apply_update(&mut next, update);

            next.id = Id::generate().unwrap();
            next.version = version + 1;
            next.valid_from = now;
            next.valid_until = None;
            next.status = Status::Active;
            next.updated_at = now;

            let old = self.doses.by_id.get_mut(id).unwrap();
            old.status = Status::Superseded;
            old.valid_until = Some(now);
            old.updated_at = now;
            self.doses.active.remove(&(vaccine_id, dose_number));

            let new_id = next.id.clone();
            self.doses.insert(next);

            Ok((self.doses.by_id.get(&new_id).unwrap(), true))
        } else {
            if let Some(status) = update.status {
                let key = (current.vaccine_id.clone(), current.dose_number);

                if status == Status::Active && current.status != Status::Active {
                    if let Some(other) = self.doses.active.get(&key) {
                        if other != id {
                            return Err(Error::Duplicate(current.dose_number));
                        }
                    }

                    self.doses.active.insert(key, id.clone());
                } else if status != Status::Active && current.status == Status::Active {
                    self.doses.active.remove(&key);
                }
            }

            let dose = self.doses.by_id.get_mut(id).unwrap();
            apply_update(dose, update);
            dose.updated_at = now;

            Ok((self.doses.by_id.get(id).unwrap(), false))
        }
    }

    pub fn dose_delete(&mut self, id: &Id) -> Result<(), Error> {
        let dose = self
            .doses
            .by_id
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        let now = Utc::now();
        let was_active = dose.status == Status::Active;
        let key = (dose.vaccine_id.clone(), dose.dose_number);

        dose.status = Status::Superseded;
        dose.valid_until = Some(now);
        dose.updated_at = now;

        if was_active {
            self.doses.active.remove(&key);
        }

        Ok(())
    }

    pub fn dose_due_date(
        &self,
        vaccine_id: &Id,
        dose_number: u32,
        patient_age_months: u32,
        last_dose_date: Option<DateTime<Utc>>,
    ) -> Result<DueDate, Error> {
        let dose = self
            .doses
            .active
            .get(&(vaccine_id.clone(), dose_number))
            .and_then(|id| self.doses.by_id.get(id))
            .ok_or_else(|| Error::NoActiveRequirement {
                vaccine_id: vaccine_id.clone(),
                dose_number,
            })?;

        Ok(calculate_due_date(
            dose,
            patient_age_months,
            last_dose_date,
            Utc::now(),
        ))
    }
}

fn apply_update(dose: &mut DoseRequirement, update: DoseUpdateParameters) {
    let DoseUpdateParameters {
        dose_name,
        min_age,
        max_age,
        interval_from_previous,
        allowable_delay,
        priority,
        status,
        notes,
        guidelines,
    } = update;

    if let Some(dose_name) = dose_name {
        dose.dose_name = dose_name;
    }
    if let Some(min_age) = min_age {
        dose.min_age = min_age;
    }
    if let Some(max_age) = max_age {
        dose.max_age = Some(max_age);
    }
    if let Some(interval_from_previous) = interval_from_previous {
        dose.interval_from_previous = interval_from_previous;
    }
    if let Some(allowable_delay) = allowable_delay {
        dose.allowable_delay = allowable_delay;
    }
    if let Some(priority) = priority {
        dose.priority = priority;
    }
    if let Some(status) = status {
        dose.status = status;
    }
    if let Some(notes) = notes {
        dose.notes = Some(notes);
    }
    if let Some(guidelines) = guidelines {
        dose.guidelines = guidelines;
    }
}

/// Pure due-date arithmetic for one resolved dose requirement.
///
/// The first dose (or any dose without a known predecessor date) is
/// scheduled by age: due now when the patient already meets the minimum
/// age, otherwise at the date the patient will reach it. Subsequent doses
/// are scheduled from the last dose date, `exact_days` taking priority
/// over `min_days`, and are overdue once `now` has passed the due date.
pub fn calculate_due_date(
    dose: &DoseRequirement,
    patient_age_months: u32,
    last_dose_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DueDate {
    let result = |due_date, status| DueDate {
        due_date,
        status,
        dose_number: dose.dose_number,
        min_age_required: dose.min_age.clone(),
        interval: dose.interval_from_previous.clone(),
    };

    match last_dose_date {
        Some(last_dose) if dose.dose_number > 1 => {
            let interval = &dose.interval_from_previous;
            let due = if let Some(days) = interval.exact_days {
                last_dose + Duration::days(days as i64)
            } else if interval.min_days > 0 {
                last_dose + Duration::days(interval.min_days as i64)
            } else {
                last_dose
            };

            let status = if now > due {
                Eligibility::Overdue
            } else {
                Eligibility::Eligible
            };

            result(due, status)
        }
        _ => {
            let min_age_months = dose.min_age.in_months();

            if patient_age_months >= min_age_months {
                result(now, Eligibility::Eligible)
            } else {
                // approximate birth date, then forward to the minimum age
                let due = now
                    .checked_sub_months(Months::new(patient_age_months))
                    .and_then(|birth| birth.checked_add_months(Months::new(min_age_months)))
                    .unwrap_or(now);

                result(due, Eligibility::Future)
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use resources::{
        dose::{Age, AgeUnit, Interval},
        misc::CvxCode,
        vaccine::{Presentation, VaccineCreateParameters, Volume},
    };

    fn create_args(name: &str, generic_name: &str, code: &str) -> VaccineCreateParameters {
        VaccineCreateParameters {
            name: name.into(),
            generic_name: generic_name.into(),
            manufacturer: "Acme Biotech".into(),
            cvx_code: CvxCode::new(code).unwrap(),
            description: String::new(),
            presentation: Presentation::Vial,
            volume: Volume {
                value: 0.5,
                unit: "mL".into(),
            },
            storage_requirements: Default::default(),
            total_doses: 2,
            approved_regions: Vec::new(),
            contraindications: Vec::new(),
        }
    }

    fn test_dose(dose_number: u32, min_age_months: u32, interval: Interval) -> DoseRequirement {
        let now = Utc::now();

        DoseRequirement {
            id: Id::generate().unwrap(),
            vaccine_id: Id::generate().unwrap(),
            dose_number,
            dose_name: format!("Dose {}", dose_number),
            min_age: Age {
                value: min_age_months,
                unit: AgeUnit::Months,
            },
            max_age: None,
            interval_from_previous: interval,
            allowable_delay: 0,
            priority: Default::default(),
            status: Status::Active,
            version: 1,
            valid_from: now,
            valid_until: None,
            notes: None,
            guidelines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn dose_args(dose_number: u32, min_age_months: u32) -> DoseCreateParameters {
        DoseCreateParameters {
            dose_number,
            dose_name: None,
            min_age: Age {
                value: min_age_months,
                unit: AgeUnit::Months,
            },
            max_age: None,
            interval_from_previous: Interval::default(),
            allowable_delay: 0,
            priority: Default::default(),
            notes: None,
            guidelines: Vec::new(),
        }
    }

    #[test]
    fn first_dose_is_eligible_when_old_enough() {
        let dose = test_dose(1, 6, Interval::default());
        let now = Utc::now();

        let due = calculate_due_date(&dose, 12, None, now);

        assert_eq!(due.status, Eligibility::Eligible);
        assert_eq!(due.due_date, now);
        assert_eq!(due.dose_number, 1);
    }

    #[test]
    fn first_dose_is_future_when_too_young() {
        let dose = test_dose(1, 6, Interval::default());
        let now = Utc::now();

        let due = calculate_due_date(&dose, 2, None, now);

        let expected = now
            .checked_sub_months(Months::new(2))
            .unwrap()
            .checked_add_months(Months::new(6))
            .unwrap();

        assert_eq!(due.status, Eligibility::Future);
        assert_eq!(due.due_date, expected);
    }

    #[test]
    fn subsequent_dose_is_overdue_past_exact_interval() {
        let dose = test_dose(
            2,
            6,
            Interval {
                min_days: 0,
                max_days: None,
                exact_days: Some(28),
            },
        );
        let now = Utc::now();
        let last_dose = now - Duration::days(40);

        let due = calculate_due_date(&dose, 12, Some(last_dose), now);

        assert_eq!(due.status, Eligibility::Overdue);
        assert_eq!(due.due_date, last_dose + Duration::days(28));
    }

    #[test]
    fn subsequent_dose_is_eligible_within_interval() {
        let dose = test_dose(
            2,
            6,
            Interval {
                min_days: 0,
                max_days: None,
                exact_days: Some(28),
            },
        );
        let now = Utc::now();
        let last_dose = now - Duration::days(10);

        let due = calculate_due_date(&dose, 12, Some(last_dose), now);

        assert_eq!(due.status, Eligibility::Eligible);
        assert_eq!(due.due_date, last_dose + Duration::days(28));
    }

    #[test]
    fn exact_days_takes_priority_over_min_days() {
        let dose = test_dose(
            2,
            6,
            Interval {
                min_days: 60,
                max_days: None,
                exact_days: Some(28),
            },
        );
        let now = Utc::now();
        let last_dose = now - Duration::days(10);

        let due = calculate_due_date(&dose, 12, Some(last_dose), now);

        assert_eq!(due.due_date, last_dose + Duration::days(28));
    }

    #[test]
    fn min_days_is_the_fallback_interval() {
        let dose = test_dose(
            2,
            6,
            Interval {
                min_days: 30,
                max_days: None,
                exact_days: None,
            },
        );
        let now = Utc::now();
        let last_dose = now - Duration::days(10);

        let due = calculate_due_date(&dose, 12, Some(last_dose), now);

        assert_eq!(due.status, Eligibility::Eligible);
        assert_eq!(due.due_date, last_dose + Duration::days(30));
    }

    #[test]
    fn missing_interval_leaves_due_date_at_last_dose() {
        let dose = test_dose(2, 6, Interval::default());
        let now = Utc::now();
        let last_dose = now - Duration::days(10);

        let due = calculate_due_date(&dose, 12, Some(last_dose), now);

        assert_eq!(due.due_date, last_dose);
        assert_eq!(due.status, Eligibility::Overdue);
    }

    #[test]
    fn first_dose_ignores_last_dose_date() {
        let dose = test_dose(1, 6, Interval::default());
        let now = Utc::now();
        let last_dose = now - Duration::days(10);

        let due = calculate_due_date(&dose, 12, Some(last_dose), now);

        assert_eq!(due.status, Eligibility::Eligible);
        assert_eq!(due.due_date, now);
    }

    #[test]
    fn create_rejects_duplicate_active_dose_number() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        inner.dose_create(&vaccine_id, dose_args(1, 6)).unwrap();
        let err = inner
            .dose_create(&vaccine_id, dose_args(1, 6))
            .unwrap_err();

        assert!(matches!(err, Error::Duplicate(1)));
    }

    #[test]
    fn create_requires_existing_vaccine() {
        let mut inner = Inner::default();
        let missing = Id::generate().unwrap();

        let err = inner.dose_create(&missing, dose_args(1, 6)).unwrap_err();

        assert!(matches!(err, Error::VaccineNotFound(_)));
    }

    #[test]
    fn update_of_min_age_supersedes_and_swaps_active_slot() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();
        let dose_id = inner
            .dose_create(&vaccine_id, dose_args(1, 6))
            .unwrap()
            .id
            .clone();

        let update = DoseUpdateParameters {
            min_age: Some(Age {
                value: 9,
                unit: AgeUnit::Months,
            }),
            ..Default::default()
        };
        let (dose, versioned) = inner.dose_update(&dose_id, update).unwrap();
        let new_id = dose.id.clone();

        assert!(versioned);
        assert_eq!(dose.version, 2);
        assert_eq!(dose.status, Status::Active);
        assert_ne!(new_id, dose_id);

        let old = inner.doses.by_id.get(&dose_id).unwrap();
        assert_eq!(old.status, Status::Superseded);
        assert!(old.valid_until.is_some());

        let active = inner.doses.active.get(&(vaccine_id, 1)).unwrap();
        assert_eq!(active, &new_id);
    }

    #[test]
    fn minor_update_mutates_in_place() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();
        let dose_id = inner
            .dose_create(&vaccine_id, dose_args(1, 6))
            .unwrap()
            .id
            .clone();

        let update = DoseUpdateParameters {
            notes: Some("Administer in the morning".into()),
            ..Default::default()
        };
        let (dose, versioned) = inner.dose_update(&dose_id, update).unwrap();

        assert!(!versioned);
        assert_eq!(dose.version, 1);
        assert_eq!(dose.id, dose_id);
        assert_eq!(dose.notes.as_deref(), Some("Administer in the morning"));
    }

    #[test]
    fn delete_is_soft_and_frees_the_slot() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();
        let dose_id = inner
            .dose_create(&vaccine_id, dose_args(1, 6))
            .unwrap()
            .id
            .clone();

        inner.dose_delete(&dose_id).unwrap();

        let dose = inner.doses.by_id.get(&dose_id).unwrap();
        assert_eq!(dose.status, Status::Superseded);
        assert!(dose.valid_until.is_some());
        assert_eq!(inner.doses.count_active_for(&vaccine_id), 0);

        // the slot can be filled again
        inner.dose_create(&vaccine_id, dose_args(1, 6)).unwrap();
    }

    #[test]
    fn list_skips_superseded_and_sorts_by_dose_number() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        inner.dose_create(&vaccine_id, dose_args(2, 12)).unwrap();
        let first = inner
            .dose_create(&vaccine_id, dose_args(1, 6))
            .unwrap()
            .id
            .clone();
        let superseded = inner
            .dose_create(&vaccine_id, dose_args(3, 18))
            .unwrap()
            .id
            .clone();
        inner.dose_delete(&superseded).unwrap();

        let doses = inner.dose_list(&vaccine_id).unwrap();

        assert_eq!(doses.len(), 2);
        assert_eq!(doses[0].id, first);
        assert_eq!(doses[0].dose_number, 1);
        assert_eq!(doses[1].dose_number, 2);
    }

    #[test]
    fn list_without_doses_is_an_error() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        assert!(matches!(
            inner.dose_list(&vaccine_id),
            Err(Error::NoneForVaccine(_))
        ));
    }

    #[test]
    fn due_date_requires_an_active_requirement() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        let err = inner
            .dose_due_date(&vaccine_id, 1, 12, None)
            .unwrap_err();

        assert!(matches!(err, Error::NoActiveRequirement { .. }));
    }
}
