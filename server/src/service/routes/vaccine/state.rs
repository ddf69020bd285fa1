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

use chrono::Utc;
use resources::{
    misc::CvxCode,
    primitives::Id,
    vaccine::{Status, VaccineCreateParameters, VaccineSummary, VaccineUpdateParameters},
    VaccineProduct,
};

use crate::state::Inner;

use super::Error;

/// All version rows of all vaccines, plus one lineage per logical vaccine
/// that tracks its row currently in effect. Updating a row and inserting
/// its successor happens inside one store method, so the lineage never
/// sees an intermediate state.
#[derive(Default)]
pub struct Vaccines {
    by_id: HashMap<Id, VaccineProduct>,
    lineages: HashMap<CvxCode, Lineage>,
}

/// `current` is unset once the vaccine has been discontinued.
pub struct Lineage {
    current: Option<Id>,
    versions: Vec<Id>,
}

#[derive(Debug, Default)]
pub struct VaccineFilters {
    pub status: Option<Status>,
    pub manufacturer: Option<String>,
    pub search: Option<String>,
    pub region: Option<String>,
}

impl Vaccines {
    pub fn insert(&mut self, vaccine: VaccineProduct) {
        let id = vaccine.id.clone();
        let code = vaccine.cvx_code.clone();
        let is_current = vaccine.valid_until.is_none();

        match self.by_id.entry(id.clone()) {
            Entry::Occupied(e) => {
                panic!("Vaccine with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(vaccine);
            }
        }

        let lineage = self.lineages.entry(code).or_insert_with(|| Lineage {
            current: None,
            versions: Vec::new(),
        });

        if is_current {
            if let Some(current) = &lineage.current {
                panic!("Lineage has two current rows ({} and {})!", current, id);
            }

            lineage.current = Some(id.clone());
        }

        lineage.versions.push(id);
    }

    pub fn get_by_id(&self, id: &Id) -> Option<&VaccineProduct> {
        self.by_id.get(id)
    }

    /// Any row counts, whatever its version or status. Archived rows keep
    /// the code they were created with even after the lineage moved on, so
    /// this has to scan the rows instead of the lineage index.
    pub fn contains_code(&self, code: &CvxCode) -> bool {
        self.by_id.values().any(|v| &v.cvx_code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaccineProduct> {
        self.by_id.values()
    }

    fn rekey(&mut self, old: &CvxCode, new: CvxCode) {
        if let Some(lineage) = self.lineages.remove(old) {
            self.lineages.insert(new, lineage);
        }
    }

    /// Archives the current row and installs its successor.
    fn supersede(&mut self, old_id: &Id, next: VaccineProduct) -> &VaccineProduct {
        let now = next.valid_from;

        let old = self.by_id.get_mut(old_id).unwrap();
        let old_code = old.cvx_code.clone();
        old.status = Status::Archived;
        old.valid_until = Some(now);
        old.updated_at = now;

        if old_code != next.cvx_code {
            self.rekey(&old_code, next.cvx_code.clone());
        }

        let id = next.id.clone();
        let lineage = self.lineages.get_mut(&next.cvx_code).unwrap();
        lineage.current = Some(id.clone());
        lineage.versions.push(id.clone());

        match self.by_id.entry(id) {
            Entry::Occupied(e) => {
                panic!("Vaccine with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => &*entry.insert(next),
        }
    }
}

impl VaccineFilters {
    fn matches(&self, vaccine: &VaccineProduct) -> bool {
        if let Some(status) = self.status {
            if vaccine.status != status {
                return false;
            }
        }

        if let Some(manufacturer) = &self.manufacturer {
            if &vaccine.manufacturer != manufacturer {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !vaccine.name.to_lowercase().contains(&needle)
                && !vaccine.generic_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(region) = &self.region {
            if !vaccine
                .approved_regions
                .iter()
                .any(|r| &r.country == region)
            {
                return false;
            }
        }

        true
    }
}

impl Inner {
    pub fn vaccine_create(
        &mut self,
        args: VaccineCreateParameters,
        actor: &str,
    ) -> Result<&VaccineProduct, Error> {
        if self.vaccines.contains_code(&args.cvx_code) {
            return Err(Error::CvxCodeTaken(args.cvx_code));
        }

        let now = Utc::now();
        let id = Id::generate().unwrap();

        let vaccine = VaccineProduct {
            id: id.clone(),
            name: args.name,
            generic_name: args.generic_name,
            manufacturer: args.manufacturer,
            cvx_code: args.cvx_code,
            description: args.description,
            presentation: args.presentation,
            volume: args.volume,
            storage_requirements: args.storage_requirements,
            total_doses: args.total_doses,
            approved_regions: args.approved_regions,
            contraindications: args.contraindications,
            status: Status::Active,
            version: 1,
            valid_from: now,
            valid_until: None,
            update_reason: "Initial creation".into(),
            created_by: actor.to_owned(),
            last_modified_by: None,
            created_at: now,
            updated_at: now,
        };

        self.vaccines.insert(vaccine);

        Ok(self.vaccines.by_id.get(&id).unwrap())
    }

    pub fn vaccine_list(&self, filters: &VaccineFilters) -> Result<Vec<&VaccineProduct>, Error> {
        let mut vaccines: Vec<_> = self
            .vaccines
            .iter()
            .filter(|v| filters.matches(v))
            .collect();

        if vaccines.is_empty() {
            return Err(Error::NoneMatching);
        }

        vaccines.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(vaccines)
    }

    pub fn vaccine_get(&self, id: &Id) -> Result<&VaccineProduct, Error> {
        self.vaccines
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Copy-on-write update. A change to `status` or `total_doses` archives
    /// the row and creates its successor; anything else mutates in place.
    /// Returns the resulting row and, when a new version was created, the
    /// previous version number.
    pub fn vaccine_update(
        &mut self,
        id: &Id,
        update: VaccineUpdateParameters,
        actor: &str,
    ) -> Result<(&VaccineProduct, Option<u32>), Error> {
        let current = self
            .vaccines
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        if let Some(code) = &update.cvx_code {
            if code != &current.cvx_code && self.vaccines.contains_code(code) {
                return Err(Error::CvxCodeTaken(code.clone()));
            }
        }

        let status_changes = update.status.map_or(false, |s| s != current.status);
        let doses_change = update
            .total_doses
            .map_or(false, |d| d != current.total_doses);

        let now = Utc::now();

        if status_changes || doses_change {
            let explicit_status = update.status.is_some();
            let explicit_reason = update.update_reason.is_some();
            let previous_version = current.version;

            let mut next = current.clone();
            apply_update(&mut next, update);

            next.id = Id::generate().unwrap();
            next.version = previous_version + 1;
            next.valid_from = now;
            next.valid_until = None;
            next.updated_at = now;
            next.last_modified_by = Some(actor.to_owned());
            if !explicit_status {
                next.status = Status::Active;
            }
            if !explicit_reason {
                next.update_reason = "Manual update".into();
            }

            let next = self.vaccines.supersede(id, next);

            Ok((next, Some(previous_version)))
        } else {
            let old_code = current.cvx_code.clone();
            let new_code = update.cvx_code.clone();

            let vaccine = self.vaccines.by_id.get_mut(id).unwrap();
            apply_update(vaccine, update);
            vaccine.last_modified_by = Some(actor.to_owned());
            vaccine.updated_at = now;

            if let Some(new_code) = new_code {
                if new_code != old_code {
                    self.vaccines.rekey(&old_code, new_code);
                }
            }

            Ok((self.vaccines.by_id.get(id).unwrap(), None))
        }
    }

    /// Soft delete. Blocked while any dose of the vaccine is still active;
    /// otherwise the row is discontinued and the remaining dose rows are
    /// superseded along with it.
    pub fn vaccine_delete(&mut self, id: &Id, reason: Option<String>) -> Result<(), Error> {
        if !self.vaccines.by_id.contains_key(id) {
            return Err(Error::NotFound(id.clone()));
        }

        let active_doses = self.doses.count_active_for(id);
        if active_doses > 0 {
            return Err(Error::ActiveDoses(active_doses));
        }

        let now = Utc::now();

        let vaccine = self.vaccines.by_id.get_mut(id).unwrap();
        vaccine.status = Status::Discontinued;
        vaccine.valid_until = Some(now);
        vaccine.update_reason = reason.unwrap_or_else(|| "Manual discontinuation".into());
        vaccine.updated_at = now;
        let code = vaccine.cvx_code.clone();

        if let Some(lineage) = self.vaccines.lineages.get_mut(&code) {
            if lineage.current.as_ref() == Some(id) {
                lineage.current = None;
            }
        }

        self.doses.supersede_for_vaccine(id, now);

        Ok(())
    }

    /// Every row sharing the target's name or CVX code, newest version
    /// first, projected to the summary fields.
    pub fn vaccine_history(&self, id: &Id) -> Result<(u32, Vec<VaccineSummary>), Error> {
        let vaccine = self.vaccine_get(id)?;

        let mut rows: Vec<&VaccineProduct> = self
            .vaccines
            .iter()
            .filter(|v| v.name == vaccine.name || v.cvx_code == vaccine.cvx_code)
            .collect();
        rows.sort_by(|a, b| b.version.cmp(&a.version));

        let history = rows.into_iter().map(VaccineSummary::from).collect();

        Ok((vaccine.version, history))
    }
}

fn apply_update(vaccine: &mut VaccineProduct, update: VaccineUpdateParameters) {
    let VaccineUpdateParameters {
        name,
        generic_name,
        manufacturer,
        cvx_code,
        description,
        presentation,
        volume,
        storage_requirements,
        total_doses,
        status,
        approved_regions,
        contraindications,
        update_reason,
    } = update;

    if let Some(name) = name {
        vaccine.name = name;
    }
    if let Some(generic_name) = generic_name {
        vaccine.generic_name = generic_name;
    }
    if let Some(manufacturer) = manufacturer {
        vaccine.manufacturer = manufacturer;
    }
    if let Some(cvx_code) = cvx_code {
        vaccine.cvx_code = cvx_code;
    }
    if let Some(description) = description {
        vaccine.description = description;
    }
    if let Some(presentation) = presentation {
        vaccine.presentation = presentation;
    }
    if let Some(volume) = volume {
        vaccine.volume = volume;
    }
    if let Some(storage_requirements) = storage_requirements {
        vaccine.storage_requirements = storage_requirements;
    }
    if let Some(total_doses) = total_doses {
        vaccine.total_doses = total_doses;
    }
    if let Some(status) = status {
        vaccine.status = status;
    }
    if let Some(approved_regions) = approved_regions {
        vaccine.approved_regions = approved_regions;
    }
    if let Some(contraindications) = contraindications {
        vaccine.contraindications = contraindications;
    }
    if let Some(update_reason) = update_reason {
        vaccine.update_reason = update_reason;
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use resources::{
        dose::{Age, AgeUnit, DoseCreateParameters, Interval},
        vaccine::{ApprovedRegion, Presentation, Volume},
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
            approved_regions: vec![ApprovedRegion {
                country: "LK".into(),
                approval_date: None,
                regulatory_body: None,
            }],
            contraindications: Vec::new(),
        }
    }

    fn dose_args(dose_number: u32) -> DoseCreateParameters {
        DoseCreateParameters {
            dose_number,
            dose_name: None,
            min_age: Age {
                value: 6,
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
    fn create_rejects_duplicate_cvx_code() {
        let mut inner = Inner::default();

        inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap();

        let err = inner
            .vaccine_create(create_args("Flublok", "Influenza", "158"), "tester")
            .unwrap_err();

        assert!(matches!(err, Error::CvxCodeTaken(_)));
    }

    #[test]
    fn minor_update_mutates_in_place() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        let update = VaccineUpdateParameters {
            manufacturer: Some("Other Biotech".into()),
            ..Default::default()
        };
        let (vaccine, previous_version) = inner.vaccine_update(&id, update, "tester").unwrap();

        assert_eq!(previous_version, None);
        assert_eq!(vaccine.version, 1);
        assert_eq!(vaccine.id, id);
        assert_eq!(vaccine.manufacturer, "Other Biotech");
        assert_eq!(inner.vaccines.by_id.len(), 1);
    }

    #[test]
    fn total_doses_update_creates_version() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        let update = VaccineUpdateParameters {
            total_doses: Some(3),
            ..Default::default()
        };
        let (vaccine, previous_version) = inner.vaccine_update(&id, update, "tester").unwrap();
        let new_id = vaccine.id.clone();

        assert_eq!(previous_version, Some(1));
        assert_eq!(vaccine.version, 2);
        assert_eq!(vaccine.total_doses, 3);
        assert_eq!(vaccine.status, Status::Active);
        assert_eq!(vaccine.valid_until, None);
        assert_ne!(new_id, id);

        let old = inner.vaccines.by_id.get(&id).unwrap();
        assert_eq!(old.status, Status::Archived);
        assert!(old.valid_until.is_some());

        assert_eq!(inner.vaccines.by_id.len(), 2);
    }

    #[test]
    fn archived_rows_still_reserve_their_code() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        // versioning update that also moves the lineage to a new code
        let update = VaccineUpdateParameters {
            cvx_code: Some(CvxCode::new("161").unwrap()),
            total_doses: Some(3),
            ..Default::default()
        };
        inner.vaccine_update(&id, update, "tester").unwrap();

        let err = inner
            .vaccine_create(create_args("Flublok", "Influenza", "158"), "tester")
            .unwrap_err();

        assert!(matches!(err, Error::CvxCodeTaken(_)));
    }

    #[test]
    fn lineage_has_at_most_one_current_row() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        let update = VaccineUpdateParameters {
            total_doses: Some(3),
            ..Default::default()
        };
        let (vaccine, _) = inner.vaccine_update(&id, update, "tester").unwrap();
        let second_id = vaccine.id.clone();

        let update = VaccineUpdateParameters {
            status: Some(Status::Pending),
            ..Default::default()
        };
        inner.vaccine_update(&second_id, update, "tester").unwrap();

        let current_rows = inner
            .vaccines
            .iter()
            .filter(|v| v.valid_until.is_none())
            .count();
        assert_eq!(current_rows, 1);

        let code = CvxCode::new("158").unwrap();
        let lineage = inner.vaccines.lineages.get(&code).unwrap();
        assert_eq!(lineage.versions.len(), 3);
        assert!(lineage.current.is_some());
    }

    #[test]
    fn delete_blocked_by_active_doses() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();
        inner.dose_create(&id, dose_args(1)).unwrap();

        let err = inner.vaccine_delete(&id, None).unwrap_err();

        assert!(matches!(err, Error::ActiveDoses(1)));
    }

    #[test]
    fn delete_discontinues_and_supersedes_doses() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();
        let dose_id = inner.dose_create(&id, dose_args(1)).unwrap().id.clone();
        inner.dose_delete(&dose_id).unwrap();

        inner.vaccine_delete(&id, Some("Recalled".into())).unwrap();

        let vaccine = inner.vaccines.by_id.get(&id).unwrap();
        assert_eq!(vaccine.status, Status::Discontinued);
        assert_eq!(vaccine.update_reason, "Recalled");
        assert!(vaccine.valid_until.is_some());

        let code = CvxCode::new("158").unwrap();
        assert!(inner.vaccines.lineages.get(&code).unwrap().current.is_none());
    }

    #[test]
    fn history_is_sorted_by_version_descending() {
        let mut inner = Inner::default();

        let id = inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap()
            .id
            .clone();

        let update = VaccineUpdateParameters {
            total_doses: Some(3),
            ..Default::default()
        };
        inner.vaccine_update(&id, update, "tester").unwrap();

        let (current_version, history) = inner.vaccine_history(&id).unwrap();

        assert_eq!(current_version, 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].version, 2);
        assert_eq!(history[1].version, 1);
    }

    #[test]
    fn list_matches_search_case_insensitively() {
        let mut inner = Inner::default();

        inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap();
        inner
            .vaccine_create(create_args("Afluria", "Influenza", "161"), "tester")
            .unwrap();
        inner
            .vaccine_create(create_args("Rotarix", "Rotavirus", "119"), "tester")
            .unwrap();

        // "FLU" hits both influenza vaccines by name, result sorted by name
        let filters = VaccineFilters {
            search: Some("FLU".into()),
            ..Default::default()
        };
        let vaccines = inner.vaccine_list(&filters).unwrap();

        assert_eq!(vaccines.len(), 2);
        assert_eq!(vaccines[0].name, "Afluria");
        assert_eq!(vaccines[1].name, "Fluarix");

        // generic names are searched as well
        let filters = VaccineFilters {
            search: Some("rotavirus".into()),
            ..Default::default()
        };
        let vaccines = inner.vaccine_list(&filters).unwrap();

        assert_eq!(vaccines.len(), 1);
        assert_eq!(vaccines[0].name, "Rotarix");
    }

    #[test]
    fn list_with_no_match_is_an_error() {
        let mut inner = Inner::default();

        inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap();

        let filters = VaccineFilters {
            search: Some("polio".into()),
            ..Default::default()
        };

        assert!(matches!(
            inner.vaccine_list(&filters),
            Err(Error::NoneMatching)
        ));
    }

    #[test]
    fn list_filters_by_region() {
        let mut inner = Inner::default();

        inner
            .vaccine_create(create_args("Fluarix", "Influenza", "158"), "tester")
            .unwrap();

        let filters = VaccineFilters {
            region: Some("LK".into()),
            ..Default::default()
        };
        assert_eq!(inner.vaccine_list(&filters).unwrap().len(), 1);

        let filters = VaccineFilters {
            region: Some("US".into()),
            ..Default::default()
        };
        assert!(inner.vaccine_list(&filters).is_err());
    }
}
