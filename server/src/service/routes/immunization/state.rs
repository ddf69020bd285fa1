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
    immunization::{ImmunizationCreateParameters, ImmunizationUpdateParameters},
    primitives::Id,
    ImmunizationLog,
};

use crate::state::Inner;

use super::Error;

#[derive(Default)]
pub struct Immunizations {
    by_id: HashMap<Id, ImmunizationLog>,
    by_user: HashMap<Id, Vec<Id>>,
}

impl Immunizations {
    pub fn insert(&mut self, log: ImmunizationLog) {
        let id = log.id.clone();
        let user_id = log.user_id.clone();

        match self.by_id.entry(id.clone()) {
            Entry::Occupied(e) => {
                panic!("Log with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(log);
            }
        }

        self.by_user.entry(user_id).or_default().push(id);
    }

    pub fn get_by_id(&self, id: &Id) -> Option<&ImmunizationLog> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImmunizationLog> {
        self.by_id.values()
    }
}

impl Inner {
    pub fn immunization_create(
        &mut self,
        args: ImmunizationCreateParameters,
    ) -> Result<&ImmunizationLog, Error> {
        if self.users.get_by_id(&args.user_id).is_none() {
            return Err(Error::UnknownUser(args.user_id));
        }

        if self.vaccines.get_by_id(&args.vaccine_id).is_none() {
            return Err(Error::UnknownVaccine(args.vaccine_id));
        }

        let now = Utc::now();
        let id = Id::generate().unwrap();

        let log = ImmunizationLog {
            id: id.clone(),
            user_id: args.user_id,
            vaccine_id: args.vaccine_id,
            date_administered: args.date_administered,
            dose_number: args.dose_number,
            next_due_date: args.next_due_date,
            clinic: args.clinic,
            notes: args.notes,
            digital_certificate: args.digital_certificate,
            created_at: now,
            updated_at: now,
        };

        self.immunizations.insert(log);

        Ok(self.immunizations.by_id.get(&id).unwrap())
    }

    /// Admins read the whole log; everyone else only their own entries.
    pub fn immunization_list(&self, user_id: Option<&Id>) -> Vec<&ImmunizationLog> {
        let mut logs: Vec<&ImmunizationLog> = match user_id {
            Some(user_id) => self
                .immunizations
                .by_user
                .get(user_id)
                .into_iter()
                .flatten()
                .map(|id| self.immunizations.by_id.get(id).unwrap())
                .collect(),
            None => self.immunizations.iter().collect(),
        };

        logs.sort_by(|a, b| b.date_administered.cmp(&a.date_administered));

        logs
    }

    pub fn immunization_get(&self, id: &Id) -> Result<&ImmunizationLog, Error> {
        self.immunizations
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    pub fn immunization_update(
        &mut self,
        id: &Id,
        update: ImmunizationUpdateParameters,
    ) -> Result<&ImmunizationLog, Error> {
        let log = self
            .immunizations
            .by_id
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        if let Some(date_administered) = update.date_administered {
            log.date_administered = date_administered;
        }
        if let Some(dose_number) = update.dose_number {
            log.dose_number = dose_number;
        }
        if let Some(next_due_date) = update.next_due_date {
            log.next_due_date = Some(next_due_date);
        }
        if let Some(clinic) = update.clinic {
            log.clinic = clinic;
        }
        if let Some(notes) = update.notes {
            log.notes = Some(notes);
        }
        if let Some(digital_certificate) = update.digital_certificate {
            log.digital_certificate = Some(digital_certificate);
        }
        log.updated_at = Utc::now();

        Ok(&*log)
    }

    pub fn immunization_delete(&mut self, id: &Id) -> Result<(), Error> {
        let log = self
            .immunizations
            .by_id
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        if let Some(ids) = self.immunizations.by_user.get_mut(&log.user_id) {
            ids.retain(|other| other != id);
        }

        Ok(())
    }
}
