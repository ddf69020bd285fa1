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
    clinic::{ClinicCreateParameters, ClinicUpdateParameters},
    primitives::Id,
    Clinic,
};

use crate::state::Inner;

use super::Error;

#[derive(Default)]
pub struct Clinics {
    by_id: HashMap<Id, Clinic>,
}

impl Clinics {
    pub fn insert(&mut self, clinic: Clinic) {
        match self.by_id.entry(clinic.id.clone()) {
            Entry::Occupied(e) => {
                panic!("Clinic with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(clinic);
            }
        }
    }

    pub fn get_by_id(&self, id: &Id) -> Option<&Clinic> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clinic> {
        self.by_id.values()
    }
}

impl Inner {
    pub fn clinic_create(&mut self, args: ClinicCreateParameters) -> Result<&Clinic, Error> {
        let now = Utc::now();
        let id = Id::generate().unwrap();

        let clinic = Clinic {
            id: id.clone(),
            clinic_name: args.clinic_name,
            address: args.address,
            city: args.city,
            district: args.district,
            phone: args.phone,
            email: args.email.trim().to_lowercase(),
            clinic_type: args.clinic_type,
            description: args.description,
            open_days: args.open_days,
            open_time: args.open_time,
            close_time: args.close_time,
            created_at: now,
            updated_at: now,
        };

        self.clinics.insert(clinic);

        Ok(self.clinics.by_id.get(&id).unwrap())
    }

    pub fn clinic_list(&self) -> Result<Vec<&Clinic>, Error> {
        let mut clinics: Vec<_> = self.clinics.iter().collect();

        if clinics.is_empty() {
            return Err(Error::NoneFound);
        }

        clinics.sort_by(|a, b| a.clinic_name.cmp(&b.clinic_name));

        Ok(clinics)
    }

    pub fn clinic_get(&self, id: &Id) -> Result<&Clinic, Error> {
        self.clinics
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    pub fn clinic_update(
        &mut self,
        id: &Id,
        update: ClinicUpdateParameters,
    ) -> Result<&Clinic, Error> {
        let clinic = self
            .clinics
            .by_id
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        if let Some(clinic_name) = update.clinic_name {
            clinic.clinic_name = clinic_name;
        }
        if let Some(address) = update.address {
            clinic.address = address;
        }
        if let Some(city) = update.city {
            clinic.city = city;
        }
        if let Some(district) = update.district {
            clinic.district = district;
        }
        if let Some(phone) = update.phone {
            clinic.phone = phone;
        }
        if let Some(email) = update.email {
            clinic.email = email.trim().to_lowercase();
        }
        if let Some(clinic_type) = update.clinic_type {
            clinic.clinic_type = clinic_type;
        }
        if let Some(description) = update.description {
            clinic.description = description;
        }
        if let Some(open_days) = update.open_days {
            clinic.open_days = open_days;
        }
        if let Some(open_time) = update.open_time {
            clinic.open_time = open_time;
        }
        if let Some(close_time) = update.close_time {
            clinic.close_time = close_time;
        }
        clinic.updated_at = Utc::now();

        Ok(&*clinic)
    }

    pub fn clinic_delete(&mut self, id: &Id) -> Result<(), Error> {
        self.clinics
            .by_id
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(id.clone()))
    }
}
