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
    appointment::{AppointmentCreateParameters, AppointmentUpdateParameters},
    primitives::Id,
    Appointment,
};

use crate::state::Inner;

use super::Error;

#[derive(Default)]
pub struct Appointments {
    by_id: HashMap<Id, Appointment>,
}

impl Appointments {
    pub fn insert(&mut self, appointment: Appointment) {
        match self.by_id.entry(appointment.id.clone()) {
            Entry::Occupied(e) => {
                panic!("Appointment with this ID ({}) does already exist!", e.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(appointment);
            }
        }
    }

    pub fn get_by_id(&self, id: &Id) -> Option<&Appointment> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.by_id.values()
    }
}

impl Inner {
    pub fn appointment_create(
        &mut self,
        args: AppointmentCreateParameters,
    ) -> Result<&Appointment, Error> {
        let now = Utc::now();
        let id = Id::generate().unwrap();

        let appointment = Appointment {
            id: id.clone(),
            full_name: args.full_name,
            email: args.email.trim().to_lowercase(),
            phone: args.phone,
            vaccine_type: args.vaccine_type,
            dose_number: args.dose_number,
            age_group: args.age_group,
            appointment_date: args.appointment_date,
            appointment_time: args.appointment_time,
            created_at: now,
            updated_at: now,
        };

        self.appointments.insert(appointment);

        Ok(self.appointments.by_id.get(&id).unwrap())
    }

    pub fn appointment_list(&self) -> Result<Vec<&Appointment>, Error> {
        let mut appointments: Vec<_> = self.appointments.iter().collect();

        if appointments.is_empty() {
            return Err(Error::NoneFound);
        }

        appointments.sort_by_key(|a| a.appointment_date);

        Ok(appointments)
    }

    pub fn appointment_get(&self, id: &Id) -> Result<&Appointment, Error> {
        self.appointments
            .by_id
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    pub fn appointment_update(
        &mut self,
        id: &Id,
        update: AppointmentUpdateParameters,
    ) -> Result<&Appointment, Error> {
        let appointment = self
            .appointments
            .by_id
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        if let Some(full_name) = update.full_name {
            appointment.full_name = full_name;
        }
        if let Some(email) = update.email {
            appointment.email = email.trim().to_lowercase();
        }
        if let Some(phone) = update.phone {
            appointment.phone = phone;
        }
        if let Some(vaccine_type) = update.vaccine_type {
            appointment.vaccine_type = vaccine_type;
        }
        if let Some(dose_number) = update.dose_number {
            appointment.dose_number = dose_number;
        }
        if let Some(age_group) = update.age_group {
            appointment.age_group = age_group;
        }
        if let Some(appointment_date) = update.appointment_date {
            appointment.appointment_date = appointment_date;
        }
        if let Some(appointment_time) = update.appointment_time {
            appointment.appointment_time = appointment_time;
        }
        appointment.updated_at = Utc::now();

        Ok(&*appointment)
    }

    pub fn appointment_delete(&mut self, id: &Id) -> Result<(), Error> {
        self.appointments
            .by_id
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(id.clone()))
    }
}
