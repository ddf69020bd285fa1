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

use std::io::{Read, Write};

use resources::{Appointment, Clinic, DoseRequirement, ImmunizationLog, User, VaccineProduct};
use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer};

use crate::error::Error;

use super::Inner;

#[derive(Default, Serialize, Deserialize)]
struct Data {
    vaccines: Vec<VaccineProduct>,
    doses: Vec<DoseRequirement>,
    users: Vec<User>,
    clinics: Vec<Clinic>,
    appointments: Vec<Appointment>,
    immunizations: Vec<ImmunizationLog>,
}

impl Inner {
    pub fn load<R>(&mut self, reader: R) -> Result<(), Error>
    where
        R: Read,
    {
        let data: Data = from_reader(reader)?;

        for vaccine in data.vaccines {
            self.vaccines.insert(vaccine);
        }

        for dose in data.doses {
            self.doses.insert(dose);
        }

        for user in data.users {
            self.users.insert(user);
        }

        for clinic in data.clinics {
            self.clinics.insert(clinic);
        }

        for appointment in data.appointments {
            self.appointments.insert(appointment);
        }

        for immunization in data.immunizations {
            self.immunizations.insert(immunization);
        }

        Ok(())
    }

    pub fn save<W>(&self, writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        let mut data = Data {
            vaccines: self.vaccines.iter().cloned().collect(),
            doses: self.doses.iter().cloned().collect(),
            users: self.users.iter().cloned().collect(),
            clinics: self.clinics.iter().cloned().collect(),
            appointments: self.appointments.iter().cloned().collect(),
            immunizations: self.immunizations.iter().cloned().collect(),
        };

        data.vaccines.sort_by(|a, b| a.id.cmp(&b.id));
        data.doses.sort_by(|a, b| a.id.cmp(&b.id));
        data.users.sort_by(|a, b| a.id.cmp(&b.id));
        data.clinics.sort_by(|a, b| a.id.cmp(&b.id));
        data.appointments.sort_by(|a, b| a.id.cmp(&b.id));
        data.immunizations.sort_by(|a, b| a.id.cmp(&b.id));

        to_writer(writer, &data)?;

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use resources::{
        dose::{Age, AgeUnit, DoseCreateParameters, Interval},
        misc::CvxCode,
        vaccine::{Presentation, VaccineCreateParameters, Volume},
    };

    #[test]
    fn save_load_roundtrip() {
        let mut inner = Inner::default();

        let vaccine_id = inner
            .vaccine_create(
                VaccineCreateParameters {
                    name: "Fluarix".into(),
                    generic_name: "Influenza".into(),
                    manufacturer: "GSK".into(),
                    cvx_code: CvxCode::new("158").unwrap(),
                    description: String::new(),
                    presentation: Presentation::PrefilledSyringe,
                    volume: Volume {
                        value: 0.5,
                        unit: "mL".into(),
                    },
                    storage_requirements: Default::default(),
                    total_doses: 2,
                    approved_regions: Vec::new(),
                    contraindications: Vec::new(),
                },
                "tester",
            )
            .unwrap()
            .id
            .clone();

        inner
            .dose_create(
                &vaccine_id,
                DoseCreateParameters {
                    dose_number: 1,
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
                },
            )
            .unwrap();

        let mut buffer = Vec::new();
        inner.save(&mut buffer).unwrap();

        let mut restored = Inner::default();
        restored.load(&buffer[..]).unwrap();

        let mut second = Vec::new();
        restored.save(&mut second).unwrap();

        assert_eq!(buffer, second);
    }
}
