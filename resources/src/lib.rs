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

#[macro_use]
extern crate lazy_static;

pub mod appointment;
pub mod clinic;
pub mod dose;
pub mod immunization;
pub mod misc;
pub mod primitives;
pub mod user;
pub mod vaccine;

pub use appointment::Appointment;
pub use clinic::Clinic;
pub use dose::DoseRequirement;
pub use immunization::ImmunizationLog;
pub use user::User;
pub use vaccine::VaccineProduct;
