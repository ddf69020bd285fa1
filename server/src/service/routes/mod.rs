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

pub mod appointment;
pub mod clinic;
pub mod dose;
pub mod health;
pub mod immunization;
pub mod user;
pub mod vaccine;

use actix_web::web::ServiceConfig;

pub use appointment::Appointments;
pub use clinic::Clinics;
pub use dose::Doses;
pub use immunization::Immunizations;
pub use user::Users;
pub use vaccine::Vaccines;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    health::configure_routes(cfg);
    user::configure_routes(cfg);
    vaccine::configure_routes(cfg);
    dose::configure_routes(cfg);
    clinic::configure_routes(cfg);
    appointment::configure_routes(cfg);
    immunization::configure_routes(cfg);
}
