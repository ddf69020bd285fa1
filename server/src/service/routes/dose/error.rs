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

use resources::primitives::Id;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Dose requirement not found: {0}")]
    NotFound(Id),

    #[error("Vaccine not found: {0}")]
    VaccineNotFound(Id),

    #[error("Dose {0} already exists for this vaccine")]
    Duplicate(u32),

    #[error("No dose requirements found for this vaccine")]
    NoneForVaccine(Id),

    #[error("Dose requirements not found")]
    NoActiveRequirement { vaccine_id: Id, dose_number: u32 },
}
