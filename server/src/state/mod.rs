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

mod persist;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::service::{Appointments, Clinics, Doses, Immunizations, Users, Vaccines};

/// Shared handle to the in-memory store. All mutation happens through
/// `Inner` methods while the single lock is held, so multi-step updates
/// like a version bump are atomic from the point of view of other
/// requests.
#[derive(Clone, Default)]
pub struct State {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
pub struct Inner {
    pub(super) vaccines: Vaccines,
    pub(super) doses: Doses,
    pub(super) users: Users,
    pub(super) clinics: Clinics,
    pub(super) appointments: Appointments,
    pub(super) immunizations: Immunizations,
}

impl State {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().await
    }
}
