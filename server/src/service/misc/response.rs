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

use actix_web::{dev::HttpResponseBuilder, http::StatusCode, HttpResponse};
use serde::Serialize;

/// Response envelope used by every route: `{success, data, message?}`
/// plus `count` for lists and `previousVersion` for versioning updates.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<u32>,

    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            previous_version: None,
            data,
        }
    }

    pub fn message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = Some(message.into());

        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);

        self
    }

    pub fn previous_version(mut self, version: u32) -> Self {
        self.previous_version = Some(version);

        self
    }

    pub fn respond(self) -> HttpResponse {
        self.respond_with(StatusCode::OK)
    }

    pub fn respond_with(self, status: StatusCode) -> HttpResponse {
        HttpResponseBuilder::new(status).json(&self)
    }
}
