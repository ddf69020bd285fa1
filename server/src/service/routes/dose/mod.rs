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

mod calculate;
mod create;
mod delete;
mod error;
mod get;
mod state;
mod update;

pub use error::Error;
pub use state::Doses;

use actix_web::web::{delete, get, post, put, resource, ServiceConfig};

use calculate::calculate;
use create::create;
use delete::remove;
use get::{get_all, get_one};
use update::update;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(resource("/doses/calculate").route(post().to(calculate)));
    cfg.service(
        resource("/doses/vaccine/{vaccine_id}")
            .route(post().to(create))
            .route(get().to(get_all)),
    );
    cfg.service(
        resource("/doses/{id}")
            .route(get().to(get_one))
            .route(put().to(update))
            .route(delete().to(remove)),
    );
}
