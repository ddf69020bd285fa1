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

mod delete;
mod error;
mod get;
mod login;
mod register;
mod state;
mod update;

pub use error::Error;
pub use state::Users;

use actix_web::web::{delete, get, post, put, resource, ServiceConfig};

use delete::remove;
use get::{get_all, get_one};
use login::login;
use register::register;
use update::{update, update_profile};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(resource("/users/register").route(post().to(register)));
    cfg.service(resource("/users/login").route(post().to(login)));
    cfg.service(resource("/users/profile").route(put().to(update_profile)));
    cfg.service(resource("/users").route(get().to(get_all)));
    cfg.service(
        resource("/users/{id}")
            .route(get().to(get_one))
            .route(put().to(update))
            .route(delete().to(remove)),
    );
}
