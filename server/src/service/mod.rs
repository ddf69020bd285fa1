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

mod error;
mod header;
mod misc;
mod routes;

use std::net::{SocketAddr, ToSocketAddrs};

use actix_web::{
    dev::Server,
    error::{Error as ActixError, JsonPayloadError},
    middleware::Logger,
    web::JsonConfig,
    App, HttpRequest, HttpServer,
};

use crate::{error::Error, state::State};

pub use error::{AsReqErr, AsReqErrResult, RequestError};
pub use misc::{AccessToken, AccessTokenError, Envelope, TokenKey};
pub use routes::{Appointments, Clinics, Doses, Immunizations, Users, Vaccines};

use routes::configure_routes;

pub struct Service {
    state: State,
    token_key: TokenKey,
    addresses: Vec<SocketAddr>,
}

impl Service {
    pub fn new(state: State, token_key: TokenKey) -> Self {
        Self {
            state,
            token_key,
            addresses: Vec::new(),
        }
    }

    pub fn listen<T: ToSocketAddrs>(mut self, addrs: T) -> Result<Self, Error> {
        for addr in addrs.to_socket_addrs()? {
            self.addresses.push(addr);
        }

        Ok(self)
    }

    pub fn run(self) -> Result<Server, Error> {
        let Self {
            state,
            token_key,
            addresses,
        } = self;

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .app_data(token_key.clone())
                .app_data(json_config())
                .data(state.clone())
                .configure(configure_routes)
        });

        for addr in addresses {
            server = server.bind(addr)?;
        }

        Ok(server.run())
    }
}

fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> ActixError {
    RequestError::Validation(err.to_string()).into()
}
