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

use std::fs::File;
use std::path::PathBuf;

use actix_rt::System;
use log::info;
use structopt::StructOpt;

use vaccination_record_server::{
    error::Error,
    logging::init_logger,
    service::{Service, TokenKey},
    state::State,
};

fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    init_logger(&opts.log_config)?;

    let mut system = System::new("vaccination-record-server");

    system.block_on(async move {
        let state = State::new();

        if let Some(path) = &opts.state {
            if path.is_file() {
                let file = File::open(path)?;
                state.lock().await.load(file)?;

                info!(target: "vaccination_record_server", "State loaded from {}", path.display());
            }
        }

        let token_key = TokenKey::from_secret(&opts.token_secret);

        Service::new(state.clone(), token_key)
            .listen(&opts.server_addr)?
            .run()?
            .await?;

        if let Some(path) = &opts.state {
            let file = File::create(path)?;
            state.lock().await.save(file)?;

            info!(target: "vaccination_record_server", "State saved to {}", path.display());
        }

        Ok(())
    })
}

#[derive(Clone, StructOpt)]
struct Options {
    #[structopt(short = "c", long = "config", default_value = "./log4rs.yml")]
    log_config: PathBuf,

    #[structopt(short = "l", long = "listen", default_value = "[::]:3000")]
    server_addr: String,

    #[structopt(
        short = "s",
        long = "token-secret",
        env = "TOKEN_SECRET",
        hide_env_values = true
    )]
    token_secret: String,

    #[structopt(long = "state")]
    state: Option<PathBuf>,
}
