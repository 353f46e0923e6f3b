// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use classconnect::{cli, commands, config::Config, storage};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli::build_cli().get_matches();
    let config = Config::resolve(matches.get_one::<PathBuf>("data").map(PathBuf::as_path))?;
    debug!("Using data file {}", config.data_path.display());

    match matches.subcommand() {
        Some(("init", _)) => {
            storage::init(&config.data_path)?;
            println!("Address book initialized at {}", config.data_path.display());
        }
        Some(("exec", sub)) => commands::shell::exec(&config, sub)?,
        Some(("shell", _)) => commands::shell::interactive(&config)?,
        Some(("list", sub)) => {
            let book = storage::load(&config.data_path)?;
            commands::listing::handle(&book, sub)?;
        }
        Some(("export", sub)) => {
            let book = storage::load(&config.data_path)?;
            commands::exporter::handle(&book, sub)?;
        }
        Some(("doctor", _)) => commands::doctor::handle(&config.data_path)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
