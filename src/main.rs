// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

#[macro_use]
mod logger;

mod cli;
mod error;
mod frontend;
mod parser;
mod project;

use cli::{Action, Cli};
use error::ExportWarning;

fn main() {
    let cli = Cli::new();
    let action = cli.get_action();

    if action == Action::Help {
        cli.print_help();
        return;
    }

    let paths = cli.config_paths(&action);
    if paths.is_empty() {
        cli.print_help();
        fatal!("No export config provided");
    }

    let config = match parser::load(&paths) {
        Ok(config) => config,
        Err(e) => fatal!("{}", e),
    };

    let result: error::Result<Vec<ExportWarning>> = match &action {
        Action::Export => frontend::export(&config),
        Action::Manifest => frontend::export_manifest(&config).map(|path| {
            info!(" Manifest written to {}", path.display());
            Vec::new()
        }),
        Action::Names => frontend::export_project_names(&config).map(|_| Vec::new()),
        Action::Packs => frontend::export_asset_packs(&config),
        Action::Stage(dir) => frontend::stage(&config, dir).map(|_| Vec::new()),
        Action::Clean => frontend::clean(&config).map(|_| Vec::new()),
        Action::Help => Ok(Vec::new()),
    };

    match result {
        Ok(warnings) => {
            for warning in &warnings {
                warn!("{}", warning);
            }

            if warnings.is_empty() {
                task!("Done");
            } else {
                task!("Done with {} warning(s)", warnings.len());
            }
        }
        Err(e) => fatal!("{}", e),
    }
}
