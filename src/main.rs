// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use luxbudget::{cli, commands, db, ledger::Ledger, store::StateStore};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    init_logger(level);

    let path = match matches.get_one::<PathBuf>("store") {
        Some(p) => p.clone(),
        None => db::db_path()?,
    };
    debug!("Using state store at {}", path.display());
    let mut ledger = Ledger::open(StateStore::new(db::SqliteStore::open(&path)?));
    let today = chrono::Local::now().date_naive();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("State store ready at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub, today)?,
        Some(("budget", sub)) => commands::budgets::handle(ledger.snapshot(), sub, today)?,
        Some(("report", sub)) => commands::reports::handle(ledger.snapshot(), sub, today)?,
        Some(("goal", sub)) => commands::goal::handle(&mut ledger, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(ledger.snapshot(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// RUST_LOG wins when set; otherwise `level` applies to this crate only.
fn init_logger(level: &str) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
