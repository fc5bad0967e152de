// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::export::{write_json, write_transactions_csv};
use crate::models::Snapshot;
use crate::utils::arg;
use anyhow::Result;
use std::path::Path;

pub fn handle(snapshot: &Snapshot, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => {
            let out = arg(sub, "out")?;
            write_json(snapshot, Path::new(out))?;
            println!("Exported snapshot to {}", out);
        }
        Some(("csv", sub)) => {
            let out = arg(sub, "out")?;
            write_transactions_csv(&snapshot.transactions, Path::new(out))?;
            println!(
                "Exported {} transactions to {}",
                snapshot.transactions.len(),
                out
            );
        }
        _ => {}
    }
    Ok(())
}
