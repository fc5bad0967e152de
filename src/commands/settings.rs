// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::store::KvStore;
use crate::utils::{arg, pretty_table};
use anyhow::Result;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let s = &ledger.snapshot().settings;
            let data = vec![
                vec!["currency".to_string(), s.currency.clone()],
                vec![
                    "dark mode".to_string(),
                    if s.dark_mode { "on" } else { "off" }.to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
        Some(("currency", sub)) => {
            ledger.set_currency(arg(sub, "code")?)?;
            println!("Currency set to {}", ledger.snapshot().settings.currency);
        }
        Some(("dark-mode", sub)) => {
            let on = match arg(sub, "mode")? {
                "on" => {
                    ledger.set_dark_mode(true);
                    true
                }
                "off" => {
                    ledger.set_dark_mode(false);
                    false
                }
                _ => ledger.toggle_dark_mode(),
            };
            println!("Dark mode {}", if on { "on" } else { "off" });
        }
        _ => {}
    }
    Ok(())
}
