// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{BudgetStatus, budget_status, budget_usage};
use crate::models::Snapshot;
use crate::utils::{fmt_percent, format_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(snapshot: &Snapshot, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => status(snapshot, sub, today)?,
        _ => {}
    }
    Ok(())
}

pub fn status_rows(snapshot: &Snapshot, today: NaiveDate) -> Vec<BudgetStatus> {
    let usage = budget_usage(&snapshot.transactions, &snapshot.budgets, today);
    budget_status(&snapshot.budgets, &usage)
}

fn status(snapshot: &Snapshot, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = status_rows(snapshot, today);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = &snapshot.settings.currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    format!(
                        "{} / {}",
                        format_currency(s.spent, ccy),
                        format_currency(s.limit, ccy)
                    ),
                    fmt_percent(s.display_percent()),
                    s.level.alert().unwrap_or("").to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent / Limit", "Used", "Alert"], rows)
        );
    }
    Ok(())
}
