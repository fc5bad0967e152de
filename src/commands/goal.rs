// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::goal::{caption, display_percent, is_reached, progress_percent};
use crate::ledger::Ledger;
use crate::models::{Goal, Snapshot};
use crate::store::KvStore;
use crate::utils::{arg, fmt_percent, format_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("show", sub)) => show(ledger.snapshot(), sub)?,
        _ => {}
    }
    Ok(())
}

fn set<S: KvStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let goal = ledger.set_goal(arg(sub, "name")?, arg(sub, "target")?)?;
    let ccy = &ledger.snapshot().settings.currency;
    println!(
        "Goal '{}' set: {} of {} saved",
        goal.name,
        format_currency(goal.saved, ccy),
        format_currency(goal.target, ccy)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalView {
    pub name: String,
    pub target: Decimal,
    pub saved: Decimal,
    pub progress_percent: Decimal,
    pub reached: bool,
}

pub fn goal_view(goal: &Goal) -> GoalView {
    GoalView {
        name: goal.name.clone(),
        target: goal.target,
        saved: goal.saved,
        progress_percent: progress_percent(goal),
        reached: is_reached(goal),
    }
}

fn show(snapshot: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let Some(goal) = &snapshot.goal else {
        println!("No savings goal set.");
        return Ok(());
    };
    let view = goal_view(goal);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        let ccy = &snapshot.settings.currency;
        let data = vec![vec![
            goal.name.clone(),
            format!(
                "{} / {}",
                format_currency(goal.saved, ccy),
                format_currency(goal.target, ccy)
            ),
            fmt_percent(display_percent(goal)),
        ]];
        println!("{}", pretty_table(&["Goal", "Saved / Target", "Progress"], data));
        println!("{}", caption(goal));
    }
    Ok(())
}
