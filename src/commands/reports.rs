// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{
    SpendingComparison, category_breakdown, dashboard, month_anchor, monthly_series,
};
use crate::models::Snapshot;
use crate::utils::{fmt_percent, format_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(snapshot: &Snapshot, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(snapshot, sub, anchor(sub, today))?,
        Some(("trend", sub)) => trend(snapshot, sub)?,
        Some(("categories", sub)) => categories(snapshot, sub, anchor(sub, today))?,
        _ => {}
    }
    Ok(())
}

fn anchor(sub: &clap::ArgMatches, today: NaiveDate) -> NaiveDate {
    match sub.get_one::<i32>("month-offset").copied().unwrap_or(0) {
        0 => today,
        offset => month_anchor(today, offset),
    }
}

pub fn describe_comparison(c: &SpendingComparison, ccy: &str) -> String {
    match c {
        SpendingComparison::NoSpending => "No spending yet.".to_string(),
        SpendingComparison::Increased(d) => format!(
            "Spending increased by {} vs last month.",
            format_currency(*d, ccy)
        ),
        SpendingComparison::Decreased(d) => format!(
            "Spending decreased by {} vs last month.",
            format_currency(*d, ccy)
        ),
        SpendingComparison::Unchanged => "Spending is the same as last month.".to_string(),
    }
}

fn summary(snapshot: &Snapshot, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let d = dashboard(snapshot, today);
    if !maybe_print_json(json_flag, jsonl_flag, &d)? {
        let ccy = snapshot.settings.currency.as_str();
        let top = match &d.top_category {
            Some((cat, amt)) => format!("{} ({})", cat, format_currency(*amt, ccy)),
            None => "–".to_string(),
        };
        let data = vec![
            vec!["Balance".into(), format_currency(d.totals.balance, ccy)],
            vec!["Total income".into(), format_currency(d.totals.income, ccy)],
            vec!["Total expenses".into(), format_currency(d.totals.expenses, ccy)],
            vec!["Income this month".into(), format_currency(d.this_month.income, ccy)],
            vec![
                "Expenses this month".into(),
                format_currency(d.this_month.expenses, ccy),
            ],
            vec!["Savings rate".into(), fmt_percent(d.savings_rate)],
            vec!["Budget remaining".into(), format_currency(d.budget_remaining, ccy)],
            vec!["Vs last month".into(), describe_comparison(&d.comparison, ccy)],
            vec!["Top category".into(), top],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}

fn trend(snapshot: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let series = monthly_series(&snapshot.transactions);
    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let ccy = snapshot.settings.currency.as_str();
        let data: Vec<Vec<String>> = series
            .iter()
            .map(|(m, flow)| {
                vec![
                    m.clone(),
                    format_currency(flow.income, ccy),
                    format_currency(flow.expense, ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn categories(snapshot: &Snapshot, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = category_breakdown(&snapshot.transactions, today);
    if !maybe_print_json(json_flag, jsonl_flag, &items)? {
        let ccy = snapshot.settings.currency.as_str();
        let data: Vec<Vec<String>> = items
            .into_iter()
            .map(|(cat, amt)| vec![cat, format_currency(amt, ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}
