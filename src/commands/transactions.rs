// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{Ledger, LedgerError};
use crate::models::{Snapshot, TransactionDraft, TransactionKind};
use crate::query::{SortDirection, SortField, SortSpec, TxQuery, TypeFilter};
use crate::store::KvStore;
use crate::utils::{arg, format_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KvStore>(
    ledger: &mut Ledger<S>,
    m: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub, today)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub)?,
        Some(("list", sub)) => list(ledger.snapshot(), sub)?,
        _ => {}
    }
    Ok(())
}

/// Layers the given command-line fields over `base`.
pub fn draft_from_args(sub: &clap::ArgMatches, base: TransactionDraft) -> Result<TransactionDraft> {
    let mut draft = base;
    if let Some(kind) = sub.get_one::<String>("type") {
        draft.kind = kind.parse::<TransactionKind>()?;
    }
    let text_fields = [
        ("amount", &mut draft.amount),
        ("category", &mut draft.category),
        ("date", &mut draft.date),
        ("method", &mut draft.payment_method),
        ("desc", &mut draft.description),
    ];
    for (name, slot) in text_fields {
        if let Some(v) = sub.get_one::<String>(name) {
            *slot = v.clone();
        }
    }
    Ok(draft)
}

fn add<S: KvStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let base = TransactionDraft {
        date: today.format("%Y-%m-%d").to_string(),
        payment_method: "Card".to_string(),
        ..TransactionDraft::default()
    };
    let draft = draft_from_args(sub, base)?;
    let currency = ledger.snapshot().settings.currency.clone();
    let tx = ledger.add_transaction(&draft)?;
    println!(
        "Recorded {} of {} in '{}' on {} (id: {})",
        tx.kind,
        format_currency(tx.amount, &currency),
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

fn edit<S: KvStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    let base = ledger
        .snapshot()
        .find_transaction(id)
        .map(TransactionDraft::from_transaction)
        .ok_or_else(|| LedgerError::UnknownTransaction(id.to_string()))?;
    let draft = draft_from_args(sub, base)?;
    let tx = ledger.edit_transaction(id, &draft)?;
    println!("Updated {} ({} {} in '{}')", tx.id, tx.kind, tx.amount, tx.category);
    Ok(())
}

fn remove<S: KvStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    let removed = ledger.delete_transaction(id)?;
    println!(
        "Deleted {} ({} {} on {})",
        removed.id, removed.kind, removed.amount, removed.date
    );
    Ok(())
}

fn opt<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(String::as_str)
}

pub fn query_from_args(sub: &clap::ArgMatches) -> Result<TxQuery> {
    let type_filter = match opt(sub, "type") {
        Some(s) => TypeFilter::try_from(s)?,
        None => TypeFilter::default(),
    };
    Ok(TxQuery {
        type_filter,
        search_text: opt(sub, "search").unwrap_or_default().to_string(),
        sort: SortSpec {
            field: opt(sub, "sort").map(SortField::from).unwrap_or_default(),
            direction: opt(sub, "dir").map(SortDirection::from).unwrap_or_default(),
        },
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub payment_method: String,
    pub description: String,
    pub amount: Decimal,
}

pub fn query_rows(snapshot: &Snapshot, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let query = query_from_args(sub)?;
    let rows = query
        .apply(&snapshot.transactions)
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.format("%Y-%m-%d").to_string(),
            kind: t.kind,
            category: t.category.clone(),
            payment_method: t.payment_method.clone(),
            description: t.description.clone(),
            amount: t.amount,
        })
        .collect();
    Ok(rows)
}

fn or_dash(s: &str) -> String {
    if s.is_empty() { "-".to_string() } else { s.to_string() }
}

fn list(snapshot: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(snapshot, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = &snapshot.settings.currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = match r.kind {
                    TransactionKind::Expense => "-",
                    TransactionKind::Income => "+",
                };
                vec![
                    r.date.clone(),
                    or_dash(&r.description),
                    r.category.clone(),
                    or_dash(&r.payment_method),
                    format!("{}{}", sign, format_currency(r.amount, ccy)),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Category", "Method", "Amount", "Id"],
                rows,
            )
        );
    }
    Ok(())
}
