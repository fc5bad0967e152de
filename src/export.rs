// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Snapshot, Transaction};
use anyhow::{Context, Result};
use std::path::Path;

pub const DEFAULT_EXPORT_FILE: &str = "luxbudget-data.json";

/// Pretty-printed JSON with exactly the snapshot's shape.
pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")
}

pub fn write_json(snapshot: &Snapshot, out: &Path) -> Result<()> {
    let body = to_json(snapshot)?;
    std::fs::write(out, body).with_context(|| format!("Failed to write {}", out.display()))
}

pub fn write_transactions_csv(transactions: &[Transaction], out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    wtr.write_record([
        "id",
        "date",
        "type",
        "category",
        "amount",
        "paymentMethod",
        "description",
    ])?;
    for t in transactions {
        let date = t.date.format("%Y-%m-%d").to_string();
        let amount = t.amount.to_string();
        wtr.write_record([
            t.id.as_str(),
            date.as_str(),
            t.kind.as_str(),
            t.category.as_str(),
            amount.as_str(),
            t.payment_method.as_str(),
            t.description.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
