// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Loading and saving the snapshot as a single record in a key-value store.

use crate::aggregator::totals;
use crate::goal;
use crate::models::{
    Budget, DEFAULT_CURRENCY, Goal, Settings, Snapshot, Transaction, default_budgets,
    normalize_currency, within_money_bounds,
};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "luxbudget-data-v1";

/// A byte store addressed by string keys.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.into());
        store
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

pub struct StateStore<S> {
    kv: S,
}

impl<S: KvStore> StateStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Never fails: a missing or unreadable record yields the default snapshot.
    pub fn load(&self) -> Snapshot {
        let raw = match self.kv.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored state under '{}', starting fresh", STORAGE_KEY);
                return Snapshot::default();
            }
            Err(e) => {
                warn!("Failed to read stored state, resetting: {e:#}");
                return Snapshot::default();
            }
        };
        match decode(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to parse state, resetting: {e:#}");
                Snapshot::default()
            }
        }
    }

    /// Replaces the stored record with the full snapshot.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let bytes = serde_json::to_vec(snapshot).context("Failed to serialize state")?;
        self.kv
            .set(STORAGE_KEY, &bytes)
            .with_context(|| format!("Failed to write state under '{}'", STORAGE_KEY))
    }
}

/// Stored shape with every field optional. Rows are kept as raw JSON so one
/// bad record does not discard the rest.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredSnapshot {
    transactions: Option<Vec<serde_json::Value>>,
    budgets: Option<Vec<serde_json::Value>>,
    settings: Option<StoredSettings>,
    goal: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredSettings {
    currency: Option<String>,
    dark_mode: Option<bool>,
}

/// Parses and normalizes a stored record.
pub fn decode(raw: &[u8]) -> Result<Snapshot> {
    let stored: StoredSnapshot =
        serde_json::from_slice(raw).context("Stored state is not a valid snapshot record")?;
    Ok(normalize(stored))
}

fn normalize(stored: StoredSnapshot) -> Snapshot {
    let transactions = stored
        .transactions
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<Transaction>(row) {
            Ok(tx) if tx.amount > Decimal::ZERO && within_money_bounds(tx.amount) => Some(tx),
            Ok(tx) => {
                warn!("Dropping transaction {} with out-of-range amount {}", tx.id, tx.amount);
                None
            }
            Err(e) => {
                warn!("Dropping unreadable transaction record: {e}");
                None
            }
        })
        .collect::<Vec<_>>();

    let budgets = match stored.budgets {
        Some(rows) => normalize_budgets(rows),
        None => default_budgets(),
    };

    let defaults = Settings::default();
    let settings = match stored.settings {
        Some(s) => Settings {
            currency: s
                .currency
                .as_deref()
                .and_then(normalize_currency)
                .unwrap_or_else(|| {
                    if let Some(code) = &s.currency {
                        warn!("Unknown currency '{}', using {}", code, DEFAULT_CURRENCY);
                    }
                    defaults.currency.clone()
                }),
            dark_mode: s.dark_mode.unwrap_or(defaults.dark_mode),
        },
        None => defaults,
    };

    let mut goal = stored.goal.and_then(|v| {
        match serde_json::from_value::<StoredGoal>(v) {
            Ok(g)
                if !g.name.trim().is_empty()
                    && g.target > Decimal::ZERO
                    && within_money_bounds(g.target) =>
            {
                Some(Goal {
                    name: g.name,
                    target: g.target,
                    saved: Decimal::ZERO,
                })
            }
            Ok(g) => {
                warn!("Dropping goal '{}' with missing name or invalid target", g.name);
                None
            }
            Err(e) => {
                warn!("Dropping unreadable goal record: {e}");
                None
            }
        }
    });
    goal::recompute(goal.as_mut(), totals(&transactions).balance);

    Snapshot {
        transactions,
        budgets,
        settings,
        goal,
    }
}

fn normalize_budgets(rows: Vec<serde_json::Value>) -> Vec<Budget> {
    let mut seen = HashSet::new();
    let mut budgets = Vec::with_capacity(rows.len());
    for row in rows {
        let budget = match serde_json::from_value::<Budget>(row) {
            Ok(b) => b,
            Err(e) => {
                warn!("Dropping unreadable budget record: {e}");
                continue;
            }
        };
        if !within_money_bounds(budget.limit) {
            warn!("Dropping budget '{}' with out-of-range limit {}", budget.category, budget.limit);
            continue;
        }
        if !seen.insert(budget.category.clone()) {
            warn!("Dropping duplicate budget for '{}'", budget.category);
            continue;
        }
        budgets.push(budget);
    }
    budgets
}

/// `saved` may be missing or stale in storage; it is recomputed after load.
#[derive(Debug, Deserialize)]
struct StoredGoal {
    name: String,
    target: Decimal,
}
