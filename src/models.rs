// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "USD";

static DEFAULT_BUDGETS: Lazy<Vec<Budget>> = Lazy::new(|| {
    [
        ("Food", 500),
        ("Transport", 200),
        ("Entertainment", 250),
        ("Bills", 400),
        ("Shopping", 350),
        ("Health", 150),
        ("Other", 100),
    ]
    .into_iter()
    .map(|(category, limit)| Budget {
        category: category.to_string(),
        limit: Decimal::from(limit),
    })
    .collect()
});

/// Money keeps at most this many decimal places.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount, budget limit or goal target accepted.
pub static MAX_AMOUNT: Lazy<Decimal> = Lazy::new(|| Decimal::from(1_000_000_000_000_i64));

/// True for values in `[0, MAX_AMOUNT]` with at most two decimal places.
/// Inside this range sums stay far from `Decimal` overflow and every value
/// survives the float round trip of the stored record unchanged.
pub fn within_money_bounds(value: Decimal) -> bool {
    !value.is_sign_negative()
        && value.normalize().scale() <= MONEY_SCALE
        && value <= *MAX_AMOUNT
}

/// Parses a strictly positive money value.
pub fn parse_money(raw: &str) -> Option<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|v| *v > Decimal::ZERO && within_money_bounds(*v))
}

/// The budget list a fresh snapshot is seeded with.
pub fn default_budgets() -> Vec<Budget> {
    DEFAULT_BUDGETS.clone()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(ValidationError::InvalidType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn from_fields(id: impl Into<String>, fields: TransactionFields) -> Self {
        Self {
            id: id.into(),
            amount: fields.amount,
            kind: fields.kind,
            category: fields.category,
            date: fields.date,
            payment_method: fields.payment_method,
            description: fields.description,
        }
    }

    /// Overwrites every editable field, keeping the id.
    pub fn apply(&mut self, fields: TransactionFields) {
        self.amount = fields.amount;
        self.kind = fields.kind;
        self.category = fields.category;
        self.date = fields.date;
        self.payment_method = fields.payment_method;
        self.description = fields.description;
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            dark_mode: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub target: Decimal,
    /// Derived from the balance; never trusted from storage.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub saved: Decimal,
}

impl Goal {
    /// Validates raw goal input. `saved` starts at zero until the goal is
    /// recomputed against a balance.
    pub fn parse(name: &str, target: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingGoalName);
        }
        let target = parse_money(target).ok_or(ValidationError::InvalidGoalTarget)?;
        Ok(Self {
            name: name.to_string(),
            target,
            saved: Decimal::ZERO,
        })
    }
}

/// The complete persisted application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub settings: Settings,
    pub goal: Option<Goal>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: default_budgets(),
            settings: Settings::default(),
            goal: None,
        }
    }
}

impl Snapshot {
    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be greater than zero, at most 1000000000000, with up to two decimals")]
    InvalidAmount,
    #[error("date must be a calendar date in YYYY-MM-DD form")]
    InvalidDate,
    #[error("category is required")]
    MissingCategory,
    #[error("unknown transaction type '{0}' (use income|expense)")]
    InvalidType(String),
    #[error("goal name is required")]
    MissingGoalName,
    #[error("goal target must be greater than zero, at most 1000000000000, with up to two decimals")]
    InvalidGoalTarget,
    #[error("invalid currency code '{0}', expected three letters such as USD")]
    InvalidCurrency(String),
}

/// Raw transaction form input, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub payment_method: String,
    pub description: String,
}

/// Transaction fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub payment_method: String,
    pub description: String,
}

impl TransactionDraft {
    /// Prefills a draft from an existing transaction, for editing.
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind,
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            payment_method: tx.payment_method.clone(),
            description: tx.description.clone(),
        }
    }

    /// Checks amount, then date, then category; the first failure wins.
    pub fn validate(&self) -> Result<TransactionFields, ValidationError> {
        let amount = parse_money(&self.amount).ok_or(ValidationError::InvalidAmount)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate)?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(TransactionFields {
            amount,
            kind: self.kind,
            category: category.to_string(),
            date,
            payment_method: self.payment_method.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Returns the upper-cased code when it looks like an ISO 4217 code.
pub fn normalize_currency(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Dates are stored as `YYYY-MM-DD`. Timestamps written by older versions
/// are cut down to their date part.
mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let day = s.get(..10).unwrap_or(&s);
        NaiveDate::parse_from_str(day, FORMAT).map_err(serde::de::Error::custom)
    }
}
