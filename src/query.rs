// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filtering and ordering of the transaction list for display.

use crate::models::{Transaction, TransactionKind, ValidationError};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl TryFrom<&str> for TypeFilter {
    type Error = ValidationError;

    /// Exact, case-sensitive match on `all`, `income` or `expense`.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Only(TransactionKind::Income)),
            "expense" => Ok(TypeFilter::Only(TransactionKind::Expense)),
            other => Err(ValidationError::InvalidType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    /// Keeps the incoming order.
    Unsorted,
}

impl From<&str> for SortField {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "date" => SortField::Date,
            "amount" => SortField::Amount,
            _ => SortField::Unsorted,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl From<&str> for SortDirection {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Column-header behavior: picking the active field flips the direction,
    /// picking another field starts it descending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TxQuery {
    pub type_filter: TypeFilter,
    pub search_text: String,
    pub sort: SortSpec,
}

impl TxQuery {
    /// Returns the matching transactions in display order. The source slice
    /// is left untouched and ties keep their original relative order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let needle = self.search_text.trim().to_lowercase();
        let mut out: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| match self.type_filter {
                TypeFilter::All => true,
                TypeFilter::Only(kind) => t.kind == kind,
            })
            .filter(|t| {
                needle.is_empty()
                    || t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .collect();

        let by_field = |a: &&Transaction, b: &&Transaction| -> Ordering {
            match self.sort.field {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a.amount.cmp(&b.amount),
                SortField::Unsorted => Ordering::Equal,
            }
        };
        match self.sort.direction {
            SortDirection::Asc => out.sort_by(by_field),
            SortDirection::Desc => out.sort_by(|a, b| by_field(b, a)),
        }
        out
    }
}
