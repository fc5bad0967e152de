// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregations over a transaction list. Nothing here reads the clock;
//! callers pass the evaluation date in.

use crate::models::{Budget, Snapshot, Transaction};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Progress bars never draw past this percentage.
pub const DISPLAY_CAP_PERCENT: Decimal = Decimal::from_parts(130, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in transactions {
        if t.is_income() {
            income += t.amount;
        } else {
            expenses += t.amount;
        }
    }
    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Year and month (1-based) that lies `offset` months away from `today`.
pub fn shift_month(today: NaiveDate, offset: i32) -> (i32, u32) {
    let index = today.year() * 12 + today.month0() as i32 + offset;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// First day of the month `offset` months from `today`, used to view an
/// earlier month as if it were the current one.
pub fn month_anchor(today: NaiveDate, offset: i32) -> NaiveDate {
    let (year, month) = shift_month(today, offset);
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

/// Transactions dated in the calendar month `month_offset` months from
/// `today` (0 is the current month, -1 the previous one).
pub fn filter_by_month(
    transactions: &[Transaction],
    today: NaiveDate,
    month_offset: i32,
) -> Vec<&Transaction> {
    let (year, month) = shift_month(today, month_offset);
    transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .collect()
}

/// Sums expenses per category in first-seen order.
fn expenses_by_category<'a, I>(transactions: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: Vec<(String, Decimal)> = Vec::new();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        match out.iter_mut().find(|(cat, _)| *cat == t.category) {
            Some((_, total)) => *total += t.amount,
            None => out.push((t.category.clone(), t.amount)),
        }
    }
    out
}

/// Current-month spend per category. Every budget category is present even
/// without spending; unbudgeted categories appear when they have expenses.
pub fn budget_usage(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> BTreeMap<String, Decimal> {
    let mut usage: BTreeMap<String, Decimal> = budgets
        .iter()
        .map(|b| (b.category.clone(), Decimal::ZERO))
        .collect();
    for (category, spent) in expenses_by_category(filter_by_month(transactions, today, 0)) {
        *usage.entry(category).or_insert(Decimal::ZERO) += spent;
    }
    usage
}

/// Current-month expense totals per category, largest first.
pub fn category_breakdown(transactions: &[Transaction], today: NaiveDate) -> Vec<(String, Decimal)> {
    let mut items = expenses_by_category(filter_by_month(transactions, today, 0));
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

pub fn top_category(transactions: &[Transaction], today: NaiveDate) -> Option<(String, Decimal)> {
    category_breakdown(transactions, today).into_iter().next()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyFlow {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense per `YYYY-MM` across the whole history. Keys iterate
/// in chronological order since the month is zero-padded.
pub fn monthly_series(transactions: &[Transaction]) -> BTreeMap<String, MonthlyFlow> {
    let mut series: BTreeMap<String, MonthlyFlow> = BTreeMap::new();
    for t in transactions {
        let flow = series.entry(t.date.format("%Y-%m").to_string()).or_default();
        if t.is_income() {
            flow.income += t.amount;
        } else {
            flow.expense += t.amount;
        }
    }
    series
}

/// `(income - expenses) / max(income, 1) * 100`, clamped to [-100, 100].
pub fn savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    let base = income.max(Decimal::ONE);
    let rate = (income - expenses) / base * Decimal::ONE_HUNDRED;
    rate.clamp(-Decimal::ONE_HUNDRED, Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    OnTrack,
    Approaching,
    Exceeded,
}

impl BudgetLevel {
    fn for_percent(percent: Decimal) -> Self {
        if percent >= Decimal::ONE_HUNDRED {
            BudgetLevel::Exceeded
        } else if percent >= Decimal::from(90) {
            BudgetLevel::Approaching
        } else {
            BudgetLevel::OnTrack
        }
    }

    pub fn alert(&self) -> Option<&'static str> {
        match self {
            BudgetLevel::OnTrack => None,
            BudgetLevel::Approaching => Some("Approaching budget limit."),
            BudgetLevel::Exceeded => Some("Budget exceeded for this category."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percent: Decimal,
    pub level: BudgetLevel,
}

impl BudgetStatus {
    pub fn display_percent(&self) -> Decimal {
        self.percent.min(DISPLAY_CAP_PERCENT)
    }
}

/// One status row per budget, in budget order.
pub fn budget_status(budgets: &[Budget], usage: &BTreeMap<String, Decimal>) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| {
            let spent = usage.get(&b.category).copied().unwrap_or(Decimal::ZERO);
            let percent = if b.limit > Decimal::ZERO {
                spent / b.limit * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            BudgetStatus {
                category: b.category.clone(),
                limit: b.limit,
                spent,
                percent,
                level: BudgetLevel::for_percent(percent),
            }
        })
        .collect()
}

/// Total of all limits minus everything spent this month, floored at zero.
/// Spending in unbudgeted categories counts against the total as well.
pub fn budget_remaining(budgets: &[Budget], usage: &BTreeMap<String, Decimal>) -> Decimal {
    let limit: Decimal = budgets.iter().map(|b| b.limit).sum();
    let spent: Decimal = usage.values().copied().sum();
    (limit - spent).max(Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "trend", content = "amount", rename_all = "snake_case")]
pub enum SpendingComparison {
    NoSpending,
    Increased(Decimal),
    Decreased(Decimal),
    Unchanged,
}

pub fn compare_months(this_month: Decimal, last_month: Decimal) -> SpendingComparison {
    if this_month.is_zero() && last_month.is_zero() {
        return SpendingComparison::NoSpending;
    }
    let diff = this_month - last_month;
    if diff > Decimal::ZERO {
        SpendingComparison::Increased(diff)
    } else if diff < Decimal::ZERO {
        SpendingComparison::Decreased(diff.abs())
    } else {
        SpendingComparison::Unchanged
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub this_month: Totals,
    pub last_month: Totals,
    pub savings_rate: Decimal,
    pub budget_remaining: Decimal,
    pub comparison: SpendingComparison,
    pub top_category: Option<(String, Decimal)>,
}

pub fn dashboard(snapshot: &Snapshot, today: NaiveDate) -> Dashboard {
    let txs = &snapshot.transactions;
    let this_month = totals(filter_by_month(txs, today, 0));
    let last_month = totals(filter_by_month(txs, today, -1));
    let usage = budget_usage(txs, &snapshot.budgets, today);
    Dashboard {
        totals: totals(txs),
        this_month,
        last_month,
        savings_rate: savings_rate(this_month.income, this_month.expenses),
        budget_remaining: budget_remaining(&snapshot.budgets, &usage),
        comparison: compare_months(this_month.expenses, last_month.expenses),
        top_category: top_category(txs, today),
    }
}
