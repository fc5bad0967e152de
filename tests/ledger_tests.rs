// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use luxbudget::aggregator::{budget_status, budget_usage, dashboard};
use luxbudget::goal::progress_percent;
use luxbudget::ledger::{Ledger, LedgerError};
use luxbudget::models::{MAX_AMOUNT, TransactionDraft, TransactionKind, ValidationError};
use luxbudget::store::{KvStore, MemoryStore, STORAGE_KEY, StateStore};
use rust_decimal::Decimal;

fn ledger() -> Ledger<MemoryStore> {
    Ledger::open(StateStore::new(MemoryStore::new()))
}

fn draft(kind: TransactionKind, amount: &str, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft {
        kind,
        amount: amount.to_string(),
        category: category.to_string(),
        date: date.to_string(),
        payment_method: "Card".to_string(),
        description: "  note  ".to_string(),
    }
}

/// Reads back whatever the ledger last persisted.
fn reload(ledger: &Ledger<MemoryStore>) -> Ledger<MemoryStore> {
    Ledger::open(StateStore::new(ledger.store().kv().clone()))
}

struct FailingStore;

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

#[test]
fn add_persists_full_snapshot() {
    let mut l = ledger();
    let tx = l
        .add_transaction(&draft(TransactionKind::Income, "1000", "Salary", "2024-01-05"))
        .unwrap()
        .clone();
    assert!(!tx.id.is_empty());
    assert_eq!(tx.amount, Decimal::from(1000));
    assert_eq!(tx.description, "note");

    let reloaded = reload(&l);
    assert_eq!(reloaded.snapshot(), l.snapshot());
    assert_eq!(reloaded.snapshot().transactions, vec![tx]);
}

#[test]
fn ids_are_unique() {
    let mut l = ledger();
    let a = l
        .add_transaction(&draft(TransactionKind::Expense, "5", "Food", "2024-01-05"))
        .unwrap()
        .id
        .clone();
    let b = l
        .add_transaction(&draft(TransactionKind::Expense, "5", "Food", "2024-01-05"))
        .unwrap()
        .id
        .clone();
    assert_ne!(a, b);
}

#[test]
fn invalid_input_is_rejected_with_a_reason() {
    let cases = [
        (draft(TransactionKind::Expense, "0", "Food", "2024-01-05"), ValidationError::InvalidAmount),
        (draft(TransactionKind::Expense, "-3", "Food", "2024-01-05"), ValidationError::InvalidAmount),
        (draft(TransactionKind::Expense, "ten", "Food", "2024-01-05"), ValidationError::InvalidAmount),
        (draft(TransactionKind::Expense, "", "Food", "2024-01-05"), ValidationError::InvalidAmount),
        (draft(TransactionKind::Expense, "10", "Food", ""), ValidationError::InvalidDate),
        (draft(TransactionKind::Expense, "10", "Food", "2024-02-30"), ValidationError::InvalidDate),
        (draft(TransactionKind::Expense, "10", "  ", "2024-01-05"), ValidationError::MissingCategory),
        // amount is checked before the date
        (draft(TransactionKind::Expense, "0", "Food", "nope"), ValidationError::InvalidAmount),
    ];
    for (input, expected) in cases {
        let mut l = ledger();
        let err = l.add_transaction(&input).unwrap_err();
        assert_eq!(err, LedgerError::Invalid(expected));
        assert!(l.snapshot().transactions.is_empty());
        // nothing was written
        assert!(l.store().kv().get(STORAGE_KEY).unwrap().is_none());
    }
}

#[test]
fn edit_replaces_fields_and_keeps_id() {
    let mut l = ledger();
    let id = l
        .add_transaction(&draft(TransactionKind::Income, "100", "Gift", "2024-01-05"))
        .unwrap()
        .id
        .clone();
    let edited = l
        .edit_transaction(&id, &draft(TransactionKind::Expense, "42.5", "Food", "2024-01-06"))
        .unwrap()
        .clone();
    assert_eq!(edited.id, id);
    assert_eq!(edited.kind, TransactionKind::Expense);
    assert_eq!(edited.amount, Decimal::new(425, 1));
    assert_eq!(edited.category, "Food");
    assert_eq!(l.snapshot().transactions.len(), 1);
    assert_eq!(reload(&l).snapshot().transactions[0], edited);
}

#[test]
fn invalid_edit_leaves_transaction_untouched() {
    let mut l = ledger();
    let original = l
        .add_transaction(&draft(TransactionKind::Income, "100", "Gift", "2024-01-05"))
        .unwrap()
        .clone();
    let err = l
        .edit_transaction(&original.id, &draft(TransactionKind::Income, "0", "Gift", "2024-01-05"))
        .unwrap_err();
    assert_eq!(err, LedgerError::Invalid(ValidationError::InvalidAmount));
    assert_eq!(l.snapshot().transactions[0], original);
}

#[test]
fn unknown_ids_are_reported() {
    let mut l = ledger();
    let err = l
        .edit_transaction("missing", &draft(TransactionKind::Income, "1", "Gift", "2024-01-05"))
        .unwrap_err();
    assert_eq!(err, LedgerError::UnknownTransaction("missing".to_string()));
    assert_eq!(
        l.delete_transaction("missing").unwrap_err(),
        LedgerError::UnknownTransaction("missing".to_string())
    );
}

#[test]
fn delete_removes_and_persists() {
    let mut l = ledger();
    let keep = l
        .add_transaction(&draft(TransactionKind::Income, "10", "Gift", "2024-01-05"))
        .unwrap()
        .id
        .clone();
    let gone = l
        .add_transaction(&draft(TransactionKind::Expense, "3", "Food", "2024-01-06"))
        .unwrap()
        .id
        .clone();
    let removed = l.delete_transaction(&gone).unwrap();
    assert_eq!(removed.id, gone);
    let ids: Vec<String> = reload(&l)
        .snapshot()
        .transactions
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn goal_follows_balance_through_mutations() {
    let mut l = ledger();
    l.add_transaction(&draft(TransactionKind::Income, "250", "Salary", "2024-01-05"))
        .unwrap();
    let goal = l.set_goal("Trip", "1000").unwrap();
    assert_eq!(goal.saved, Decimal::from(250));

    let big = l
        .add_transaction(&draft(TransactionKind::Income, "950", "Bonus", "2024-01-06"))
        .unwrap()
        .id
        .clone();
    assert_eq!(l.snapshot().goal.as_ref().unwrap().saved, Decimal::from(1200));

    l.delete_transaction(&big).unwrap();
    l.add_transaction(&draft(TransactionKind::Expense, "400", "Bills", "2024-01-07"))
        .unwrap();
    assert_eq!(l.snapshot().goal.as_ref().unwrap().saved, Decimal::ZERO);
    assert_eq!(reload(&l).snapshot().goal, l.snapshot().goal);
}

#[test]
fn goal_input_is_validated() {
    let mut l = ledger();
    assert_eq!(
        l.set_goal("", "100").unwrap_err(),
        LedgerError::Invalid(ValidationError::MissingGoalName)
    );
    assert_eq!(
        l.set_goal("Car", "-1").unwrap_err(),
        LedgerError::Invalid(ValidationError::InvalidGoalTarget)
    );
    for target in ["0.0000000000000000000000001", "0.001", "1000000000000.01"] {
        assert_eq!(
            l.set_goal("Car", target).unwrap_err(),
            LedgerError::Invalid(ValidationError::InvalidGoalTarget),
            "target {target}"
        );
    }
    assert!(l.snapshot().goal.is_none());
}

#[test]
fn amounts_outside_money_bounds_are_rejected() {
    let mut l = ledger();
    for amount in [
        "79228162514264337593543950335",
        "1000000000000.01",
        "0.001",
        "12.345",
    ] {
        assert_eq!(
            l.add_transaction(&draft(TransactionKind::Income, amount, "Gift", "2024-01-05"))
                .unwrap_err(),
            LedgerError::Invalid(ValidationError::InvalidAmount),
            "amount {amount}"
        );
    }
    assert!(l.snapshot().transactions.is_empty());

    // Trailing zeros beyond two places are still a two-decimal value.
    let tx = l
        .add_transaction(&draft(TransactionKind::Income, "12.3400", "Gift", "2024-01-05"))
        .unwrap();
    assert_eq!(tx.amount, Decimal::new(1234, 2));
}

#[test]
fn extreme_valid_values_aggregate_without_overflow() {
    let mut l = ledger();
    let max = MAX_AMOUNT.to_string();
    for _ in 0..50 {
        l.add_transaction(&draft(TransactionKind::Income, &max, "Salary", "2024-01-05"))
            .unwrap();
    }
    l.add_transaction(&draft(TransactionKind::Expense, &max, "Food", "2024-01-06"))
        .unwrap();
    let goal = l.set_goal("Moon", "0.01").unwrap();
    assert_eq!(goal.saved, *MAX_AMOUNT * Decimal::from(49));
    assert!(progress_percent(&goal) > Decimal::ONE_HUNDRED);

    let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let snap = l.snapshot();
    let usage = budget_usage(&snap.transactions, &snap.budgets, today);
    let food = budget_status(&snap.budgets, &usage)
        .into_iter()
        .find(|s| s.category == "Food")
        .unwrap();
    assert_eq!(food.spent, *MAX_AMOUNT);
    assert_eq!(dashboard(snap, today).totals.balance, goal.saved);
}

#[test]
fn settings_changes_persist() {
    let mut l = ledger();
    l.set_currency(" eur ").unwrap();
    assert_eq!(l.snapshot().settings.currency, "EUR");
    assert_eq!(
        l.set_currency("euro").unwrap_err(),
        LedgerError::Invalid(ValidationError::InvalidCurrency("euro".to_string()))
    );
    assert_eq!(l.snapshot().settings.currency, "EUR");

    assert!(!l.toggle_dark_mode());
    assert!(l.toggle_dark_mode());
    l.set_dark_mode(false);

    let reloaded = reload(&l);
    assert_eq!(reloaded.snapshot().settings.currency, "EUR");
    assert!(!reloaded.snapshot().settings.dark_mode);
}

#[test]
fn persistence_failure_does_not_block_mutation() {
    let mut l = Ledger::open(StateStore::new(FailingStore));
    l.add_transaction(&draft(TransactionKind::Income, "10", "Gift", "2024-01-05"))
        .unwrap();
    assert_eq!(l.snapshot().transactions.len(), 1);
}
