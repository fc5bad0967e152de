// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use luxbudget::commands::{budgets, goal, settings, transactions};
use luxbudget::ledger::{Ledger, LedgerError};
use luxbudget::models::{TransactionKind, ValidationError};
use luxbudget::{cli, store::MemoryStore, store::StateStore};
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

fn setup() -> Ledger<MemoryStore> {
    Ledger::open(StateStore::new(MemoryStore::new()))
}

fn run_tx(ledger: &mut Ledger<MemoryStore>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["luxbudget", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(ledger, tx_m, today())
    } else {
        panic!("no tx subcommand");
    }
}

fn seed(ledger: &mut Ledger<MemoryStore>) {
    let rows = [
        ["income", "1000", "Salary", "2025-01-02", "Monthly pay"],
        ["expense", "12.50", "Food", "2025-01-05", "Lunch with foo"],
        ["expense", "80", "Bills", "2025-01-07", "Phone"],
        ["expense", "5", "Food", "2025-01-09", "Coffee"],
    ];
    for [kind, amount, category, date, desc] in rows {
        run_tx(
            ledger,
            &[
                "add", "--type", kind, "--amount", amount, "--category", category, "--date",
                date, "--desc", desc,
            ],
        )
        .unwrap();
    }
}

#[test]
fn add_defaults_to_today_and_card() {
    let mut ledger = setup();
    run_tx(&mut ledger, &["add", "--amount", "20", "--category", "Gift"]).unwrap();
    let tx = &ledger.snapshot().transactions[0];
    assert_eq!(tx.date, today());
    assert_eq!(tx.payment_method, "Card");
    assert_eq!(tx.kind, TransactionKind::Income);
}

#[test]
fn add_rejects_non_positive_amount() {
    let mut ledger = setup();
    let err = run_tx(
        &mut ledger,
        &["add", "--type", "expense", "--amount", "-5", "--category", "Food"],
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::Invalid(ValidationError::InvalidAmount))
    );
    assert!(ledger.snapshot().transactions.is_empty());
}

#[test]
fn list_filters_searches_and_sorts() {
    let mut ledger = setup();
    seed(&mut ledger);
    let matches = cli::build_cli().get_matches_from([
        "luxbudget", "tx", "list", "--type", "expense", "--search", "FOOD", "--sort", "amount",
        "--dir", "asc",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(ledger.snapshot(), list_m).unwrap();
            let amounts: Vec<Decimal> = rows.iter().map(|r| r.amount).collect();
            assert_eq!(amounts, vec![Decimal::from(5), Decimal::new(1250, 2)]);
            assert!(rows.iter().all(|r| r.category == "Food"));
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_defaults_to_newest_first() {
    let mut ledger = setup();
    seed(&mut ledger);
    let matches = cli::build_cli().get_matches_from(["luxbudget", "tx", "list"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let dates: Vec<String> = transactions::query_rows(ledger.snapshot(), list_m)
        .unwrap()
        .into_iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(
        dates,
        vec!["2025-01-09", "2025-01-07", "2025-01-05", "2025-01-02"]
    );
}

#[test]
fn edit_keeps_omitted_fields() {
    let mut ledger = setup();
    seed(&mut ledger);
    let id = ledger.snapshot().transactions[2].id.clone();
    run_tx(&mut ledger, &["edit", &id, "--amount", "95.10"]).unwrap();
    let tx = ledger.snapshot().find_transaction(&id).unwrap();
    assert_eq!(tx.amount, Decimal::new(9510, 2));
    assert_eq!(tx.category, "Bills");
    assert_eq!(tx.description, "Phone");
    assert_eq!(tx.kind, TransactionKind::Expense);
}

#[test]
fn rm_deletes_by_id() {
    let mut ledger = setup();
    seed(&mut ledger);
    let id = ledger.snapshot().transactions[0].id.clone();
    run_tx(&mut ledger, &["rm", &id]).unwrap();
    assert_eq!(ledger.snapshot().transactions.len(), 3);
    assert!(ledger.snapshot().find_transaction(&id).is_none());
    assert!(run_tx(&mut ledger, &["rm", &id]).is_err());
}

#[test]
fn budget_status_reflects_current_month() {
    let mut ledger = setup();
    seed(&mut ledger);
    let rows = budgets::status_rows(ledger.snapshot(), today());
    let food = rows.iter().find(|r| r.category == "Food").unwrap();
    assert_eq!(food.spent, Decimal::new(1750, 2));
    let health = rows.iter().find(|r| r.category == "Health").unwrap();
    assert_eq!(health.spent, Decimal::ZERO);
    assert_eq!(rows.len(), 7);
}

#[test]
fn goal_and_settings_commands_mutate_ledger() {
    let mut ledger = setup();
    seed(&mut ledger);

    let matches = cli::build_cli().get_matches_from([
        "luxbudget", "goal", "set", "--name", "Trip", "--target", "1000",
    ]);
    let Some(("goal", goal_m)) = matches.subcommand() else {
        panic!("no goal subcommand");
    };
    goal::handle(&mut ledger, goal_m).unwrap();
    let view = goal::goal_view(ledger.snapshot().goal.as_ref().unwrap());
    assert_eq!(view.saved, Decimal::new(90250, 2));
    assert_eq!(view.progress_percent, Decimal::new(9025, 2));
    assert!(!view.reached);

    let matches = cli::build_cli().get_matches_from(["luxbudget", "settings", "currency", "gbp"]);
    let Some(("settings", settings_m)) = matches.subcommand() else {
        panic!("no settings subcommand");
    };
    settings::handle(&mut ledger, settings_m).unwrap();
    assert_eq!(ledger.snapshot().settings.currency, "GBP");

    let matches = cli::build_cli().get_matches_from(["luxbudget", "settings", "dark-mode", "toggle"]);
    let Some(("settings", settings_m)) = matches.subcommand() else {
        panic!("no settings subcommand");
    };
    settings::handle(&mut ledger, settings_m).unwrap();
    assert!(!ledger.snapshot().settings.dark_mode);
}
