// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The mutation side of the tracker. Every successful change recomputes the
//! goal and rewrites the whole snapshot; a rejected change touches nothing.

use crate::aggregator::totals;
use crate::models::{
    Goal, Snapshot, Transaction, TransactionDraft, ValidationError, normalize_currency,
};
use crate::store::{KvStore, StateStore};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("no transaction with id '{0}'")]
    UnknownTransaction(String),
}

pub struct Ledger<S> {
    store: StateStore<S>,
    snapshot: Snapshot,
}

impl<S: KvStore> Ledger<S> {
    pub fn open(store: StateStore<S>) -> Self {
        let snapshot = store.load();
        debug!(
            "Loaded {} transactions, {} budgets",
            snapshot.transactions.len(),
            snapshot.budgets.len()
        );
        Self { store, snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<&Transaction, LedgerError> {
        let fields = draft.validate()?;
        let tx = Transaction::from_fields(Uuid::new_v4().to_string(), fields);
        info!("Recorded {} {} in {}", tx.kind, tx.amount, tx.category);
        self.snapshot.transactions.push(tx);
        self.commit();
        let last = self.snapshot.transactions.len() - 1;
        Ok(&self.snapshot.transactions[last])
    }

    pub fn edit_transaction(
        &mut self,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<&Transaction, LedgerError> {
        let fields = draft.validate()?;
        let idx = self.position(id)?;
        self.snapshot.transactions[idx].apply(fields);
        info!("Updated transaction {}", id);
        self.commit();
        Ok(&self.snapshot.transactions[idx])
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, LedgerError> {
        let idx = self.position(id)?;
        let removed = self.snapshot.transactions.remove(idx);
        info!("Deleted transaction {}", id);
        self.commit();
        Ok(removed)
    }

    pub fn set_currency(&mut self, code: &str) -> Result<(), LedgerError> {
        let currency = normalize_currency(code)
            .ok_or_else(|| ValidationError::InvalidCurrency(code.to_string()))?;
        self.snapshot.settings.currency = currency;
        self.commit();
        Ok(())
    }

    pub fn set_dark_mode(&mut self, on: bool) {
        self.snapshot.settings.dark_mode = on;
        self.commit();
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        let on = !self.snapshot.settings.dark_mode;
        self.set_dark_mode(on);
        on
    }

    /// Replaces any existing goal.
    pub fn set_goal(&mut self, name: &str, target: &str) -> Result<Goal, LedgerError> {
        let mut goal = Goal::parse(name, target)?;
        let balance = totals(&self.snapshot.transactions).balance;
        crate::goal::recompute(Some(&mut goal), balance);
        info!("Goal set: {} ({})", goal.name, goal.target);
        self.snapshot.goal = Some(goal.clone());
        self.commit();
        Ok(goal)
    }

    fn position(&self, id: &str) -> Result<usize, LedgerError> {
        self.snapshot
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::UnknownTransaction(id.to_string()))
    }

    fn commit(&mut self) {
        let balance = totals(&self.snapshot.transactions).balance;
        crate::goal::recompute(self.snapshot.goal.as_mut(), balance);
        if let Err(e) = self.store.save(&self.snapshot) {
            error!("Failed to persist state: {e:#}");
        }
    }
}
