use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::Balanceable;
use super::transaction::Transaction;
use crate::money::Money;

/// A financial account owning a date-ordered register of transactions.
///
/// Entries with equal dates keep their insertion order: a new transaction is
/// placed after existing ones on the same date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Creates a new account with an empty register.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transactions: Vec::new(),
        }
    }

    /// Creates an account seeded with the given transactions, sorted into
    /// register order.
    pub fn with_transactions(name: impl Into<String>, mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|txn| txn.date);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transactions,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        let index = self
            .transactions
            .partition_point(|existing| existing.date <= transaction.date);
        self.transactions.insert(index, transaction);
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn transactions_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    /// Running balance: the sum of every value up to and including the given
    /// transaction in register order.
    pub fn balance_at(&self, id: Uuid) -> Option<Money> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions[..=index].iter().map(|txn| txn.value).sum())
    }
}

impl Balanceable for Account {
    fn transactions(&self) -> Vec<&Transaction> {
        self.transactions.iter().collect()
    }
}
