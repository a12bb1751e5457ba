use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookError, Result};
use crate::money::Money;

/// A single posted ledger entry.
///
/// The `category_id` is a weak, non-owning reference; [`super::AccountBook`]
/// is the only component that mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub value: Money,
    pub kind: TransactionKind,
    pub payee: String,
    pub memo: String,
    #[serde(default)]
    pub cleared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl Transaction {
    /// Creates a transaction whose kind follows the sign of `value`:
    /// non-negative values post as deposits, negative values as withdrawals.
    pub fn new(
        date: NaiveDate,
        value: Money,
        payee: impl Into<String>,
        memo: impl Into<String>,
    ) -> Self {
        let kind = if value.is_negative() {
            TransactionKind::Withdrawal
        } else {
            TransactionKind::Deposit
        };
        Self {
            id: Uuid::new_v4(),
            date,
            value,
            kind,
            payee: payee.into(),
            memo: memo.into(),
            cleared: false,
            category_id: None,
        }
    }

    /// Creates a transaction with an explicit kind, rejecting a kind that
    /// contradicts the sign of `value`.
    pub fn with_kind(
        date: NaiveDate,
        value: Money,
        kind: TransactionKind,
        payee: impl Into<String>,
        memo: impl Into<String>,
    ) -> Result<Self> {
        validate_kind(kind, value)?;
        let mut txn = Self::new(date, value, payee, memo);
        txn.kind = kind;
        Ok(txn)
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// The value this transaction contributes to cleared aggregates: its full
    /// value once reconciled against a statement, zero while pending.
    pub fn cleared_value(&self) -> Money {
        if self.cleared {
            self.value
        } else {
            Money::ZERO
        }
    }

    pub fn mark_cleared(&mut self) {
        self.cleared = true;
    }

    pub fn set_cleared(&mut self, cleared: bool) {
        self.cleared = cleared;
    }

    /// Checks the kind/sign invariant, as when attaching to an account.
    pub fn validate(&self) -> Result<()> {
        validate_kind(self.kind, self.value)
    }
}

fn validate_kind(kind: TransactionKind, value: Money) -> Result<()> {
    let consistent = match kind {
        TransactionKind::Deposit => !value.is_negative(),
        TransactionKind::Withdrawal => value <= Money::ZERO,
    };
    if consistent {
        Ok(())
    } else {
        Err(BookError::InvalidTransaction(format!(
            "{:?} cannot carry value {}",
            kind, value
        )))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}
