use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::Period;
use super::transaction::{Transaction, TransactionKind};
use crate::money::Money;

/// Snapshot of the aggregate financial state of a transaction set.
///
/// `balance`/`cleared_balance` cover every transaction; `income` and
/// `expenses` restrict to the deposit and withdrawal partitions. An empty
/// set yields all-zero figures.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceInfo {
    pub balance: Money,
    pub cleared_balance: Money,
    pub income: Money,
    pub cleared_income: Money,
    pub expenses: Money,
    pub cleared_expenses: Money,
}

impl BalanceInfo {
    /// Folds a transaction set into its six aggregate figures. Pure; the
    /// result does not depend on iteration order.
    pub fn compute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut info = BalanceInfo::default();
        for txn in transactions {
            let cleared = txn.cleared_value();
            info.balance += txn.value;
            info.cleared_balance += cleared;
            match txn.kind {
                TransactionKind::Deposit => {
                    info.income += txn.value;
                    info.cleared_income += cleared;
                }
                TransactionKind::Withdrawal => {
                    info.expenses += txn.value;
                    info.cleared_expenses += cleared;
                }
            }
        }
        info
    }

    /// True when every figure is zero, i.e. no financial activity.
    pub fn is_zero(&self) -> bool {
        *self == BalanceInfo::default()
    }
}

/// Capability of reporting aggregate financial figures over an associated
/// transaction set. Implementors only supply the set; the balance queries
/// are shared behavior.
pub trait Balanceable {
    /// The transactions this entity is balanced over, in date order.
    fn transactions(&self) -> Vec<&Transaction>;

    /// Aggregates over all transactions, unfiltered by date.
    fn balance_info(&self) -> BalanceInfo {
        BalanceInfo::compute(self.transactions())
    }

    /// Aggregates over transactions dated within
    /// `[start, period.end_date_exclusive(start))`.
    fn balance_info_for_period(&self, start: NaiveDate, period: Period) -> BalanceInfo {
        let end = period.end_date_exclusive(start);
        BalanceInfo::compute(
            self.transactions()
                .into_iter()
                .filter(|txn| txn.date >= start && txn.date < end),
        )
    }

    /// Aggregates over transactions dated on or before `date`.
    fn balance_info_at_date(&self, date: NaiveDate) -> BalanceInfo {
        BalanceInfo::compute(
            self.transactions()
                .into_iter()
                .filter(|txn| txn.date <= date),
        )
    }
}

/// Transient, borrowed transaction subset; the balanceable used for
/// per-category views and the uncategorized report bucket.
#[derive(Debug, Clone)]
pub struct TransactionSet<'a> {
    transactions: Vec<&'a Transaction>,
}

impl<'a> TransactionSet<'a> {
    /// Wraps the given transactions, sorting them into date order.
    pub fn new(mut transactions: Vec<&'a Transaction>) -> Self {
        transactions.sort_by_key(|txn| txn.date);
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl<'a> Balanceable for TransactionSet<'a> {
    fn transactions(&self) -> Vec<&Transaction> {
        self.transactions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new(date(2024, 1, 2), Money::from(10), "Michael", "Wage"),
            Transaction::new(date(2024, 1, 5), Money::from(-35), "John", "Rent"),
            Transaction::new(date(2024, 1, 10), Money::from(500), "Tim", "Winnings"),
        ]
    }

    #[test]
    fn empty_set_yields_all_zero_figures() {
        let none: Vec<Transaction> = Vec::new();
        let info = BalanceInfo::compute(&none);
        assert!(info.is_zero());
        assert_eq!(info, BalanceInfo::compute(&none));
    }

    #[test]
    fn aggregates_partition_by_kind() {
        let transactions = sample_transactions();
        let info = BalanceInfo::compute(&transactions);

        assert_eq!(info.balance, Money::from(475));
        assert_eq!(info.income, Money::from(510));
        assert_eq!(info.expenses, Money::from(-35));
        // Nothing is cleared yet.
        assert_eq!(info.cleared_balance, Money::ZERO);
        assert_eq!(info.cleared_income, Money::ZERO);
        assert_eq!(info.cleared_expenses, Money::ZERO);
    }

    #[test]
    fn cleared_balance_tracks_cleared_values_directly() {
        let mut transactions = sample_transactions();
        transactions[0].mark_cleared();
        transactions[1].mark_cleared();
        let info = BalanceInfo::compute(&transactions);

        let direct: Money = transactions.iter().map(|txn| txn.cleared_value()).sum();
        assert_eq!(info.cleared_balance, direct);
        assert_eq!(info.cleared_balance, Money::from(-25));
        assert_eq!(info.cleared_income, Money::from(10));
        assert_eq!(info.cleared_expenses, Money::from(-35));
        // Unfiltered aggregates are unaffected by clearing.
        assert_eq!(info.balance, Money::from(475));
    }

    #[test]
    fn period_window_is_half_open() {
        let transactions = sample_transactions();
        let set = TransactionSet::new(transactions.iter().collect());

        let january = set.balance_info_for_period(
            date(2024, 1, 1),
            Period::new(1, crate::book::PeriodUnit::Month),
        );
        assert_eq!(january.balance, Money::from(475));
        assert_eq!(january.income, Money::from(510));
        assert_eq!(january.expenses, Money::from(-35));

        // A window ending exactly on a transaction date excludes it.
        let start = date(2024, 1, 5);
        let five_days = set.balance_info_for_period(
            start,
            Period::new(5, crate::book::PeriodUnit::Day),
        );
        assert_eq!(five_days.balance, Money::from(-35));
    }

    #[test]
    fn at_date_is_cumulative_inclusive() {
        let transactions = sample_transactions();
        let set = TransactionSet::new(transactions.iter().collect());

        assert_eq!(
            set.balance_info_at_date(date(2024, 1, 5)).balance,
            Money::from(-25)
        );
        assert_eq!(
            set.balance_info_at_date(date(2024, 1, 1)).balance,
            Money::ZERO
        );
        assert_eq!(
            set.balance_info_at_date(date(2024, 12, 31)).balance,
            Money::from(475)
        );
    }
}
