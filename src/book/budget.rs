use serde::{Deserialize, Serialize};

use super::period::Period;
use crate::money::Money;

/// Budget amounts keyed by reporting period.
///
/// Stored as a flat entry list; lookups match the exact period (a monthly
/// budget says nothing about a weekly window).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetTable {
    entries: Vec<BudgetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct BudgetEntry {
    period: Period,
    amount: Money,
}

impl BudgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the budget amount for a period, replacing any previous entry.
    pub fn set(&mut self, period: Period, amount: Money) {
        match self.entries.iter_mut().find(|entry| entry.period == period) {
            Some(entry) => entry.amount = amount,
            None => self.entries.push(BudgetEntry { period, amount }),
        }
    }

    pub fn get(&self, period: Period) -> Option<Money> {
        self.entries
            .iter()
            .find(|entry| entry.period == period)
            .map(|entry| entry.amount)
    }

    pub fn remove(&mut self, period: Period) -> Option<Money> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.period == period)?;
        Some(self.entries.remove(index).amount)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Period, Money)> for BudgetTable {
    fn from_iter<I: IntoIterator<Item = (Period, Money)>>(iter: I) -> Self {
        let mut table = BudgetTable::new();
        for (period, amount) in iter {
            table.set(period, amount);
        }
        table
    }
}
