use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::budget::BudgetTable;

/// Categorises transactions for budgeting and reporting.
///
/// A category owns no transactions; membership lives on each transaction's
/// `category_id` and is resolved by the account book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_budget: Option<BudgetTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_budget: Option<BudgetTable>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            income_budget: None,
            expenses_budget: None,
        }
    }

    pub fn with_income_budget(mut self, budget: BudgetTable) -> Self {
        self.income_budget = Some(budget);
        self
    }

    pub fn with_expenses_budget(mut self, budget: BudgetTable) -> Self {
        self.expenses_budget = Some(budget);
        self
    }
}
