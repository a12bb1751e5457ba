use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::BalanceInfo;
use super::period::Period;
use crate::money::Money;

/// One category's line in a report window.
///
/// `category_id` of `None` marks the uncategorized bucket. Budget figures are
/// present only when the category carries a budget entry for the chunk's
/// exact period. Differences follow the convention `actual - budgeted`:
/// a positive income difference means more was earned than budgeted, and
/// since expense figures are negative, an expenses difference below zero
/// means overspending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportChunkCategory {
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub balance_info: BalanceInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_income: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_expenses: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_difference: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_difference: Option<Money>,
}

impl ReportChunkCategory {
    /// The entry for transactions not assigned to any category.
    pub fn uncategorized(balance_info: BalanceInfo) -> Self {
        Self {
            category_id: None,
            category_name: None,
            balance_info,
            budgeted_income: None,
            budgeted_expenses: None,
            income_difference: None,
            expenses_difference: None,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category_id.is_none()
    }
}

/// Report over a single period window.
///
/// `balance_info` covers activity inside the window only; `balance_info_at_end`
/// is the cumulative state at the window's inclusive end date. Category
/// entries keep the book's category order, with the uncategorized bucket last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportChunk {
    pub start_date: NaiveDate,
    pub period: Period,
    pub balance_info: BalanceInfo,
    pub balance_info_at_end: BalanceInfo,
    pub categories: Vec<ReportChunkCategory>,
}

impl ReportChunk {
    pub fn end_date_inclusive(&self) -> NaiveDate {
        self.period.end_date_inclusive(self.start_date)
    }

    pub fn end_date_exclusive(&self) -> NaiveDate {
        self.period.end_date_exclusive(self.start_date)
    }
}

/// A larger period tiled into contiguous step chunks, plus one summary chunk
/// over the whole span.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportStepped {
    pub start_date: NaiveDate,
    pub period: Period,
    pub step_period: Period,
    pub chunks: Vec<ReportChunk>,
    pub summary: ReportChunk,
}
