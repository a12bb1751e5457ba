use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;
use super::balance::{Balanceable, TransactionSet};
use super::category::Category;
use super::period::Period;
use super::report::{ReportChunk, ReportChunkCategory, ReportStepped};
use super::transaction::Transaction;
use crate::errors::{BookError, Result};

/// The authoritative collection of accounts and categories, and the driver of
/// report generation.
///
/// Account and category names are unique (case-sensitive), enforced when they
/// are added. The merged transaction view and every report are derived from
/// live state on each call, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBook {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountBook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // --- accounts ---

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// Adds an account, rejecting a duplicate name with no state change.
    pub fn add_account(&mut self, account: Account) -> Result<Uuid> {
        if self.account_by_name(&account.name).is_some() {
            return Err(BookError::DuplicateAccount(account.name));
        }
        let id = account.id;
        tracing::debug!(account = %account.name, "adding account");
        self.accounts.push(account);
        self.touch();
        Ok(id)
    }

    /// Adds several accounts at once. The whole batch is validated first,
    /// including duplicates within the batch, so a failure adds nothing.
    pub fn add_accounts(&mut self, accounts: Vec<Account>) -> Result<()> {
        for (index, account) in accounts.iter().enumerate() {
            let dup_existing = self.account_by_name(&account.name).is_some();
            let dup_in_batch = accounts[..index]
                .iter()
                .any(|earlier| earlier.name == account.name);
            if dup_existing || dup_in_batch {
                return Err(BookError::DuplicateAccount(account.name.clone()));
            }
        }
        self.accounts.extend(accounts);
        self.touch();
        Ok(())
    }

    pub fn remove_account(&mut self, id: Uuid) -> Result<Account> {
        let index = self
            .accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| BookError::AccountNotFound(id.to_string()))?;
        self.touch();
        Ok(self.accounts.remove(index))
    }

    pub fn remove_account_at(&mut self, index: usize) -> Result<Account> {
        if index >= self.accounts.len() {
            return Err(BookError::AccountNotFound(format!("index {index}")));
        }
        self.touch();
        Ok(self.accounts.remove(index))
    }

    // --- categories ---

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Adds a category, rejecting a duplicate name with no state change.
    pub fn add_category(&mut self, category: Category) -> Result<Uuid> {
        if self.category_by_name(&category.name).is_some() {
            return Err(BookError::DuplicateCategory(category.name));
        }
        let id = category.id;
        tracing::debug!(category = %category.name, "adding category");
        self.categories.push(category);
        self.touch();
        Ok(id)
    }

    /// Adds several categories at once; validated as a whole batch like
    /// [`AccountBook::add_accounts`].
    pub fn add_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        for (index, category) in categories.iter().enumerate() {
            let dup_existing = self.category_by_name(&category.name).is_some();
            let dup_in_batch = categories[..index]
                .iter()
                .any(|earlier| earlier.name == category.name);
            if dup_existing || dup_in_batch {
                return Err(BookError::DuplicateCategory(category.name.clone()));
            }
        }
        self.categories.extend(categories);
        self.touch();
        Ok(())
    }

    /// Removes a category and detaches every transaction referencing it, so
    /// those transactions fall back into the uncategorized bucket.
    pub fn remove_category(&mut self, id: Uuid) -> Result<Category> {
        let index = self
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| BookError::CategoryNotFound(id.to_string()))?;
        let removed = self.categories.remove(index);
        let mut detached = 0usize;
        for account in &mut self.accounts {
            for txn in account.transactions_mut() {
                if txn.category_id == Some(id) {
                    txn.category_id = None;
                    detached += 1;
                }
            }
        }
        tracing::debug!(category = %removed.name, detached, "removed category");
        self.touch();
        Ok(removed)
    }

    pub fn remove_category_at(&mut self, index: usize) -> Result<Category> {
        let id = self
            .categories
            .get(index)
            .map(|category| category.id)
            .ok_or_else(|| BookError::CategoryNotFound(format!("index {index}")))?;
        self.remove_category(id)
    }

    // --- transactions ---

    /// Every transaction across all accounts, merged and sorted by date.
    /// Derived on each access from the owned accounts.
    pub fn transactions(&self) -> Vec<&Transaction> {
        let mut merged: Vec<&Transaction> = self
            .accounts
            .iter()
            .flat_map(|account| account.transactions())
            .collect();
        merged.sort_by_key(|txn| txn.date);
        merged
    }

    /// Validates and posts a transaction into the given account. The sign
    /// invariant and any category reference are checked before insertion.
    pub fn add_transaction(&mut self, account_id: Uuid, transaction: Transaction) -> Result<Uuid> {
        transaction.validate()?;
        if let Some(category_id) = transaction.category_id {
            if self.category(category_id).is_none() {
                return Err(BookError::CategoryNotFound(category_id.to_string()));
            }
        }
        let account = self
            .account_mut(account_id)
            .ok_or_else(|| BookError::AccountNotFound(account_id.to_string()))?;
        let id = account.add_transaction(transaction);
        self.touch();
        Ok(id)
    }

    /// Attaches a transaction to a category, or detaches it with `None`.
    pub fn set_transaction_category(
        &mut self,
        transaction_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<()> {
        if let Some(id) = category_id {
            if self.category(id).is_none() {
                return Err(BookError::CategoryNotFound(id.to_string()));
            }
        }
        let txn = self
            .accounts
            .iter_mut()
            .flat_map(|account| account.transactions_mut().iter_mut())
            .find(|txn| txn.id == transaction_id)
            .ok_or(BookError::TransactionNotFound(transaction_id))?;
        txn.category_id = category_id;
        self.touch();
        Ok(())
    }

    /// Transactions assigned to the given category, in date order.
    pub fn category_transactions(&self, category_id: Uuid) -> TransactionSet<'_> {
        TransactionSet::new(
            self.transactions()
                .into_iter()
                .filter(|txn| txn.category_id == Some(category_id))
                .collect(),
        )
    }

    /// Transactions not assigned to any category, in date order.
    pub fn uncategorized_transactions(&self) -> TransactionSet<'_> {
        TransactionSet::new(
            self.transactions()
                .into_iter()
                .filter(|txn| txn.category_id.is_none())
                .collect(),
        )
    }

    // --- reports ---

    /// Builds the report for one period window: the book-wide window balance,
    /// the cumulative balance at the window's inclusive end, and one entry
    /// per category in stored order followed by the uncategorized bucket.
    pub fn generate_report_chunk(&self, start_date: NaiveDate, period: Period) -> ReportChunk {
        let mut categories: Vec<ReportChunkCategory> = self
            .categories
            .iter()
            .map(|category| self.category_report_entry(category, start_date, period))
            .collect();
        categories.push(ReportChunkCategory::uncategorized(
            self.uncategorized_transactions()
                .balance_info_for_period(start_date, period),
        ));

        ReportChunk {
            start_date,
            period,
            balance_info: self.balance_info_for_period(start_date, period),
            balance_info_at_end: self.balance_info_at_date(period.end_date_inclusive(start_date)),
            categories,
        }
    }

    /// Tiles `period` with as many whole `step_period` windows as fit from
    /// `start_date`, generating one chunk per step plus a summary chunk over
    /// the full period. A remainder shorter than the step is not reported.
    pub fn generate_report_stepped(
        &self,
        start_date: NaiveDate,
        period: Period,
        step_period: Period,
    ) -> Result<ReportStepped> {
        let steps = period.divide_into(start_date, step_period);
        if steps == 0 {
            return Err(BookError::InvalidPeriod(
                "step period cannot be larger than total period".into(),
            ));
        }
        tracing::debug!(steps, start = %start_date, "generating stepped report");

        let mut chunks = Vec::with_capacity(steps as usize);
        let mut cursor = start_date;
        for _ in 0..steps {
            chunks.push(self.generate_report_chunk(cursor, step_period));
            cursor = step_period.end_date_exclusive(cursor);
        }

        Ok(ReportStepped {
            start_date,
            period,
            step_period,
            chunks,
            summary: self.generate_report_chunk(start_date, period),
        })
    }

    fn category_report_entry(
        &self,
        category: &Category,
        start_date: NaiveDate,
        period: Period,
    ) -> ReportChunkCategory {
        let balance_info = self
            .category_transactions(category.id)
            .balance_info_for_period(start_date, period);
        let budgeted_income = category
            .income_budget
            .as_ref()
            .and_then(|budget| budget.get(period));
        let budgeted_expenses = category
            .expenses_budget
            .as_ref()
            .and_then(|budget| budget.get(period));

        ReportChunkCategory {
            category_id: Some(category.id),
            category_name: Some(category.name.clone()),
            balance_info,
            budgeted_income,
            budgeted_expenses,
            income_difference: budgeted_income.map(|budgeted| balance_info.income - budgeted),
            expenses_difference: budgeted_expenses.map(|budgeted| balance_info.expenses - budgeted),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Balanceable for AccountBook {
    fn transactions(&self) -> Vec<&Transaction> {
        AccountBook::transactions(self)
    }
}
