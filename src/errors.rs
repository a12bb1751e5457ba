use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for account book operations.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("Account `{0}` already exists")]
    DuplicateAccount(String),
    #[error("Category `{0}` already exists")]
    DuplicateCategory(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}

pub type Result<T> = StdResult<T, BookError>;
