//! Account book domain models and the balance/report engine.

pub mod account;
pub mod account_book;
pub mod balance;
pub mod budget;
pub mod category;
pub mod period;
pub mod report;
pub mod transaction;

pub use account::Account;
pub use account_book::AccountBook;
pub use balance::{BalanceInfo, Balanceable, TransactionSet};
pub use budget::BudgetTable;
pub use category::Category;
pub use period::{Period, PeriodUnit};
pub use report::{ReportChunk, ReportChunkCategory, ReportStepped};
pub use transaction::{Transaction, TransactionKind};
