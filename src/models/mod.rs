//! Core data models
//!
//! Immutable value records for the finance domain: accounts, categories,
//! transactions and budgets, plus the validation failure details produced
//! when checking them.

pub mod account;
pub mod budget;
pub mod category;
pub mod error_detail;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod transaction_set;

pub use account::Account;
pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use error_detail::ErrorDetail;
pub use ids::{AccountId, BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use transaction::Transaction;
pub use transaction_set::TransactionSet;
