//! Core engine
//!
//! Pure functions over read-only slices of domain records: category tree
//! traversal, validation, budget checks, forecasting, ranking and the
//! transaction transforms. The only state kept here is the forecast cache.

pub mod budget;
pub mod category;
pub mod forecast;
pub mod ranking;
pub mod transaction;
pub mod validation;

pub use budget::{check_budget, update_budget, BudgetStatus};
pub use category::{subcategories_of, sum_expenses, CategoryTree};
pub use forecast::{CacheStats, ExpenseForecaster};
pub use ranking::{filtered, top_categories};
pub use transaction::{account_balance, add_transaction};
pub use validation::{find_category, resolve_category, validate_transaction};
