//! Display formatting for terminal output
//!
//! Plain-text tables and trees built from the values the engine returns.

pub mod account;
pub mod category;
pub mod report;

pub use account::{format_account_list, format_overview, OverviewCounts};
pub use category::{format_category_list, format_rolled_up_expenses, format_subcategory_tree};
pub use report::{
    format_alerts, format_budget_statuses, format_forecast, format_monthly_expenses,
    format_top_categories,
};
