//! Category commands: subtree listing, roll-up and forecast
//!
//! Handlers return the text to print.

use crate::display::{format_forecast, format_rolled_up_expenses, format_subcategory_tree};
use crate::error::FinanceResult;
use crate::models::TransactionSet;
use crate::services::category::CategoryTree;
use crate::services::forecast::ExpenseForecaster;

use super::AppContext;

/// `subcategories <category>`
pub fn handle_subcategories(ctx: &AppContext, category: &str) -> FinanceResult<String> {
    let root = ctx.category(category)?;
    let tree = CategoryTree::new(&ctx.seed.categories);
    Ok(format_subcategory_tree(&tree, root))
}

/// `expenses <category>`
pub fn handle_expenses(ctx: &AppContext, category: &str) -> FinanceResult<String> {
    let root = ctx.category(category)?;
    let tree = CategoryTree::new(&ctx.seed.categories);
    let total = tree.sum_expenses(root.id.as_str(), &ctx.seed.transactions);
    let count = tree.subcategories_of(root.id.as_str()).len();
    Ok(format_rolled_up_expenses(root, total, count, ctx.currency()))
}

/// `forecast <category> [--months N]`
pub fn handle_forecast(
    ctx: &AppContext,
    forecaster: &ExpenseForecaster,
    category: &str,
    months: Option<usize>,
) -> FinanceResult<String> {
    let target = ctx.category(category)?;
    let horizon = months.unwrap_or(ctx.settings.forecast_horizon_months);
    let transactions = TransactionSet::from(ctx.seed.transactions.as_slice());
    let value = forecaster.forecast_expenses(&target.id, &transactions, horizon);
    Ok(format_forecast(target, horizon, value, ctx.currency()))
}
