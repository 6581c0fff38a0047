//! Budget commands

use crate::display::{format_budget_statuses, format_monthly_expenses};
use crate::error::FinanceResult;
use crate::reports::expenses_by_month;
use crate::services::budget::budget_statuses;

use super::AppContext;

/// `budgets`: every budget checked against all transactions
pub fn handle_budgets(ctx: &AppContext) -> FinanceResult<String> {
    let statuses = budget_statuses(&ctx.seed.budgets, &ctx.seed.transactions);
    Ok(format_budget_statuses(
        &statuses,
        &ctx.seed.categories,
        ctx.currency(),
    ))
}

/// `monthly <YYYY-MM>...`: expense totals per month, computed concurrently
pub fn handle_monthly(ctx: &AppContext, months: &[String]) -> FinanceResult<String> {
    let totals = expenses_by_month(&ctx.seed.transactions, months)?;
    Ok(format_monthly_expenses(&totals, ctx.currency()))
}
