//! Overview command

use crate::display::{format_overview, OverviewCounts};
use crate::error::FinanceResult;
use crate::reports::balance_forecast;

use super::AppContext;

/// `overview`: record counts and current account balances
pub fn handle_overview(ctx: &AppContext) -> FinanceResult<String> {
    let seed = &ctx.seed;
    let balances = balance_forecast(&seed.accounts, &seed.transactions)?;
    let counts = OverviewCounts {
        accounts: seed.accounts.len(),
        categories: seed.categories.len(),
        transactions: seed.transactions.len(),
        budgets: seed.budgets.len(),
    };
    Ok(format_overview(counts, &seed.accounts, &balances, ctx.currency()))
}
