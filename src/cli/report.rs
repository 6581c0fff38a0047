//! Report commands

use std::sync::Arc;

use clap::Subcommand;

use crate::error::FinanceResult;
use crate::models::TransactionSet;
use crate::reports::category::{default_aggregators, default_validators};
use crate::reports::{BudgetService, ReportService};
use crate::services::forecast::ExpenseForecaster;
use crate::services::ranking::filtered;

use super::AppContext;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Monthly budget report
    Month {
        /// Month in YYYY-MM form
        month: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report on one category and its subtree
    Category {
        /// Category name or ID
        category: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(
    ctx: &AppContext,
    forecaster: Arc<ExpenseForecaster>,
    cmd: ReportCommands,
) -> FinanceResult<String> {
    match cmd {
        ReportCommands::Month { month, json } => {
            let in_month: Vec<_> = filtered(ctx.seed.transactions.iter().cloned(), |t| {
                t.month() == month
            })
            .collect();
            let report = BudgetService::with_defaults().monthly_report(
                &month,
                &in_month,
                &ctx.seed.budgets,
                &ctx.seed.categories,
            );
            if json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
            } else {
                Ok(report.format_terminal())
            }
        }

        ReportCommands::Category { category, json } => {
            let target = ctx.category(&category)?;
            let service = ReportService::new(
                default_validators(),
                default_aggregators(
                    forecaster,
                    ctx.settings.forecast_horizon_months,
                    ctx.settings.top_k,
                ),
            );
            let transactions = TransactionSet::from(ctx.seed.transactions.as_slice());
            let report = service.category_report(&target.id, &transactions, &ctx.seed.categories);
            if json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
            } else {
                Ok(report.format_terminal(&target.name))
            }
        }
    }
}
