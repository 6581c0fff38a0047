use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_manager::audit::AlertLogger;
use finance_manager::cli::{
    handle_add, handle_budgets, handle_expenses, handle_forecast, handle_monthly,
    handle_overview, handle_report_command, handle_subcategories, handle_top, AddArgs,
    AppContext, ReportCommands, TopArgs,
};
use finance_manager::config::{FinancePaths, Settings};
use finance_manager::events::{register_default_handlers, EventBus};
use finance_manager::services::forecast::ExpenseForecaster;

#[derive(Parser)]
#[command(
    name = "finman",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance core: category roll-ups, budgets, forecasts and alerts",
    long_about = "finman reads accounts, categories, transactions and budgets from a JSON \
                  seed and reports on them. New transactions are checked against their \
                  category and budget, and alerts are written to an append-only log."
)]
struct Cli {
    /// Seed file to use instead of the one in the data directory
    #[arg(long, global = true, env = "FINANCE_MANAGER_SEED")]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record counts and account balances
    Overview,

    /// Show the subcategory tree under a category
    #[command(alias = "tree")]
    Subcategories {
        /// Category name or ID
        category: String,
    },

    /// Expense total for a category including its subcategories
    Expenses {
        /// Category name or ID
        category: String,
    },

    /// Categories ranked by spending
    Top(TopArgs),

    /// Average monthly expense forecast for a category
    Forecast {
        /// Category name or ID
        category: String,
        /// Number of trailing active months to average
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Check every budget against spending
    Budgets,

    /// Add a transaction
    #[command(alias = "txn")]
    Add(AddArgs),

    /// Staged reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Expense totals for several months
    Monthly {
        /// Months in YYYY-MM form
        #[arg(required = true)]
        months: Vec<String>,
    },

    /// Show recent alerts
    Alerts {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    finance_manager::init_tracing(&settings.log_filter);

    let Some(command) = cli.command else {
        println!("finman - personal finance reports and alerts");
        println!();
        println!("Run 'finman --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Config => {
            println!("finman configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Seed file:      {}", paths.seed_file().display());
            println!("Alert log:      {}", paths.alert_log().display());
            println!();
            println!("Settings:");
            println!("  Currency:          {}", settings.currency_code);
            println!("  Balance threshold: {}", settings.balance_threshold);
            println!("  Default budget:    {}", settings.default_budget_limit);
            println!("  Forecast horizon:  {} months", settings.forecast_horizon_months);
            println!("  Top categories:    {}", settings.top_k);
            println!("  Log filter:        {}", settings.log_filter);
            return Ok(());
        }
        Commands::Alerts { limit } => {
            let entries = AlertLogger::new(paths.alert_log()).read_recent(limit)?;
            if entries.is_empty() {
                println!("No alerts recorded.");
            }
            for entry in entries {
                println!("{}", entry);
            }
            return Ok(());
        }
        _ => {}
    }

    let mut ctx = AppContext::load(paths, settings, cli.seed)?;
    let forecaster = Arc::new(ExpenseForecaster::new());

    let output = match command {
        Commands::Overview => handle_overview(&ctx)?,
        Commands::Subcategories { category } => handle_subcategories(&ctx, &category)?,
        Commands::Expenses { category } => handle_expenses(&ctx, &category)?,
        Commands::Top(args) => handle_top(&ctx, &args)?,
        Commands::Forecast { category, months } => {
            handle_forecast(&ctx, &forecaster, &category, months)?
        }
        Commands::Budgets => handle_budgets(&ctx)?,
        Commands::Add(args) => {
            let mut bus = EventBus::new();
            register_default_handlers(&mut bus);
            handle_add(&mut ctx, &bus, args)?
        }
        Commands::Report(cmd) => handle_report_command(&ctx, Arc::clone(&forecaster), cmd)?,
        Commands::Monthly { months } => handle_monthly(&ctx, &months)?,
        Commands::Config | Commands::Alerts { .. } => String::new(),
    };

    print!("{}", output);
    Ok(())
}
