//! finance-manager - personal finance core with a command-line front end
//!
//! Loads accounts, categories, transactions and budgets from a JSON seed and
//! answers questions about them: category roll-ups, top spending categories,
//! budget checks, expense forecasts and monthly reports. Adding a transaction
//! runs it through an event bus whose handlers raise budget and balance
//! alerts.
//!
//! # Architecture
//!
//! - `models`: core data types (money, accounts, categories, transactions, budgets)
//! - `functional`: `Maybe`/`Either` containers and function composition
//! - `services`: pure business logic (validation, categories, budgets, ranking, forecasts)
//! - `events`: the event bus and its default handlers
//! - `reports`: staged report pipelines and concurrent batch computations
//! - `audit`: append-only alert log
//! - `storage`: JSON file I/O and the seed document
//! - `config`: paths and user settings
//! - `display`: terminal formatting
//! - `cli`: command handlers used by the `finman` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_manager::config::{FinancePaths, Settings};
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! finance_manager::init_tracing(&settings.log_filter);
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod functional;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber once
///
/// `RUST_LOG` wins over `default_directive`. Output goes to stderr so command
/// output on stdout stays clean.
pub fn init_tracing(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_directive))
            .unwrap_or_else(|_| EnvFilter::new("finance_manager=info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
