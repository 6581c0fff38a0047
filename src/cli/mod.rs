//! CLI command handlers
//!
//! Bridges clap argument parsing with the engine. Handlers borrow an
//! [`AppContext`] holding the loaded seed, the settings and the paths.

pub mod account;
pub mod budget;
pub mod category;
pub mod report;
pub mod transaction;

use std::path::PathBuf;

use crate::config::{FinancePaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, Category};
use crate::services::validation::{find_account, resolve_category};
use crate::storage::{load_seed, SeedData};

pub use account::handle_overview;
pub use budget::{handle_budgets, handle_monthly};
pub use category::{handle_expenses, handle_forecast, handle_subcategories};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_add, handle_top, AddArgs, TopArgs};

/// Everything a command handler needs
#[derive(Debug)]
pub struct AppContext {
    pub paths: FinancePaths,
    pub settings: Settings,
    pub seed_path: PathBuf,
    pub seed: SeedData,
}

impl AppContext {
    /// Load the seed at `seed_path`, or the default seed location
    pub fn load(
        paths: FinancePaths,
        settings: Settings,
        seed_path: Option<PathBuf>,
    ) -> FinanceResult<Self> {
        let seed_path = seed_path.unwrap_or_else(|| paths.seed_file());
        let seed = load_seed(&seed_path)?;
        Ok(Self {
            paths,
            settings,
            seed_path,
            seed,
        })
    }

    /// Category by id or case-insensitive name
    pub fn category(&self, identifier: &str) -> FinanceResult<&Category> {
        resolve_category(&self.seed.categories, identifier)
            .into_option()
            .ok_or_else(|| FinanceError::category_not_found(identifier))
    }

    /// Account by id or case-insensitive name
    pub fn account(&self, identifier: &str) -> FinanceResult<&Account> {
        find_account(&self.seed.accounts, identifier)
            .into_option()
            .or_else(|| {
                self.seed
                    .accounts
                    .iter()
                    .find(|a| a.name.eq_ignore_ascii_case(identifier))
            })
            .ok_or_else(|| FinanceError::account_not_found(identifier))
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_code
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use tempfile::TempDir;

    pub const SEED: &str = r#"{
        "accounts": [
            {"id": "acc1", "name": "Kaspi Gold", "balance": 10000, "currency": "KZT"},
            {"id": "acc2", "name": "Cash", "balance": 500, "currency": "KZT"}
        ],
        "categories": [
            {"id": "food", "name": "Food", "type": "expense"},
            {"id": "cafe", "name": "Cafe", "parent_id": "food", "type": "expense"},
            {"id": "transport", "name": "Transport", "type": "expense"},
            {"id": "salary", "name": "Salary", "type": "income"}
        ],
        "transactions": [
            {"id": "t1", "account_id": "acc1", "cat_id": "food", "amount": -300, "ts": "2025-01-05"},
            {"id": "t2", "account_id": "acc1", "cat_id": "cafe", "amount": -700, "ts": "2025-01-12"},
            {"id": "t3", "account_id": "acc2", "cat_id": "transport", "amount": -200, "ts": "2025-02-01"},
            {"id": "t4", "account_id": "acc1", "cat_id": "salary", "amount": 5000, "ts": "2025-02-10"}
        ],
        "budgets": [
            {"id": "b1", "cat_id": "food", "limit": 1000, "period": "month"}
        ]
    }"#;

    /// Context over a temp directory holding [`SEED`]
    pub fn context() -> (AppContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.seed_file(), SEED).unwrap();
        let ctx = AppContext::load(paths, Settings::default(), None).unwrap();
        (ctx, temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::context;

    #[test]
    fn test_category_lookup_by_id_and_name() {
        let (ctx, _temp) = context();
        assert_eq!(ctx.category("cafe").unwrap().name, "Cafe");
        assert_eq!(ctx.category("TRANSPORT").unwrap().id, "transport");
        assert!(ctx.category("rent").unwrap_err().is_not_found());
    }

    #[test]
    fn test_account_lookup_by_id_and_name() {
        let (ctx, _temp) = context();
        assert_eq!(ctx.account("acc2").unwrap().name, "Cash");
        assert_eq!(ctx.account("kaspi gold").unwrap().id, "acc1");
        assert!(ctx.account("nope").is_err());
    }
}
