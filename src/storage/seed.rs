//! Seed document loading
//!
//! The seed is one JSON object with four top-level arrays. Missing arrays
//! read as empty; record shapes are checked by serde and nothing more.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::file_io::{read_json_required, write_json_atomic};
use crate::error::FinanceResult;
use crate::models::{Account, Budget, Category, Transaction};

/// Everything the application works on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

/// Read the seed document at `path`
pub fn load_seed(path: impl AsRef<Path>) -> FinanceResult<SeedData> {
    let path = path.as_ref();
    let seed: SeedData = read_json_required(path)?;
    debug!(
        path = %path.display(),
        accounts = seed.accounts.len(),
        categories = seed.categories.len(),
        transactions = seed.transactions.len(),
        budgets = seed.budgets.len(),
        "seed loaded"
    );
    Ok(seed)
}

/// Write `seed` back to `path`
pub fn save_seed(path: impl AsRef<Path>, seed: &SeedData) -> FinanceResult<()> {
    write_json_atomic(path, seed)
}
