//! User settings
//!
//! Every field has a serde default, so a partial or empty `config.json`
//! still loads.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency code shown next to amounts
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Balance below which a balance alert fires (minor units)
    #[serde(default = "default_balance_threshold")]
    pub balance_threshold: i64,

    /// Budget limit assumed for categories without a budget; 0 means none
    #[serde(default)]
    pub default_budget_limit: i64,

    /// Months averaged by the expense forecast
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon_months: usize,

    /// Rows shown by the top-categories ranking
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_code() -> String {
    "KZT".to_string()
}

fn default_balance_threshold() -> i64 {
    100
}

fn default_forecast_horizon() -> usize {
    3
}

fn default_top_k() -> usize {
    5
}

fn default_log_filter() -> String {
    "finance_manager=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_code: default_currency_code(),
            balance_threshold: default_balance_threshold(),
            default_budget_limit: 0,
            forecast_horizon_months: default_forecast_horizon(),
            top_k: default_top_k(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written back; call [`Settings::save`] for that.
    pub fn load_or_create(paths: &FinancePaths) -> FinanceResult<Self> {
        read_json(paths.settings_file())
            .map_err(|e| FinanceError::Config(format!("Failed to load settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> FinanceResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
