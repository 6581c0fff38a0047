//! Trailing-average expense forecast with memoization
//!
//! The forecast for a category is the mean monthly expense over the most
//! recent `horizon_months` calendar months that have any expense in that
//! category. Results are cached for the lifetime of the forecaster, keyed by
//! `(category, transaction set, horizon)`. The transaction set is compared by
//! value, so a fresh set with new transactions misses the cache while an
//! identical one hits it.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::models::{CategoryId, Transaction, TransactionSet};

/// Absolute expense totals per `YYYY-MM` month for one category
pub fn monthly_expenses(category_id: &CategoryId, transactions: &[Transaction]) -> BTreeMap<String, i64> {
    let mut months: BTreeMap<String, i64> = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.is_expense() && &t.cat_id == category_id)
    {
        let total = months.entry(t.month().to_string()).or_insert(0);
        *total = total.saturating_add(t.amount.abs().minor());
    }
    months
}

/// Uncached forecast: mean of the latest `horizon_months` active months
///
/// Returns `0.0` when the category has no expenses or the horizon is zero.
pub fn trailing_average(category_id: &CategoryId, transactions: &[Transaction], horizon_months: usize) -> f64 {
    let months = monthly_expenses(category_id, transactions);
    let recent: Vec<i64> = months.values().rev().take(horizon_months).copied().collect();
    if recent.is_empty() {
        return 0.0;
    }
    recent.iter().map(|&m| m as f64).sum::<f64>() / recent.len() as f64
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ForecastKey {
    category_id: CategoryId,
    transactions: TransactionSet,
    horizon_months: usize,
}

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizing expense forecaster
///
/// Safe to share between threads; the cache sits behind a mutex and is
/// never cleared.
#[derive(Debug, Default)]
pub struct ExpenseForecaster {
    cache: Mutex<HashMap<ForecastKey, f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExpenseForecaster {
    /// Create a forecaster with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Forecast monthly expense for `category_id`, reusing cached results
    pub fn forecast_expenses(
        &self,
        category_id: &CategoryId,
        transactions: &TransactionSet,
        horizon_months: usize,
    ) -> f64 {
        let key = ForecastKey {
            category_id: category_id.clone(),
            transactions: transactions.clone(),
            horizon_months,
        };

        if let Some(cached) = self.lock_cache().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(category = %category_id, horizon_months, "forecast cache hit");
            return *cached;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(category = %category_id, horizon_months, "forecast cache miss");
        let value = trailing_average(category_id, transactions, horizon_months);
        self.lock_cache().insert(key, value);
        value
    }

    /// Current cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.lock_cache().len(),
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<ForecastKey, f64>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
