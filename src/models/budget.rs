//! Budget model
//!
//! A budget is a spending ceiling for one category. The `period` label is
//! carried along for display; filtering transactions to a period window is
//! the caller's job.

use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget constrains
    pub cat_id: CategoryId,

    /// Absolute spending ceiling (non-negative)
    pub limit: Money,

    /// Free-form period label, e.g. "month"
    pub period: String,
}

impl Budget {
    /// Create a new budget
    pub fn new(
        id: impl Into<BudgetId>,
        cat_id: impl Into<CategoryId>,
        limit: Money,
        period: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            cat_id: cat_id.into(),
            limit,
            period: period.into(),
        }
    }

    /// Return a copy of this budget with a different limit
    pub fn with_limit(&self, limit: Money) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }
}
