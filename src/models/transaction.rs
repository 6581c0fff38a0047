//! Transaction model
//!
//! Transactions are immutable records. Nothing about account or category
//! existence is checked at construction time; see
//! [`crate::services::validation::validate_transaction`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// The category this transaction is booked against
    pub cat_id: CategoryId,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Timestamp in `YYYY-MM-DD[...]` form, lexicographically sortable
    pub ts: String,

    /// Free-text note
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Create a new transaction with an empty note
    pub fn new(
        id: impl Into<TransactionId>,
        account_id: impl Into<AccountId>,
        cat_id: impl Into<CategoryId>,
        amount: Money,
        ts: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            cat_id: cat_id.into(),
            amount,
            ts: ts.into(),
            note: String::new(),
        }
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Check if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Check if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Calendar month of the timestamp (`YYYY-MM`)
    ///
    /// Timestamps shorter than seven characters are returned whole.
    pub fn month(&self) -> &str {
        self.ts.get(..7).unwrap_or(&self.ts)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.ts.get(..10).unwrap_or(&self.ts),
            self.cat_id,
            self.amount,
            self.note
        )
    }
}
