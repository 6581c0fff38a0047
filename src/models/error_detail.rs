//! Validation failure details
//!
//! These are expected, displayable outcomes rather than operational errors,
//! so they are plain data carried in `Either::Left`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::category::CategoryKind;
use super::ids::{AccountId, CategoryId};
use super::money::Money;

/// Why a transaction or budget failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorDetail {
    /// The transaction references an unknown account
    AccountNotFound { account_id: AccountId },

    /// The transaction references an unknown category
    CategoryNotFound { category_id: CategoryId },

    /// The amount's sign contradicts the category type
    CategoryTypeMismatch {
        category_name: String,
        category_type: CategoryKind,
        amount: Money,
    },

    /// Spending in the category went over the budget limit
    BudgetExceeded {
        category_id: CategoryId,
        limit: Money,
        spent: Money,
        over_budget: Money,
    },
}

impl ErrorDetail {
    /// Machine-readable kind, e.g. `budget_exceeded`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountNotFound { .. } => "account_not_found",
            Self::CategoryNotFound { .. } => "category_not_found",
            Self::CategoryTypeMismatch { .. } => "category_type_mismatch",
            Self::BudgetExceeded { .. } => "budget_exceeded",
        }
    }

    /// Human-readable message for direct display
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Render as a flat JSON object: `{kind, message, ...details}`
    pub fn to_json(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()));
        if let Value::Object(map) = &mut value {
            map.insert("message".into(), Value::String(self.message()));
        }
        value
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountNotFound { account_id } => {
                write!(f, "Account with ID {} does not exist", account_id)
            }
            Self::CategoryNotFound { category_id } => {
                write!(f, "Category with ID {} does not exist", category_id)
            }
            Self::CategoryTypeMismatch {
                category_name,
                category_type: CategoryKind::Income,
                ..
            } => write!(
                f,
                "Income category {} cannot have negative amount",
                category_name
            ),
            Self::CategoryTypeMismatch {
                category_name,
                category_type: CategoryKind::Expense,
                ..
            } => write!(
                f,
                "Expense category {} cannot have positive amount",
                category_name
            ),
            Self::BudgetExceeded {
                category_id,
                limit,
                spent,
                ..
            } => write!(
                f,
                "Budget limit exceeded for category {}: spent {} of {}",
                category_id, spent, limit
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_serde_tag() {
        let detail = ErrorDetail::CategoryNotFound {
            category_id: "nope".into(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], detail.kind());
        assert_eq!(json["category_id"], "nope");
    }

    #[test]
    fn test_to_json_includes_message() {
        let detail = ErrorDetail::BudgetExceeded {
            category_id: "food".into(),
            limit: Money::from_minor(1000),
            spent: Money::from_minor(1100),
            over_budget: Money::from_minor(100),
        };
        let json = detail.to_json();
        assert_eq!(json["kind"], "budget_exceeded");
        assert_eq!(json["over_budget"], 100);
        assert!(json["message"].as_str().unwrap().contains("food"));
    }

    #[test]
    fn test_mismatch_messages() {
        let income = ErrorDetail::CategoryTypeMismatch {
            category_name: "Salary".into(),
            category_type: CategoryKind::Income,
            amount: Money::from_minor(-100),
        };
        assert!(income.message().starts_with("Income category"));

        let expense = ErrorDetail::CategoryTypeMismatch {
            category_name: "Food".into(),
            category_type: CategoryKind::Expense,
            amount: Money::from_minor(100),
        };
        assert!(expense.message().starts_with("Expense category"));
    }
}
