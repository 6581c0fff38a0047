//! Category model
//!
//! Categories form a forest through `parent_id`. Each category is either an
//! income or an expense category, which constrains the sign of the
//! transactions booked against it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// Whether a category collects income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Only non-negative amounts are valid
    Income,
    /// Only non-positive amounts are valid
    Expense,
}

impl CategoryKind {
    /// Check whether an amount has the sign this kind allows
    pub fn accepts(&self, amount: Money) -> bool {
        match self {
            Self::Income => !amount.is_negative(),
            Self::Expense => !amount.is_positive(),
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("income"),
            Self::Expense => f.pad("expense"),
        }
    }
}

/// A node in the category tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Parent category, `None` for roots
    #[serde(default)]
    pub parent_id: Option<CategoryId>,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl Category {
    /// Create a root category
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            kind,
        }
    }

    /// Create a category below `parent`
    pub fn child_of(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        parent: impl Into<CategoryId>,
        kind: CategoryKind,
    ) -> Self {
        Self {
            parent_id: Some(parent.into()),
            ..Self::new(id, name, kind)
        }
    }

    /// Check whether this category is a root of the forest
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check whether `id` is this category's direct parent
    pub fn is_child_of(&self, id: &CategoryId) -> bool {
        self.parent_id.as_ref() == Some(id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_accepts_sign() {
        assert!(CategoryKind::Income.accepts(Money::from_minor(0)));
        assert!(CategoryKind::Income.accepts(Money::from_minor(5000)));
        assert!(!CategoryKind::Income.accepts(Money::from_minor(-1)));

        assert!(CategoryKind::Expense.accepts(Money::from_minor(0)));
        assert!(CategoryKind::Expense.accepts(Money::from_minor(-300)));
        assert!(!CategoryKind::Expense.accepts(Money::from_minor(1)));
    }

    #[test]
    fn test_child_of() {
        let food = Category::new("food", "Food", CategoryKind::Expense);
        let cafe = Category::child_of("cafe", "Cafe", "food", CategoryKind::Expense);

        assert!(food.is_root());
        assert!(!cafe.is_root());
        assert!(cafe.is_child_of(&food.id));
    }

    #[test]
    fn test_deserialize_type_field() {
        let json = r#"{"id":"c1","name":"Salary","parent_id":null,"type":"income"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.kind, CategoryKind::Income);
        assert!(category.is_root());

        let json = r#"{"id":"c2","name":"Cafe","parent_id":"c3","type":"expense"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.parent_id, Some(CategoryId::from("c3")));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(CategoryKind::parse("Income"), Some(CategoryKind::Income));
        assert_eq!(CategoryKind::parse("EXPENSE"), Some(CategoryKind::Expense));
        assert_eq!(CategoryKind::parse("transfer"), None);
    }
}
