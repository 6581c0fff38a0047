//! Account model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// A financial account as loaded from the seed file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name (e.g., "Kaspi Gold")
    pub name: String,

    /// Opening balance in minor units
    pub balance: Money,

    /// ISO-like currency code
    pub currency: String,
}

impl Account {
    /// Create a new account
    pub fn new(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        balance: Money,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}
