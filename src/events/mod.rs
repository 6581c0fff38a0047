//! In-process publish/subscribe
//!
//! An [`EventBus`] is an explicitly constructed registry mapping an
//! [`EventKind`] to an ordered list of handlers. Publishing runs every
//! handler for the kind synchronously, in subscription order, and returns
//! their partial results. The bus owns no other state.

pub mod bus;
pub mod handlers;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bus::{EventBus, Handler, SubscriptionId};
pub use handlers::{
    balance_delta_handler, balance_threshold_handler, budget_handler, merge_results,
    register_default_handlers,
};

/// Flat JSON object passed to and returned from handlers
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The kinds of event the application publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    TransactionAdded,
    BudgetAlert,
    BalanceAlert,
}

impl EventKind {
    /// Wire name, e.g. `TRANSACTION_ADDED`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionAdded => "TRANSACTION_ADDED",
            Self::BudgetAlert => "BUDGET_ALERT",
            Self::BalanceAlert => "BALANCE_ALERT",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub payload: Payload,
}

impl Event {
    /// Stamp `payload` with a fresh id and the current time
    pub fn new(kind: EventKind, payload: Payload) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp: Utc::now(),
            payload,
        }
    }
}
