//! Alert log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{EventKind, Payload};
use crate::models::CategoryId;

/// One alert raised by an event handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// When the alert was recorded (UTC)
    pub timestamp: DateTime<Utc>,

    /// Event kind whose handler raised the alert
    pub event: EventKind,

    /// Category the alert is about, for budget alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    /// Human-readable alert text
    pub message: String,
}

impl AlertEntry {
    /// Create an entry stamped with the current time
    pub fn new(event: EventKind, category_id: Option<CategoryId>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
            category_id,
            message: message.into(),
        }
    }

    /// Build an entry from a handler result, if it carries an `alert`
    pub fn from_result(event: EventKind, result: &Payload) -> Option<Self> {
        let message = result.get("alert")?.as_str()?;
        let category_id = result
            .get("category_id")
            .and_then(|v| v.as_str())
            .map(CategoryId::from);
        Some(Self::new(event, category_id, message))
    }
}

impl std::fmt::Display for AlertEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.event,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("payload fixtures must be objects"),
        }
    }

    #[test]
    fn test_from_result_with_alert() {
        let result = payload(json!({
            "alert": "Budget exceeded for category food: spent 1500 of 1000",
            "category_id": "food",
            "spent": 1500
        }));
        let entry = AlertEntry::from_result(EventKind::TransactionAdded, &result).unwrap();

        assert_eq!(entry.event, EventKind::TransactionAdded);
        assert_eq!(entry.category_id, Some(CategoryId::from("food")));
        assert!(entry.message.starts_with("Budget exceeded"));
        assert!(entry.to_string().contains("TRANSACTION_ADDED"));
    }

    #[test]
    fn test_from_result_without_alert() {
        let result = payload(json!({"spent": 10}));
        assert!(AlertEntry::from_result(EventKind::TransactionAdded, &result).is_none());
    }

    #[test]
    fn test_serialization_skips_missing_category() {
        let entry = AlertEntry::new(EventKind::BalanceAlert, None, "low");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"], json!("BALANCE_ALERT"));
        assert!(json.get("category_id").is_none());
    }
}
