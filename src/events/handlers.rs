//! Built-in handlers
//!
//! Each handler reads its inputs from the payload it is given and returns a
//! fresh partial result. Missing numeric keys read as zero, except the
//! balance threshold which falls back to [`DEFAULT_BALANCE_THRESHOLD`].

use serde_json::{json, Value};

use super::{Event, EventBus, EventKind, Payload};

/// Threshold used when a balance payload carries none
pub const DEFAULT_BALANCE_THRESHOLD: i64 = 100;

fn int(payload: &Payload, key: &str) -> i64 {
    payload.get(key).and_then(Value::as_i64).unwrap_or(0)
}

/// `{amount}` -> `{balance_delta: amount}`
pub fn balance_delta_handler(_event: &Event, payload: &Payload) -> Payload {
    let mut out = Payload::new();
    out.insert("balance_delta".into(), json!(int(payload, "amount")));
    out
}

/// `{amount, category_id, budget_limit, current_spent}` -> `{spent}` plus an
/// alert once the budget is exceeded
///
/// Only expense amounts add to the spent total. A limit of zero or less
/// means "no budget" and never alerts.
pub fn budget_handler(_event: &Event, payload: &Payload) -> Payload {
    let amount = int(payload, "amount");
    let limit = int(payload, "budget_limit");
    let mut spent = int(payload, "current_spent");
    if amount < 0 {
        spent = spent.saturating_add(amount.saturating_abs());
    }

    let mut out = Payload::new();
    out.insert("spent".into(), json!(spent));

    if limit > 0 && spent > limit {
        let category_id = payload
            .get("category_id")
            .cloned()
            .unwrap_or(Value::Null);
        let label = category_id.as_str().unwrap_or("unknown").to_string();
        out.insert(
            "alert".into(),
            json!(format!(
                "Budget exceeded for category {}: spent {} of {}",
                label, spent, limit
            )),
        );
        out.insert("category_id".into(), category_id);
        out.insert("limit".into(), json!(limit));
    }
    out
}

/// `{balance, threshold}` -> `{}` or an alert when the balance is below the
/// threshold
pub fn balance_threshold_handler(_event: &Event, payload: &Payload) -> Payload {
    let balance = int(payload, "balance");
    let threshold = payload
        .get("threshold")
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_BALANCE_THRESHOLD);

    let mut out = Payload::new();
    if balance < threshold {
        out.insert(
            "alert".into(),
            json!(format!(
                "Balance alert: Current balance {} is below threshold {}",
                balance, threshold
            )),
        );
        out.insert("balance".into(), json!(balance));
        out.insert("threshold".into(), json!(threshold));
    }
    out
}

/// Subscribe the application's standard handlers
///
/// `TRANSACTION_ADDED` gets balance-delta then budget; `BALANCE_ALERT` gets
/// the balance threshold check.
pub fn register_default_handlers(bus: &mut EventBus) {
    bus.subscribe(EventKind::TransactionAdded, balance_delta_handler);
    bus.subscribe(EventKind::TransactionAdded, budget_handler);
    bus.subscribe(EventKind::BalanceAlert, balance_threshold_handler);
}

/// Merge handler results left to right; later keys win
pub fn merge_results<'a, I>(results: I) -> Payload
where
    I: IntoIterator<Item = &'a Payload>,
{
    let mut merged = Payload::new();
    for result in results {
        for (key, value) in result {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload fixtures must be objects"),
        }
    }

    fn event(kind: EventKind, p: &Payload) -> Event {
        Event::new(kind, p.clone())
    }

    #[test]
    fn test_balance_delta_is_pure() {
        let p = payload(json!({"amount": -150, "account_id": "a1"}));
        let e = event(EventKind::TransactionAdded, &p);
        let snapshot = p.clone();

        let first = balance_delta_handler(&e, &p);
        let second = balance_delta_handler(&e, &p);

        assert_eq!(first["balance_delta"], json!(-150));
        assert_eq!(first, second);
        assert_eq!(p, snapshot);
    }

    #[test]
    fn test_budget_under_limit() {
        let p = payload(json!({
            "amount": -600, "category_id": "c1", "budget_limit": 1000, "current_spent": 0
        }));
        let e = event(EventKind::TransactionAdded, &p);

        let result = budget_handler(&e, &p);
        assert_eq!(result, payload(json!({"spent": 600})));
        assert_eq!(result, budget_handler(&e, &p));
    }

    #[test]
    fn test_budget_extreme_amount_saturates() {
        let p = payload(json!({
            "amount": i64::MIN, "category_id": "c1", "budget_limit": 1000, "current_spent": 500
        }));
        let result = budget_handler(&event(EventKind::TransactionAdded, &p), &p);

        assert_eq!(result["spent"], json!(i64::MAX));
        assert!(result.contains_key("alert"));
    }

    #[test]
    fn test_budget_exceeded_alerts() {
        let p = payload(json!({
            "amount": -1500, "category_id": "c1", "budget_limit": 1000, "current_spent": 0
        }));
        let result = budget_handler(&event(EventKind::TransactionAdded, &p), &p);

        assert!(result["alert"].as_str().unwrap().contains("Budget exceeded"));
        assert_eq!(result["spent"], json!(1500));
        assert_eq!(result["limit"], json!(1000));
        assert_eq!(result["category_id"], json!("c1"));
    }

    #[test]
    fn test_budget_without_limit_never_alerts() {
        let p = payload(json!({"amount": -5000, "category_id": "c1", "current_spent": 100}));
        let result = budget_handler(&event(EventKind::TransactionAdded, &p), &p);
        assert_eq!(result, payload(json!({"spent": 5100})));
    }

    #[test]
    fn test_income_does_not_add_to_spent() {
        let p = payload(json!({"amount": 700, "budget_limit": 10, "current_spent": 5}));
        let result = budget_handler(&event(EventKind::TransactionAdded, &p), &p);
        assert_eq!(result, payload(json!({"spent": 5})));
    }

    #[test]
    fn test_balance_threshold() {
        let low = payload(json!({"balance": 50, "threshold": 100}));
        let result = balance_threshold_handler(&event(EventKind::BalanceAlert, &low), &low);
        assert!(result["alert"].as_str().unwrap().contains("Balance alert"));
        assert_eq!(result["balance"], json!(50));

        let fine = payload(json!({"balance": 100, "threshold": 100}));
        let result = balance_threshold_handler(&event(EventKind::BalanceAlert, &fine), &fine);
        assert!(result.is_empty());

        let default_threshold = payload(json!({"balance": 99}));
        let result = balance_threshold_handler(
            &event(EventKind::BalanceAlert, &default_threshold),
            &default_threshold,
        );
        assert_eq!(result["threshold"], json!(DEFAULT_BALANCE_THRESHOLD));
    }

    #[test]
    fn test_transaction_added_scenario() {
        let mut bus = EventBus::new();
        register_default_handlers(&mut bus);

        let results = bus.publish(
            EventKind::TransactionAdded,
            payload(json!({
                "amount": -1500, "category_id": "food", "budget_limit": 1000, "current_spent": 0
            })),
        );

        assert_eq!(results.len(), 2);
        let merged = merge_results(&results);
        assert!(merged.contains_key("alert"));
        assert_eq!(merged["spent"], json!(1500));
        assert_eq!(merged["balance_delta"], json!(-1500));
    }

    #[test]
    fn test_default_registration() {
        let mut bus = EventBus::new();
        register_default_handlers(&mut bus);
        assert_eq!(bus.handler_count(EventKind::TransactionAdded), 2);
        assert_eq!(bus.handler_count(EventKind::BalanceAlert), 1);
        assert_eq!(bus.handler_count(EventKind::BudgetAlert), 0);
    }

    #[test]
    fn test_merge_later_keys_win() {
        let results = vec![payload(json!({"a": 1, "b": 1})), payload(json!({"b": 2}))];
        assert_eq!(merge_results(&results), payload(json!({"a": 1, "b": 2})));
    }
}
