//! Transaction commands: manual entry and top-category ranking

use chrono::Local;
use clap::Args;
use serde_json::json;
use tracing::{debug, info};

use crate::audit::{AlertEntry, AlertLogger};
use crate::display::{format_alerts, format_top_categories};
use crate::error::{FinanceError, FinanceResult};
use crate::events::{EventBus, EventKind, Payload};
use crate::functional::Either;
use crate::models::{Money, Transaction, TransactionId};
use crate::services::budget::spent_in_category;
use crate::services::ranking::{filtered, top_categories};
use crate::services::transaction::account_balance;
use crate::services::validation::validate_transaction;
use crate::storage::save_seed;

use super::AppContext;

/// Arguments of `add`
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Account name or ID
    pub account: String,
    /// Category name or ID
    pub category: String,
    /// Amount in minor units (negative for expenses)
    #[arg(allow_negative_numbers = true, value_parser = clap::value_parser!(i64).range(i64::MIN + 1..))]
    pub amount: i64,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Free-text note
    #[arg(short, long)]
    pub note: Option<String>,
}

/// Arguments of `top`
#[derive(Args, Debug, Clone, Default)]
pub struct TopArgs {
    /// Number of categories to show (defaults to the `top_k` setting)
    #[arg(short)]
    pub k: Option<usize>,
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date to include, whole day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// `top [-k N] [--from D] [--to D]`
pub fn handle_top(ctx: &AppContext, args: &TopArgs) -> FinanceResult<String> {
    let k = args.k.unwrap_or(ctx.settings.top_k);
    let from = args.from.as_deref();
    let to = args.to.as_deref();

    let in_range = |t: &Transaction| {
        let after_start = from.map_or(true, |f| t.ts.as_str() >= f);
        let before_end = to.map_or(true, |e| t.ts.get(..e.len()).unwrap_or(t.ts.as_str()) <= e);
        after_start && before_end
    };

    let rows: Vec<(String, Money)> =
        top_categories(filtered(&ctx.seed.transactions, in_range), &ctx.seed.categories, k)
            .collect();
    Ok(format_top_categories(&rows, ctx.currency()))
}

/// `add <account> <category> <amount>`
///
/// Validates the transaction, publishes `TRANSACTION_ADDED` and
/// `BALANCE_ALERT`, saves the seed with the new row and logs any alerts.
/// The in-memory seed only changes once the file write succeeded.
pub fn handle_add(ctx: &mut AppContext, bus: &EventBus, args: AddArgs) -> FinanceResult<String> {
    let account = ctx.account(&args.account)?.clone();
    let category = ctx.category(&args.category)?.clone();

    let ts = args
        .date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let transaction = Transaction::new(
        TransactionId::generate(),
        account.id.clone(),
        category.id.clone(),
        Money::from_minor(args.amount),
        ts,
    )
    .with_note(args.note.unwrap_or_default());

    if let Either::Left(detail) =
        validate_transaction(&transaction, &ctx.seed.accounts, &ctx.seed.categories)
    {
        return Err(FinanceError::Validation(detail.message()));
    }

    let budget_limit = ctx
        .seed
        .budgets
        .iter()
        .find(|b| b.cat_id == category.id)
        .map(|b| b.limit.minor())
        .unwrap_or(ctx.settings.default_budget_limit);
    let current_spent = spent_in_category(&category.id, &ctx.seed.transactions);

    let added = bus.publish(
        EventKind::TransactionAdded,
        payload(json!({
            "amount": transaction.amount,
            "account_id": account.id,
            "category_id": category.id,
            "budget_limit": budget_limit,
            "current_spent": current_spent,
        }))?,
    );

    let mut seed = ctx.seed.clone();
    seed.transactions.push(transaction.clone());
    let balance = account.balance + account_balance(&seed.transactions, &account.id);
    let balance_results = bus.publish(
        EventKind::BalanceAlert,
        payload(json!({
            "balance": balance,
            "threshold": ctx.settings.balance_threshold,
        }))?,
    );
    debug!(
        transaction_added = added.len(),
        balance_alert = balance_results.len(),
        "handlers ran"
    );

    let alerts: Vec<AlertEntry> = added
        .iter()
        .filter_map(|r| AlertEntry::from_result(EventKind::TransactionAdded, r))
        .chain(
            balance_results
                .iter()
                .filter_map(|r| AlertEntry::from_result(EventKind::BalanceAlert, r)),
        )
        .collect();
    save_seed(&ctx.seed_path, &seed)?;
    ctx.seed = seed;
    AlertLogger::new(ctx.paths.alert_log()).log_batch(&alerts)?;
    info!(id = %transaction.id, account = %account.id, category = %category.id, "transaction added");

    let mut output = format!(
        "Added {}: {} in {} ({})\nBalance: {}\n",
        transaction.id,
        transaction.amount.format_with_code(ctx.currency()),
        category.name,
        account.name,
        balance.format_with_code(ctx.currency()),
    );
    output.push_str(&format_alerts(&alerts));
    Ok(output)
}

/// Event payloads must be JSON objects
fn payload(value: serde_json::Value) -> FinanceResult<Payload> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(FinanceError::Event(format!(
            "payload must be a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::fixtures::context;
    use crate::events::register_default_handlers;
    use crate::storage::load_seed;

    fn bus() -> EventBus {
        let mut bus = EventBus::new();
        register_default_handlers(&mut bus);
        bus
    }

    fn add_args(account: &str, category: &str, amount: i64) -> AddArgs {
        AddArgs {
            account: account.into(),
            category: category.into(),
            amount,
            date: Some("2025-03-01".into()),
            note: Some("test".into()),
        }
    }

    #[test]
    fn test_non_object_payload_is_an_event_error() {
        let err = payload(json!([1, 2])).unwrap_err();
        assert!(matches!(err, FinanceError::Event(_)));
        assert_eq!(payload(json!({"amount": -5})).unwrap()["amount"], json!(-5));
    }

    #[test]
    fn test_top_all_time() {
        let (ctx, _temp) = context();
        let output = handle_top(&ctx, &TopArgs::default()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[2].contains("Cafe"));
        assert!(lines[3].contains("Food"));
        assert!(lines[4].contains("Transport"));
        assert!(!output.contains("Salary"));
    }

    #[test]
    fn test_top_with_range_and_k() {
        let (ctx, _temp) = context();
        let args = TopArgs {
            k: Some(1),
            from: Some("2025-01-06".into()),
            to: Some("2025-01-31".into()),
        };
        let output = handle_top(&ctx, &args).unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("Cafe"));
    }

    #[test]
    fn test_add_persists_and_alerts() {
        let (mut ctx, _temp) = context();
        // food has 300 spent of a 1000 budget
        let output = handle_add(&mut ctx, &bus(), add_args("acc1", "food", -800)).unwrap();

        assert!(output.contains("-800 KZT in Food (Kaspi Gold)"));
        assert!(output.contains("ALERT: Budget exceeded for category food: spent 1100 of 1000"));

        let saved = load_seed(&ctx.seed_path).unwrap();
        assert_eq!(saved.transactions.len(), 5);
        assert_eq!(saved.transactions[4].note, "test");

        let logged = AlertLogger::new(ctx.paths.alert_log()).read_all().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].event, EventKind::TransactionAdded);
    }

    #[test]
    fn test_alert_log_failure_keeps_memory_and_file_in_step() {
        let (mut ctx, _temp) = context();
        // a directory where the log file should be makes the append fail
        std::fs::create_dir_all(ctx.paths.alert_log()).unwrap();

        let result = handle_add(&mut ctx, &bus(), add_args("acc1", "food", -800));
        assert!(result.is_err());

        let saved = load_seed(&ctx.seed_path).unwrap();
        assert_eq!(saved.transactions.len(), 5);
        assert_eq!(ctx.seed.transactions, saved.transactions);
    }

    #[test]
    fn test_add_low_balance_alert() {
        let (mut ctx, _temp) = context();
        // Cash: 500 - 200 - 250 = 50, below the default threshold of 100
        let output = handle_add(&mut ctx, &bus(), add_args("Cash", "transport", -250)).unwrap();
        assert!(output.contains("Balance: 50 KZT"));
        assert!(output.contains("ALERT: Balance alert"));
    }

    #[test]
    fn test_add_rejects_sign_mismatch() {
        let (mut ctx, _temp) = context();
        let err = handle_add(&mut ctx, &bus(), add_args("acc1", "food", 100)).unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Expense category Food"));
        assert_eq!(load_seed(&ctx.seed_path).unwrap().transactions.len(), 4);
        assert!(!ctx.paths.alert_log().exists());
    }
}
