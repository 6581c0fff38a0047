//! Batch computations over many keys at once
//!
//! Each key gets its own scoped thread reading the shared slice and
//! producing one `(key, value)` pair. The pairs are collected into an ordered
//! map, so the result does not depend on thread scheduling.

use std::collections::BTreeMap;
use std::thread;

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, AccountId, Money, Transaction};
use crate::services::transaction::account_balance;

/// Absolute expense total for each requested `YYYY-MM` month
///
/// Months without expenses report zero. Duplicate months collapse to one
/// entry.
pub fn expenses_by_month(
    transactions: &[Transaction],
    months: &[String],
) -> FinanceResult<BTreeMap<String, i64>> {
    debug!(months = months.len(), "computing monthly expenses");
    thread::scope(|scope| {
        let handles: Vec<_> = months
            .iter()
            .map(|month| {
                scope.spawn(move || {
                    let total: Money = transactions
                        .iter()
                        .filter(|t| t.is_expense() && t.ts.starts_with(month.as_str()))
                        .map(|t| t.amount.abs())
                        .sum();
                    (month.clone(), total.minor())
                })
            })
            .collect();
        join_all(handles)
    })
}

/// Opening balance plus every transaction on the account
pub fn balance_forecast(
    accounts: &[Account],
    transactions: &[Transaction],
) -> FinanceResult<BTreeMap<AccountId, Money>> {
    debug!(accounts = accounts.len(), "forecasting balances");
    thread::scope(|scope| {
        let handles: Vec<_> = accounts
            .iter()
            .map(|account| {
                scope.spawn(move || {
                    let balance = account.balance + account_balance(transactions, &account.id);
                    (account.id.clone(), balance)
                })
            })
            .collect();
        join_all(handles)
    })
}

fn join_all<K: Ord, V>(
    handles: Vec<thread::ScopedJoinHandle<'_, (K, V)>>,
) -> FinanceResult<BTreeMap<K, V>> {
    handles
        .into_iter()
        .map(|handle| {
            handle
                .join()
                .map_err(|_| FinanceError::Report("batch worker panicked".into()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, account: &str, amount: i64, ts: &str) -> Transaction {
        Transaction::new(id, account, "food", Money::from_minor(amount), ts)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("t1", "acc1", -300, "2025-01-03"),
            txn("t2", "acc1", -700, "2025-01-19"),
            txn("t3", "acc2", 5000, "2025-01-25"),
            txn("t4", "acc2", -250, "2025-02-02"),
        ]
    }

    #[test]
    fn test_expenses_by_month() {
        let months: Vec<String> = ["2025-01", "2025-02", "2025-03"]
            .iter()
            .map(|m| m.to_string())
            .collect();
        let totals = expenses_by_month(&sample(), &months).unwrap();

        assert_eq!(totals.len(), 3);
        assert_eq!(totals["2025-01"], 1000);
        assert_eq!(totals["2025-02"], 250);
        assert_eq!(totals["2025-03"], 0);
    }

    #[test]
    fn test_expenses_by_month_is_deterministic() {
        let months: Vec<String> = (1..=12).map(|m| format!("2025-{:02}", m)).collect();
        let first = expenses_by_month(&sample(), &months).unwrap();
        for _ in 0..5 {
            assert_eq!(expenses_by_month(&sample(), &months).unwrap(), first);
        }
    }

    #[test]
    fn test_balance_forecast() {
        let accounts = vec![
            Account::new("acc1", "Kaspi", Money::from_minor(2000), "KZT"),
            Account::new("acc2", "Halyk", Money::from_minor(0), "KZT"),
            Account::new("acc3", "Cash", Money::from_minor(50), "KZT"),
        ];
        let forecast = balance_forecast(&accounts, &sample()).unwrap();

        assert_eq!(forecast[&AccountId::from("acc1")].minor(), 1000);
        assert_eq!(forecast[&AccountId::from("acc2")].minor(), 4750);
        assert_eq!(forecast[&AccountId::from("acc3")].minor(), 50);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(expenses_by_month(&sample(), &[]).unwrap().is_empty());
        assert!(balance_forecast(&[], &sample()).unwrap().is_empty());
    }
}
