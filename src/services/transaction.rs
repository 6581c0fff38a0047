//! Pure transaction transforms and predicate builders
//!
//! Nothing here mutates its input. The predicate builders return closures
//! meant to be handed to [`crate::services::ranking::filtered`] or any
//! iterator adapter.

use crate::models::{AccountId, CategoryId, Money, Transaction, TransactionSet};

/// Return a new set with `transaction` appended
pub fn add_transaction(transactions: &TransactionSet, transaction: Transaction) -> TransactionSet {
    transactions.with_transaction(transaction)
}

/// Sum of all amounts booked on `account_id`
///
/// This is the net movement only; add the account's opening balance to get
/// its current balance.
pub fn account_balance(transactions: &[Transaction], account_id: &AccountId) -> Money {
    transactions
        .iter()
        .filter(|t| &t.account_id == account_id)
        .map(|t| t.amount)
        .sum()
}

/// Transactions with a positive amount
pub fn income_transactions(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.is_income()).collect()
}

/// Transactions with a negative amount
pub fn expense_transactions(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.is_expense()).collect()
}

/// Match transactions booked directly in `category_id`
pub fn by_category(category_id: impl Into<CategoryId>) -> impl Fn(&Transaction) -> bool + Clone {
    let category_id = category_id.into();
    move |t| t.cat_id == category_id
}

/// Match timestamps within `[start, end]`, compared as strings
///
/// A bare date as `end` excludes later times on that same day, since
/// `"2025-01-31T10:00" > "2025-01-31"`.
pub fn by_date_range(
    start: impl Into<String>,
    end: impl Into<String>,
) -> impl Fn(&Transaction) -> bool + Clone {
    let start = start.into();
    let end = end.into();
    move |t| t.ts.as_str() >= start.as_str() && t.ts.as_str() <= end.as_str()
}

/// Match amounts within `[min, max]`
pub fn by_amount_range(min: Money, max: Money) -> impl Fn(&Transaction) -> bool + Clone {
    move |t| t.amount >= min && t.amount <= max
}

/// Predicate form of [`Transaction::is_expense`]
pub fn is_expense(transaction: &Transaction) -> bool {
    transaction.is_expense()
}

/// Predicate form of [`Transaction::is_income`]
pub fn is_income(transaction: &Transaction) -> bool {
    transaction.is_income()
}
