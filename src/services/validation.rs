//! Transaction validation
//!
//! Lookups return `Maybe`, validation returns `Either<ErrorDetail, _>`. The
//! checks run in a fixed order and the first failure wins.

use crate::functional::{Either, Maybe};
use crate::models::{Account, Category, ErrorDetail, Transaction};

/// Find a category by id
pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Maybe<&'a Category> {
    categories.iter().find(|c| c.id == id).into()
}

/// Find an account by id
pub fn find_account<'a>(accounts: &'a [Account], id: &str) -> Maybe<&'a Account> {
    accounts.iter().find(|a| a.id == id).into()
}

/// Find a category by id, or by case-insensitive name if no id matches
pub fn resolve_category<'a>(categories: &'a [Category], identifier: &str) -> Maybe<&'a Category> {
    let by_id = find_category(categories, identifier);
    if by_id.is_some() {
        return by_id;
    }
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(identifier))
        .into()
}

/// Check that the amount's sign fits the category type
pub fn check_category_type<'a>(
    category: &Category,
    transaction: &'a Transaction,
) -> Either<ErrorDetail, &'a Transaction> {
    if category.kind.accepts(transaction.amount) {
        Either::Right(transaction)
    } else {
        Either::Left(ErrorDetail::CategoryTypeMismatch {
            category_name: category.name.clone(),
            category_type: category.kind,
            amount: transaction.amount,
        })
    }
}

/// Validate a transaction against the known accounts and categories
///
/// Order: account exists, category exists, amount sign matches the
/// category type. On success the same transaction comes back in `Right`.
pub fn validate_transaction<'a>(
    transaction: &'a Transaction,
    accounts: &[Account],
    categories: &[Category],
) -> Either<ErrorDetail, &'a Transaction> {
    find_account(accounts, transaction.account_id.as_str())
        .ok_or_else(|| ErrorDetail::AccountNotFound {
            account_id: transaction.account_id.clone(),
        })
        .bind(|_| {
            find_category(categories, transaction.cat_id.as_str()).ok_or_else(|| {
                ErrorDetail::CategoryNotFound {
                    category_id: transaction.cat_id.clone(),
                }
            })
        })
        .bind(|category| check_category_type(category, transaction))
}

/// Split transactions into valid ones and the failures of invalid ones
pub fn partition_valid<'a>(
    transactions: &'a [Transaction],
    accounts: &[Account],
    categories: &[Category],
) -> (Vec<&'a Transaction>, Vec<(&'a Transaction, ErrorDetail)>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for transaction in transactions {
        match validate_transaction(transaction, accounts, categories) {
            Either::Right(t) => valid.push(t),
            Either::Left(detail) => invalid.push((transaction, detail)),
        }
    }
    (valid, invalid)
}
