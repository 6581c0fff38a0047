//! Lazy filtering and top-category ranking
//!
//! [`filtered`] wraps any transaction source in a lazy iterator: the
//! predicate runs only for elements the consumer actually pulls. Cloning a
//! `Filtered` over a restartable source (a slice, a `TransactionSet`)
//! restarts the walk from the clone's position.
//!
//! [`top_categories`] drains its stream once, then hands out the ranked
//! `(name, total)` pairs one at a time.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::iter::FusedIterator;

use crate::models::{Category, Money, Transaction};

/// Lazy predicate filter over a transaction source
#[derive(Clone)]
pub struct Filtered<I, P> {
    source: I,
    predicate: P,
}

impl<I, P> Iterator for Filtered<I, P>
where
    I: Iterator,
    I::Item: Borrow<Transaction>,
    P: FnMut(&Transaction) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.source.by_ref() {
            if (self.predicate)(item.borrow()) {
                return Some(item);
            }
        }
        None
    }
}

impl<I, P> FusedIterator for Filtered<I, P>
where
    I: FusedIterator,
    I::Item: Borrow<Transaction>,
    P: FnMut(&Transaction) -> bool,
{
}

/// Lazily keep the transactions matching `predicate`
///
/// Works over borrowed (`&Transaction`) and owned (`Transaction`) sources,
/// including unbounded generators.
pub fn filtered<S, P>(transactions: S, predicate: P) -> Filtered<S::IntoIter, P>
where
    S: IntoIterator,
    S::Item: Borrow<Transaction>,
    P: FnMut(&Transaction) -> bool,
{
    Filtered {
        source: transactions.into_iter(),
        predicate,
    }
}

/// Ranked `(category name, absolute expense total)` pairs
pub type TopCategories = std::iter::Take<std::vec::IntoIter<(String, Money)>>;

/// Rank categories by absolute expense total, highest first
///
/// The stream is consumed once. Income is ignored. Category ids map to their
/// display names, falling back to the raw id for unknown categories. Ties
/// keep the order in which the categories were first seen. `k == 0` yields
/// nothing; a `k` above the number of categories yields all of them.
pub fn top_categories<S>(transactions: S, categories: &[Category], k: usize) -> TopCategories
where
    S: IntoIterator,
    S::Item: Borrow<Transaction>,
{
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(String, Money)> = Vec::new();

    for item in transactions {
        let t = item.borrow();
        if !t.is_expense() {
            continue;
        }
        let slot = *slots.entry(t.cat_id.to_string()).or_insert_with(|| {
            let name = names
                .get(t.cat_id.as_str())
                .map(|n| n.to_string())
                .unwrap_or_else(|| t.cat_id.to_string());
            totals.push((name, Money::zero()));
            totals.len() - 1
        });
        totals[slot].1 += t.amount.abs();
    }

    // stable sort keeps first-seen order for ties
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.into_iter().take(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;
    use std::cell::Cell;

    fn sample() -> (Vec<Category>, Vec<Transaction>) {
        let categories = vec![
            Category::new("c1", "Food", CategoryKind::Expense),
            Category::new("c2", "Transport", CategoryKind::Expense),
            Category::new("c3", "Salary", CategoryKind::Income),
        ];
        let transactions = vec![
            txn("t1", "c1", -300),
            txn("t2", "c2", -200),
            txn("t3", "c3", 5000),
            txn("t4", "c1", -700),
            txn("t5", "c2", -100),
        ];
        (categories, transactions)
    }

    fn txn(id: &str, cat: &str, amount: i64) -> Transaction {
        Transaction::new(id, "a1", cat, Money::from_minor(amount), "2025-01-01")
    }

    #[test]
    fn test_filtered_expenses_only() {
        let (_, transactions) = sample();
        let result: Vec<_> = filtered(&transactions, |t| t.is_expense()).collect();
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|t| t.is_expense()));
    }

    #[test]
    fn test_filtered_stops_early() {
        let (_, transactions) = sample();
        let calls = Cell::new(0);

        let first_two: Vec<_> = filtered(&transactions, |t| {
            calls.set(calls.get() + 1);
            t.is_expense()
        })
        .take(2)
        .collect();

        assert_eq!(first_two.len(), 2);
        assert!(calls.get() < transactions.len());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_filtered_over_unbounded_source() {
        let endless = (0..).map(|i| txn("t", "c1", -(i as i64)));
        let firsts: Vec<Transaction> = filtered(endless, |t| t.amount.minor() % 2 == 0)
            .take(3)
            .collect();
        let amounts: Vec<i64> = firsts.iter().map(|t| t.amount.minor()).collect();
        assert_eq!(amounts, vec![0, -2, -4]);
    }

    #[test]
    fn test_filtered_is_restartable_by_clone() {
        let (_, transactions) = sample();
        let stream = filtered(transactions.iter(), |t: &Transaction| t.is_income());
        let first_pass = stream.clone().count();
        let second_pass = stream.count();
        assert_eq!(first_pass, 1);
        assert_eq!(second_pass, 1);
    }

    #[test]
    fn test_top_categories_sum_and_order() {
        let (categories, transactions) = sample();
        let result: Vec<_> = top_categories(&transactions, &categories, 2).collect();
        assert_eq!(
            result,
            vec![
                ("Food".to_string(), Money::from_minor(1000)),
                ("Transport".to_string(), Money::from_minor(300)),
            ]
        );
    }

    #[test]
    fn test_top_categories_ignores_income() {
        let (categories, transactions) = sample();
        let names: Vec<String> = top_categories(&transactions, &categories, 3)
            .map(|(name, _)| name)
            .collect();
        assert!(!names.contains(&"Salary".to_string()));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_top_categories_from_lazy_stream() {
        let (categories, transactions) = sample();
        let stream = filtered(transactions.clone(), |t| t.amount.minor() < 0);
        let result: Vec<_> = top_categories(stream, &categories, 1).collect();
        assert_eq!(result, vec![("Food".to_string(), Money::from_minor(1000))]);
    }

    #[test]
    fn test_top_categories_bounds() {
        let (categories, transactions) = sample();
        assert_eq!(top_categories(&transactions, &categories, 0).count(), 0);
        assert_eq!(top_categories(&transactions, &categories, 10).count(), 2);
        assert_eq!(top_categories(Vec::<Transaction>::new(), &categories, 3).count(), 0);
    }

    #[test]
    fn test_unknown_category_falls_back_to_id() {
        let transactions = vec![txn("t1", "mystery", -50)];
        let result: Vec<_> = top_categories(&transactions, &[], 5).collect();
        assert_eq!(result, vec![("mystery".to_string(), Money::from_minor(50))]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let categories = vec![
            Category::new("a", "Alpha", CategoryKind::Expense),
            Category::new("b", "Beta", CategoryKind::Expense),
            Category::new("c", "Gamma", CategoryKind::Expense),
        ];
        let transactions = vec![txn("t1", "b", -100), txn("t2", "c", -300), txn("t3", "a", -100)];
        let names: Vec<String> = top_categories(&transactions, &categories, 3)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["Gamma", "Beta", "Alpha"]);
    }
}
