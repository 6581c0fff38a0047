//! Budget checking
//!
//! Compares spending in a budget's category against its limit. Only the
//! budget's own category counts (no subcategory roll-up) and income in that
//! category never offsets spending.

use serde::Serialize;

use crate::functional::Either;
use crate::models::{Budget, BudgetId, CategoryId, ErrorDetail, Money, Transaction};

/// Absolute expense total booked directly in `cat_id`
pub fn spent_in_category(cat_id: &CategoryId, transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && &t.cat_id == cat_id)
        .map(|t| t.amount.abs())
        .sum()
}

/// Check a budget against the transactions
///
/// Returns the same budget in `Right` while spending is at or under the
/// limit, and `budget_exceeded` details once it goes over.
pub fn check_budget<'a>(
    budget: &'a Budget,
    transactions: &[Transaction],
) -> Either<ErrorDetail, &'a Budget> {
    let spent = spent_in_category(&budget.cat_id, transactions);
    if spent > budget.limit {
        Either::Left(ErrorDetail::BudgetExceeded {
            category_id: budget.cat_id.clone(),
            limit: budget.limit,
            spent,
            over_budget: spent - budget.limit,
        })
    } else {
        Either::Right(budget)
    }
}

/// Replace the limit of one budget, returning a new collection
///
/// Budgets with other ids are copied unchanged. An unknown id yields an
/// identical copy.
pub fn update_budget(budgets: &[Budget], budget_id: &BudgetId, new_limit: Money) -> Vec<Budget> {
    budgets
        .iter()
        .map(|b| {
            if &b.id == budget_id {
                b.with_limit(new_limit)
            } else {
                b.clone()
            }
        })
        .collect()
}

/// Spending summary for one budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub limit: Money,
    pub spent: Money,
    /// Limit minus spent; negative once over budget
    pub remaining: Money,
    pub exceeded: bool,
}

impl BudgetStatus {
    /// Summarize a budget against the transactions
    pub fn for_budget(budget: &Budget, transactions: &[Transaction]) -> Self {
        let spent = spent_in_category(&budget.cat_id, transactions);
        Self {
            budget_id: budget.id.clone(),
            category_id: budget.cat_id.clone(),
            limit: budget.limit,
            spent,
            remaining: budget.limit - spent,
            exceeded: check_budget(budget, transactions).is_left(),
        }
    }
}

/// Summarize every budget, in input order
pub fn budget_statuses(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| BudgetStatus::for_budget(b, transactions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> Budget {
        Budget::new("b1", "cat1", Money::from_minor(1000), "month")
    }

    fn txn(id: &str, cat: &str, amount: i64) -> Transaction {
        Transaction::new(id, "acc1", cat, Money::from_minor(amount), "2025-01-01")
    }

    #[test]
    fn test_under_budget() {
        let budget = budget();
        let transactions = vec![txn("t1", "cat1", -300), txn("t2", "cat1", -200)];

        let result = check_budget(&budget, &transactions);
        assert!(result.is_right());
        assert_eq!(result.value().unwrap().id, "b1");
    }

    #[test]
    fn test_most_negative_amount_still_exceeds() {
        let budget = budget();
        let transactions = vec![txn("t1", "cat1", i64::MIN)];

        match check_budget(&budget, &transactions) {
            Either::Left(ErrorDetail::BudgetExceeded { spent, over_budget, .. }) => {
                assert_eq!(spent.minor(), i64::MAX);
                assert_eq!(over_budget.minor(), i64::MAX - 1000);
            }
            other => panic!("expected budget_exceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_at_limit_is_fine() {
        let budget = budget();
        let transactions = vec![txn("t1", "cat1", -1000)];
        assert!(check_budget(&budget, &transactions).is_right());
    }

    #[test]
    fn test_budget_exceeded() {
        let budget = budget();
        let transactions = vec![
            txn("t1", "cat1", -300),
            txn("t2", "cat1", -200),
            txn("t3", "cat1", -600),
        ];

        let error = check_budget(&budget, &transactions).get_error();
        assert_eq!(
            error,
            ErrorDetail::BudgetExceeded {
                category_id: "cat1".into(),
                limit: Money::from_minor(1000),
                spent: Money::from_minor(1100),
                over_budget: Money::from_minor(100),
            }
        );
        assert_eq!(error.kind(), "budget_exceeded");
    }

    #[test]
    fn test_income_is_excluded() {
        let budget = budget();
        let transactions = vec![
            txn("t1", "cat1", -300),
            txn("t2", "cat1", 5000),
            txn("t3", "cat1", -900),
        ];

        // 1200 spent regardless of the 5000 income
        let error = check_budget(&budget, &transactions).get_error();
        assert!(matches!(error, ErrorDetail::BudgetExceeded { spent, .. } if spent.minor() == 1200));
    }

    #[test]
    fn test_other_categories_are_ignored() {
        let budget = budget();
        let transactions = vec![
            txn("t1", "cat1", -300),
            txn("t2", "cat2", -800),
            txn("t3", "cat1", -200),
        ];
        assert!(check_budget(&budget, &transactions).is_right());
    }

    #[test]
    fn test_update_budget_returns_new_collection() {
        let budgets = vec![
            budget(),
            Budget::new("b2", "cat2", Money::from_minor(500), "month"),
        ];
        let updated = update_budget(&budgets, &"b2".into(), Money::from_minor(750));

        assert_eq!(budgets[1].limit.minor(), 500);
        assert_eq!(updated[0], budgets[0]);
        assert_eq!(updated[1].limit.minor(), 750);

        let unchanged = update_budget(&budgets, &"missing".into(), Money::zero());
        assert_eq!(unchanged, budgets);
    }

    #[test]
    fn test_budget_status() {
        let budgets = vec![budget()];
        let transactions = vec![txn("t1", "cat1", -1100)];
        let statuses = budget_statuses(&budgets, &transactions);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent.minor(), 1100);
        assert_eq!(statuses[0].remaining.minor(), -100);
        assert!(statuses[0].exceeded);
    }
}
