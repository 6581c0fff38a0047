//! Monthly budget report
//!
//! [`BudgetService`] runs its validators over the month's inputs, then its
//! calculators in order, each one seeing the merged output of the ones
//! before it. Failed stages are recorded and skipped.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::json;

use super::stage::{Calculator, MonthInput, Step, ValidationEntry, Validator};
use crate::error::{FinanceError, FinanceResult};
use crate::events::{merge_results, Payload};
use crate::models::{Budget, Category, ErrorDetail, Money, Transaction};
use crate::services::budget::BudgetStatus;
use crate::services::validation::{check_category_type, find_category};

/// Result of [`BudgetService::monthly_report`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: String,
    pub validation: Vec<ValidationEntry>,
    pub steps: Vec<Step>,
    pub result: Payload,
}

impl MonthlyReport {
    /// All validation messages, flattened
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.validation
            .iter()
            .flat_map(|entry| entry.messages.iter().map(String::as_str))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Report: {}\n", self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let messages: Vec<&str> = self.messages().collect();
        if messages.is_empty() {
            output.push_str("Validation: OK\n");
        } else {
            output.push_str("Validation:\n");
            for message in messages {
                output.push_str(&format!("  - {}\n", message));
            }
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        for step in &self.steps {
            match &step.error {
                Some(error) => output.push_str(&format!("{:<28} FAILED: {}\n", step.stage, error)),
                None => output.push_str(&format!("{:<28} ok\n", step.stage)),
            }
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (key, value) in &self.result {
            if value.is_array() || value.is_object() {
                continue;
            }
            output.push_str(&format!("{:<28} {}\n", key, value));
        }
        output
    }
}

/// Facade producing monthly reports from injected stages
#[derive(Debug, Default)]
pub struct BudgetService {
    validators: Vec<Validator>,
    calculators: Vec<Calculator>,
}

impl BudgetService {
    pub fn new(validators: Vec<Validator>, calculators: Vec<Calculator>) -> Self {
        Self {
            validators,
            calculators,
        }
    }

    /// Service with the stock validators and calculators
    pub fn with_defaults() -> Self {
        Self::new(default_validators(), default_calculators())
    }

    /// Run every stage over the inputs
    pub fn monthly_report(
        &self,
        month: &str,
        transactions: &[Transaction],
        budgets: &[Budget],
        categories: &[Category],
    ) -> MonthlyReport {
        let input = MonthInput {
            month,
            transactions,
            budgets,
            categories,
        };

        let validation = self
            .validators
            .iter()
            .map(|v| ValidationEntry::from_outcome(v.name(), v.run(&input)))
            .collect();

        let mut acc = Payload::new();
        let mut steps = Vec::with_capacity(self.calculators.len());
        for calculator in &self.calculators {
            let step = Step::from_outcome(calculator.name(), calculator.run(&input, &acc));
            acc = merge_results([&acc, &step.output]);
            steps.push(step);
        }

        MonthlyReport {
            month: month.to_string(),
            validation,
            steps,
            result: acc,
        }
    }
}

/// `unknown_budget_categories`, `transactions_outside_month`,
/// `invalid_transactions`
pub fn default_validators() -> Vec<Validator> {
    vec![
        unknown_budget_categories(),
        transactions_outside_month(),
        invalid_transactions(),
    ]
}

/// `month_expense_total`, `month_income_total`, `budget_status`, `net_flow`
pub fn default_calculators() -> Vec<Calculator> {
    vec![
        month_expense_total(),
        month_income_total(),
        budget_status(),
        net_flow(),
    ]
}

/// Budgets pointing at categories that do not exist
pub fn unknown_budget_categories() -> Validator {
    Validator::new("unknown_budget_categories", |input| {
        let known: HashSet<&str> = input.categories.iter().map(|c| c.id.as_str()).collect();
        Ok(input
            .budgets
            .iter()
            .filter(|b| !known.contains(b.cat_id.as_str()))
            .map(|b| format!("Budget {} references unknown category {}", b.id, b.cat_id))
            .collect())
    })
}

/// Transactions handed in that do not belong to the report month
///
/// Fails outright when the month itself is not `YYYY-MM`.
pub fn transactions_outside_month() -> Validator {
    Validator::new("transactions_outside_month", |input| {
        check_month_format(input.month)?;
        let outside = input
            .transactions
            .iter()
            .filter(|t| t.month() != input.month)
            .count();
        Ok(if outside == 0 {
            Vec::new()
        } else {
            vec![format!(
                "{} transaction(s) fall outside {} and are ignored",
                outside, input.month
            )]
        })
    })
}

/// Month transactions with an unknown category or a sign mismatch
pub fn invalid_transactions() -> Validator {
    Validator::new("invalid_transactions", |input| {
        Ok(input
            .in_month()
            .filter_map(|t| {
                find_category(input.categories, t.cat_id.as_str())
                    .ok_or_else(|| ErrorDetail::CategoryNotFound {
                        category_id: t.cat_id.clone(),
                    })
                    .bind(|category| check_category_type(category, t))
                    .error()
                    .map(|detail| format!("{}: {}", t.id, detail))
            })
            .collect())
    })
}

/// `{expense_total}`: absolute expenses booked in the month
pub fn month_expense_total() -> Calculator {
    Calculator::new("month_expense_total", |input, _| {
        let total: Money = input
            .in_month()
            .filter(|t| t.is_expense())
            .map(|t| t.amount.abs())
            .sum();
        Ok(single("expense_total", json!(total)))
    })
}

/// `{income_total}`: income booked in the month
pub fn month_income_total() -> Calculator {
    Calculator::new("month_income_total", |input, _| {
        let total: Money = input
            .in_month()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        Ok(single("income_total", json!(total)))
    })
}

/// `{budgets, budgets_exceeded}`: every budget checked against the month
pub fn budget_status() -> Calculator {
    Calculator::new("budget_status", |input, _| {
        let month: Vec<Transaction> = input.in_month().cloned().collect();
        let statuses: Vec<BudgetStatus> = input
            .budgets
            .iter()
            .map(|b| BudgetStatus::for_budget(b, &month))
            .collect();
        let exceeded = statuses.iter().filter(|s| s.exceeded).count();

        let mut out = single("budgets", serde_json::to_value(&statuses)?);
        out.insert("budgets_exceeded".into(), json!(exceeded));
        Ok(out)
    })
}

/// `{net_flow}`: income minus expenses, read from earlier calculators
pub fn net_flow() -> Calculator {
    Calculator::new("net_flow", |_, acc| {
        let read = |key: &str| {
            acc.get(key).and_then(|v| v.as_i64()).ok_or_else(|| {
                FinanceError::Report(format!("net_flow needs {} from an earlier stage", key))
            })
        };
        let income = read("income_total")?;
        let expense = read("expense_total")?;
        Ok(single("net_flow", json!(income.saturating_sub(expense))))
    })
}

fn single(key: &str, value: serde_json::Value) -> Payload {
    let mut out = Payload::new();
    out.insert(key.to_string(), value);
    out
}

fn check_month_format(month: &str) -> FinanceResult<()> {
    let bytes = month.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!(
            "month must be YYYY-MM, got '{}'",
            month
        )))
    }
}
