//! Category report
//!
//! [`ReportService`] runs its validators, then its aggregators, over one
//! category subtree. Like the monthly report, each aggregator sees what the
//! earlier ones produced, and a failing stage only costs its own entry.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use super::stage::{Aggregator, CategoryInput, CategoryValidator, Step, ValidationEntry};
use crate::events::{merge_results, Payload};
use crate::models::{Category, CategoryId, CategoryKind, TransactionSet};
use crate::services::category::CategoryTree;
use crate::services::forecast::ExpenseForecaster;
use crate::services::ranking::{filtered, top_categories};
use crate::services::validation::find_category;

/// Result of [`ReportService::category_report`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: CategoryId,
    pub validation: Vec<ValidationEntry>,
    pub steps: Vec<Step>,
    pub result: Payload,
}

impl CategoryReport {
    /// All validation messages, flattened
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.validation
            .iter()
            .flat_map(|entry| entry.messages.iter().map(String::as_str))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, category_name: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Category Report: {} ({})\n", category_name, self.category));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for message in self.messages() {
            output.push_str(&format!("! {}\n", message));
        }

        for step in &self.steps {
            if let Some(error) = &step.error {
                output.push_str(&format!("{:<28} FAILED: {}\n", step.stage, error));
            }
        }

        for (key, value) in &self.result {
            match value {
                serde_json::Value::Array(rows) => {
                    output.push_str(&format!("{}:\n", key));
                    for row in rows {
                        let name = row.get("name").and_then(|v| v.as_str()).unwrap_or("?");
                        let total = row.get("total").cloned().unwrap_or(json!(0));
                        output.push_str(&format!("  {:<26} {:>12}\n", name, total));
                    }
                }
                serde_json::Value::Number(n) if n.is_f64() => {
                    output.push_str(&format!("{:<28} {:.2}\n", key, n.as_f64().unwrap_or(0.0)));
                }
                other => output.push_str(&format!("{:<28} {}\n", key, other)),
            }
        }
        output
    }
}

/// Facade producing category reports from injected stages
#[derive(Debug, Default)]
pub struct ReportService {
    validators: Vec<CategoryValidator>,
    aggregators: Vec<Aggregator>,
}

impl ReportService {
    pub fn new(validators: Vec<CategoryValidator>, aggregators: Vec<Aggregator>) -> Self {
        Self {
            validators,
            aggregators,
        }
    }

    /// Run every validator, then every aggregator, for `category_id`
    pub fn category_report(
        &self,
        category_id: &CategoryId,
        transactions: &TransactionSet,
        categories: &[Category],
    ) -> CategoryReport {
        let input = CategoryInput {
            category_id,
            transactions,
            categories,
        };

        let validation = self
            .validators
            .iter()
            .map(|v| ValidationEntry::from_outcome(v.name(), v.run(&input)))
            .collect();

        let mut acc = Payload::new();
        let mut steps = Vec::with_capacity(self.aggregators.len());
        for aggregator in &self.aggregators {
            let step = Step::from_outcome(aggregator.name(), aggregator.run(&input, &acc));
            acc = merge_results([&acc, &step.output]);
            steps.push(step);
        }

        CategoryReport {
            category: category_id.clone(),
            validation,
            steps,
            result: acc,
        }
    }
}

/// `unknown_category`, `income_category`
pub fn default_validators() -> Vec<CategoryValidator> {
    vec![unknown_category(), income_category()]
}

/// Flags a report root missing from the category list
pub fn unknown_category() -> CategoryValidator {
    CategoryValidator::new("unknown_category", |input| {
        Ok(find_category(input.categories, input.category_id.as_str())
            .into_option()
            .map_or_else(
                || vec![format!("Category {} does not exist", input.category_id)],
                |_| Vec::new(),
            ))
    })
}

/// Expense figures of an income root are always zero
pub fn income_category() -> CategoryValidator {
    CategoryValidator::new("income_category", |input| {
        Ok(find_category(input.categories, input.category_id.as_str())
            .into_option()
            .filter(|c| c.kind == CategoryKind::Income)
            .map(|c| vec![format!("{} is an income category; expense totals will be zero", c.name)])
            .unwrap_or_default())
    })
}

/// `subcategory_count`, `rolled_up_expenses`, `trailing_forecast`,
/// `top_subcategories`
pub fn default_aggregators(
    forecaster: Arc<ExpenseForecaster>,
    horizon_months: usize,
    top_k: usize,
) -> Vec<Aggregator> {
    vec![
        subcategory_count(),
        rolled_up_expenses(),
        trailing_forecast(forecaster, horizon_months),
        top_subcategories(top_k),
    ]
}

/// `{subcategory_count}`
pub fn subcategory_count() -> Aggregator {
    Aggregator::new("subcategory_count", |input, _| {
        let tree = CategoryTree::new(input.categories);
        let count = tree.subcategories_of(input.category_id.as_str()).len();
        Ok(single("subcategory_count", json!(count)))
    })
}

/// `{rolled_up_expenses}`: absolute expenses of the whole subtree
pub fn rolled_up_expenses() -> Aggregator {
    Aggregator::new("rolled_up_expenses", |input, _| {
        let tree = CategoryTree::new(input.categories);
        let total = tree.sum_expenses(input.category_id.as_str(), input.transactions);
        Ok(single("rolled_up_expenses", json!(total.abs())))
    })
}

/// `{forecast, horizon_months}`: memoized trailing average of the category
/// itself
pub fn trailing_forecast(forecaster: Arc<ExpenseForecaster>, horizon_months: usize) -> Aggregator {
    Aggregator::new("trailing_forecast", move |input, _| {
        let forecast =
            forecaster.forecast_expenses(input.category_id, input.transactions, horizon_months);
        let mut out = single("forecast", json!(forecast));
        out.insert("horizon_months".into(), json!(horizon_months));
        Ok(out)
    })
}

/// `{top_subcategories: [{name, total}]}`: biggest spenders below the root
pub fn top_subcategories(k: usize) -> Aggregator {
    Aggregator::new("top_subcategories", move |input, _| {
        let tree = CategoryTree::new(input.categories);
        let mut below = tree.subtree_ids(input.category_id.as_str());
        below.remove(input.category_id.as_str());

        let rows: Vec<serde_json::Value> = top_categories(
            filtered(input.transactions.iter(), |t| below.contains(t.cat_id.as_str())),
            input.categories,
            k,
        )
        .map(|(name, total)| json!({"name": name, "total": total}))
        .collect();
        Ok(single("top_subcategories", json!(rows)))
    })
}

fn single(key: &str, value: serde_json::Value) -> Payload {
    let mut out = Payload::new();
    out.insert(key.to_string(), value);
    out
}
