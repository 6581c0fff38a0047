//! Report display formatting

use std::collections::BTreeMap;

use crate::audit::AlertEntry;
use crate::models::{Category, Money};
use crate::services::budget::BudgetStatus;

/// Ranked `(name, total)` rows with their position
pub fn format_top_categories(rows: &[(String, Money)], currency: &str) -> String {
    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = format!(
        "{:>3}  {:<width$} {:>12}\n",
        "#",
        "Category",
        "Spent",
        width = name_width
    );
    output.push_str(&"-".repeat(name_width + 19));
    output.push('\n');
    for (i, (name, total)) in rows.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<width$} {:>12} {}\n",
            i + 1,
            name,
            total,
            currency,
            width = name_width
        ));
    }
    output
}

/// Budget table: limit, spent, remaining and a status marker
pub fn format_budget_statuses(
    statuses: &[BudgetStatus],
    categories: &[Category],
    currency: &str,
) -> String {
    if statuses.is_empty() {
        return "No budgets defined.\n".to_string();
    }

    let name_of = |status: &BudgetStatus| {
        categories
            .iter()
            .find(|c| c.id == status.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| status.category_id.to_string())
    };

    let mut output = format!(
        "{:<20} {:>12} {:>12} {:>12}  {}\n",
        "Category", "Limit", "Spent", "Remaining", "Status"
    );
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for status in statuses {
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}  {}\n",
            name_of(status),
            status.limit,
            status.spent,
            status.remaining,
            if status.exceeded { "OVER" } else { "ok" }
        ));
    }
    output.push_str(&format!("\nAmounts in {}\n", currency));
    output
}

/// `Forecast for Food (3 months): 1250.00 KZT/month`
pub fn format_forecast(category: &Category, horizon_months: usize, value: f64, currency: &str) -> String {
    format!(
        "Forecast for {} ({} month{}): {:.2} {}/month\n",
        category.name,
        horizon_months,
        if horizon_months == 1 { "" } else { "s" },
        value,
        currency
    )
}

/// Per-month expense totals in month order
pub fn format_monthly_expenses(totals: &BTreeMap<String, i64>, currency: &str) -> String {
    let mut output = format!("{:<10} {:>12}\n", "Month", "Expenses");
    output.push_str(&"-".repeat(23));
    output.push('\n');
    for (month, total) in totals {
        output.push_str(&format!("{:<10} {:>12}\n", month, total));
    }
    let sum: i64 = totals.values().sum();
    output.push_str(&format!("{:<10} {:>12} {}\n", "Total", sum, currency));
    output
}

/// One line per alert
pub fn format_alerts(alerts: &[AlertEntry]) -> String {
    alerts
        .iter()
        .map(|a| format!("ALERT: {}\n", a.message))
        .collect()
}
