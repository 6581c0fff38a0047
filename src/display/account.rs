//! Account and overview display formatting

use std::collections::BTreeMap;

use crate::models::{Account, AccountId, Money};

/// Counts shown at the top of the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewCounts {
    pub accounts: usize,
    pub categories: usize,
    pub transactions: usize,
    pub budgets: usize,
}

/// Dashboard summary: record counts, per-account balances and the total
///
/// `balances` holds the current balance of each account (opening balance
/// plus its transactions).
pub fn format_overview(
    counts: OverviewCounts,
    accounts: &[Account],
    balances: &BTreeMap<AccountId, Money>,
    currency: &str,
) -> String {
    let mut output = String::new();
    output.push_str("Finance Manager - Overview\n");
    output.push_str(&"=".repeat(50));
    output.push('\n');
    output.push_str(&format!("Accounts:     {}\n", counts.accounts));
    output.push_str(&format!("Categories:   {}\n", counts.categories));
    output.push_str(&format!("Transactions: {}\n", counts.transactions));
    output.push_str(&format!("Budgets:      {}\n", counts.budgets));
    output.push('\n');

    output.push_str(&format_account_list(accounts, balances));

    let total: Money = balances.values().sum();
    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str(&format!("{:<30} {:>12} {}\n", "Total Balance", total, currency));
    output
}

/// Account table with current balances
pub fn format_account_list(accounts: &[Account], balances: &BTreeMap<AccountId, Money>) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let mut output = format!("{:<30} {:>12} {}\n", "Account", "Balance", "Currency");
    for account in accounts {
        let balance = balances.get(&account.id).copied().unwrap_or(account.balance);
        output.push_str(&format!(
            "{:<30} {:>12} {}\n",
            account.name, balance, account.currency
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_totals_balances() {
        let accounts = vec![
            Account::new("acc1", "Kaspi", Money::from_minor(1000), "KZT"),
            Account::new("acc2", "Cash", Money::from_minor(50), "KZT"),
        ];
        let balances: BTreeMap<AccountId, Money> = [
            (AccountId::from("acc1"), Money::from_minor(700)),
            (AccountId::from("acc2"), Money::from_minor(50)),
        ]
        .into();
        let counts = OverviewCounts {
            accounts: 2,
            categories: 4,
            transactions: 1,
            budgets: 0,
        };

        let output = format_overview(counts, &accounts, &balances, "KZT");
        assert!(output.contains("Transactions: 1"));
        assert!(output.lines().any(|l| l.starts_with("Kaspi") && l.contains("700")));
        assert!(output.lines().last().unwrap().ends_with("750 KZT"));
    }

    #[test]
    fn test_missing_balance_falls_back_to_opening() {
        let accounts = vec![Account::new("acc1", "Kaspi", Money::from_minor(1000), "KZT")];
        let output = format_account_list(&accounts, &BTreeMap::new());
        assert!(output.contains("1000"));
    }
}
