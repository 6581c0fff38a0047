//! Category display formatting
//!
//! Formats the category forest as an indented tree and flat lists.

use std::collections::HashSet;

use crate::models::{Category, Money};
use crate::services::category::CategoryTree;

/// Format the subtree under `root` with box-drawing prefixes
pub fn format_subcategory_tree(tree: &CategoryTree<'_>, root: &Category) -> String {
    let mut output = format!("{} ({})\n", root.name, root.kind);
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root.id.as_str());

    let before = output.len();
    push_children(tree, root.id.as_str(), "", &mut visited, &mut output);
    if output.len() == before {
        output.push_str("  (no subcategories)\n");
    }
    output
}

fn push_children<'a>(
    tree: &CategoryTree<'a>,
    id: &str,
    indent: &str,
    visited: &mut HashSet<&'a str>,
    output: &mut String,
) {
    let children: Vec<&'a Category> = tree
        .children_of(id)
        .iter()
        .copied()
        .filter(|c| visited.insert(c.id.as_str()))
        .collect();

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let prefix = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{}{}{}\n", indent, prefix, child.name));

        let next_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
        push_children(tree, child.id.as_str(), &next_indent, visited, output);
    }
}

/// Format every category as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = format!(
        "{:<12} {:<width$} {:<8} {}\n",
        "ID",
        "Name",
        "Type",
        "Parent",
        width = name_width
    );
    for category in categories {
        output.push_str(&format!(
            "{:<12} {:<width$} {:<8} {}\n",
            category.id,
            category.name,
            category.kind,
            category.parent_id.as_ref().map(|p| p.as_str()).unwrap_or("-"),
            width = name_width
        ));
    }
    output
}

/// One-line roll-up summary: `Food: 1500 KZT across 3 subcategories`
pub fn format_rolled_up_expenses(
    category: &Category,
    total: Money,
    subcategory_count: usize,
    currency: &str,
) -> String {
    format!(
        "{}: {} across {} subcategor{}\n",
        category.name,
        total.abs().format_with_code(currency),
        subcategory_count,
        if subcategory_count == 1 { "y" } else { "ies" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("food", "Food", CategoryKind::Expense),
            Category::child_of("cafe", "Cafe", "food", CategoryKind::Expense),
            Category::child_of("groceries", "Groceries", "food", CategoryKind::Expense),
            Category::child_of("coffee", "Coffee", "cafe", CategoryKind::Expense),
        ]
    }

    #[test]
    fn test_tree_rendering() {
        let categories = categories();
        let tree = CategoryTree::new(&categories);
        let output = format_subcategory_tree(&tree, &categories[0]);

        assert_eq!(
            output,
            "Food (expense)\n├── Cafe\n│   └── Coffee\n└── Groceries\n"
        );
    }

    #[test]
    fn test_leaf_rendering() {
        let categories = categories();
        let tree = CategoryTree::new(&categories);
        let output = format_subcategory_tree(&tree, &categories[3]);
        assert!(output.contains("(no subcategories)"));
    }

    #[test]
    fn test_category_list() {
        let output = format_category_list(&categories());
        assert!(output.contains("Groceries"));
        assert!(output.lines().nth(1).unwrap().ends_with("-"));
        assert_eq!(format_category_list(&[]), "No categories found.");
    }

    #[test]
    fn test_rolled_up_line() {
        let categories = categories();
        let line = format_rolled_up_expenses(&categories[0], Money::from_minor(-1500), 3, "KZT");
        assert_eq!(line, "Food: 1500 KZT across 3 subcategories\n");
    }
}
