//! Category tree engine
//!
//! Walks the parent-pointer forest of categories: subcategory discovery and
//! expense roll-up. Every walk keeps a visited set keyed by category id, so a
//! malformed parent graph (a cycle) truncates the walk instead of looping.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{Category, CategoryId, Money, Transaction};

/// Read-only view over a flat category list with a child index
pub struct CategoryTree<'a> {
    categories: &'a [Category],
    children: HashMap<&'a str, Vec<&'a Category>>,
}

impl<'a> CategoryTree<'a> {
    /// Index `categories` by parent id
    pub fn new(categories: &'a [Category]) -> Self {
        let mut children: HashMap<&'a str, Vec<&'a Category>> = HashMap::new();
        for category in categories {
            if let Some(parent) = &category.parent_id {
                children.entry(parent.as_str()).or_default().push(category);
            }
        }
        Self {
            categories,
            children,
        }
    }

    /// All categories in the tree, in load order
    pub fn categories(&self) -> &'a [Category] {
        self.categories
    }

    /// Direct children of `id`, in load order
    pub fn children_of(&self, id: &str) -> &[&'a Category] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Top-level categories (no parent)
    pub fn roots(&self) -> Vec<&'a Category> {
        self.categories.iter().filter(|c| c.is_root()).collect()
    }

    /// Every category transitively below `root_id`
    ///
    /// Direct children come first, followed by each child's own
    /// descendants in turn. The root itself is never included. Unknown ids
    /// and leaves yield an empty list.
    pub fn subcategories_of(&self, root_id: &str) -> Vec<&'a Category> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(root_id);
        let mut result = Vec::new();
        self.collect_descendants(root_id, &mut visited, &mut result);
        result
    }

    fn collect_descendants<'v>(
        &self,
        id: &str,
        visited: &mut HashSet<&'v str>,
        out: &mut Vec<&'a Category>,
    ) where
        'a: 'v,
    {
        let fresh: Vec<&'a Category> = self
            .children_of(id)
            .iter()
            .copied()
            .filter(|child| {
                let first_visit = visited.insert(child.id.as_str());
                if !first_visit {
                    debug!(category = %child.id, "category revisited, cycle in parent graph");
                }
                first_visit
            })
            .collect();

        out.extend(fresh.iter().copied());
        for child in fresh {
            self.collect_descendants(child.id.as_str(), visited, out);
        }
    }

    /// Ids of `root_id` and all of its subcategories, each exactly once
    pub fn subtree_ids<'r>(&self, root_id: &'r str) -> HashSet<&'r str>
    where
        'a: 'r,
    {
        let mut ids: HashSet<&'r str> = self
            .subcategories_of(root_id)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        ids.insert(root_id);
        ids
    }

    /// Signed total of expense transactions booked in `root_id`'s subtree
    ///
    /// The result is zero or negative; take `.abs()` for display. Income is
    /// ignored. Each category id contributes once, even if the parent graph
    /// contains a cycle.
    pub fn sum_expenses(&self, root_id: &str, transactions: &[Transaction]) -> Money {
        let ids = self.subtree_ids(root_id);
        transactions
            .iter()
            .filter(|t| t.is_expense() && ids.contains(t.cat_id.as_str()))
            .map(|t| t.amount)
            .sum()
    }
}

/// Every category transitively below `root_id`
pub fn subcategories_of<'a>(categories: &'a [Category], root_id: &CategoryId) -> Vec<&'a Category> {
    CategoryTree::new(categories).subcategories_of(root_id.as_str())
}

/// Signed expense total of `root_id` and all its subcategories
pub fn sum_expenses(
    categories: &[Category],
    root_id: &CategoryId,
    transactions: &[Transaction],
) -> Money {
    CategoryTree::new(categories).sum_expenses(root_id.as_str(), transactions)
}
