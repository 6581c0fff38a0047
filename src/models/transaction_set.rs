//! Immutable, value-comparable transaction sequence
//!
//! A `TransactionSet` is shared behind an `Arc` and never mutated. Its content
//! fingerprint is computed once at construction, so using a set as part of a
//! hash key costs O(1) per lookup. Equality still compares contents (after a
//! pointer check), so two sets with the same transactions in the same order
//! are equal even if they were built separately.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use super::transaction::Transaction;

/// An append-only snapshot of transactions
#[derive(Debug, Clone)]
pub struct TransactionSet {
    items: Arc<[Transaction]>,
    fingerprint: u64,
}

impl TransactionSet {
    /// Create an empty set
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// Content fingerprint (same elements, same order => same fingerprint)
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Borrow the transactions as a slice
    pub fn as_slice(&self) -> &[Transaction] {
        &self.items
    }

    /// Return a new set with `transaction` appended; `self` is unchanged
    pub fn with_transaction(&self, transaction: Transaction) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(transaction);
        Self::from(items)
    }

    fn compute_fingerprint(items: &[Transaction]) -> u64 {
        let mut hasher = DefaultHasher::new();
        items.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for TransactionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Transaction>> for TransactionSet {
    fn from(items: Vec<Transaction>) -> Self {
        let fingerprint = Self::compute_fingerprint(&items);
        Self {
            items: items.into(),
            fingerprint,
        }
    }
}

impl From<&[Transaction]> for TransactionSet {
    fn from(items: &[Transaction]) -> Self {
        Self::from(items.to_vec())
    }
}

impl FromIterator<Transaction> for TransactionSet {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Deref for TransactionSet {
    type Target = [Transaction];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for TransactionSet {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.items, &other.items) {
            return true;
        }
        self.fingerprint == other.fingerprint && self.items == other.items
    }
}

impl Eq for TransactionSet {}

impl Hash for TransactionSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl Serialize for TransactionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de> Deserialize<'de> for TransactionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Transaction>::deserialize(deserializer).map(Self::from)
    }
}
