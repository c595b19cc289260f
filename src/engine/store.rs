//! Category store - indexed storage of classified records
//!
//! One keyed bucket per category plus running counters. Buckets are
//! created empty at processor construction, populated once during the
//! ingestion pass, and read-only afterward. There is no deletion.

use std::collections::BTreeMap;

/// Disjoint keyed collections of classified records with per-category
/// counters and a family-wide total.
#[derive(Debug, Clone)]
pub struct CategoryStore<C: Copy + Ord, R> {
    buckets: BTreeMap<C, BTreeMap<String, R>>,
    counts: BTreeMap<C, u64>,
    total: u64,
}

impl<C: Copy + Ord, R> CategoryStore<C, R> {
    /// Create empty buckets and zeroed counters for every category.
    pub fn new(categories: &[C]) -> Self {
        let mut buckets = BTreeMap::new();
        let mut counts = BTreeMap::new();
        for &category in categories {
            buckets.insert(category, BTreeMap::new());
            counts.insert(category, 0);
        }
        Self {
            buckets,
            counts,
            total: 0,
        }
    }

    /// Insert a record under its category key.
    ///
    /// Unconditional overwrite: inserting the same key again replaces the
    /// stored record. The category counter still advances by `quantity`
    /// (1 for families that count boards, the good-unit quantity for CCM
    /// rolls) and the total by 1, once per accepted record.
    pub fn insert(&mut self, category: C, key: String, record: R, quantity: u64) {
        self.buckets.entry(category).or_default().insert(key, record);
        *self.counts.entry(category).or_insert(0) += quantity;
        self.total += 1;
    }

    /// Running counter for a category.
    pub fn count(&self, category: C) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Accepted records across the family, one per row.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Distinct keys stored in a category's bucket.
    pub fn stored(&self, category: C) -> usize {
        self.buckets.get(&category).map_or(0, BTreeMap::len)
    }

    /// Records in a category, in key order.
    pub fn records(&self, category: C) -> impl Iterator<Item = (&String, &R)> {
        self.buckets.get(&category).into_iter().flatten()
    }

    pub fn get(&self, category: C, key: &str) -> Option<&R> {
        self.buckets.get(&category).and_then(|bucket| bucket.get(key))
    }
}
