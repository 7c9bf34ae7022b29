//! Min-priority structure keyed by usage count.
//!
//! Items live in per-key buckets so every item sharing the minimum key can
//! be inspected, and one of them drawn uniformly, without popping and
//! re-pushing the rest.

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use crate::{
    error::{Result, SamplingError},
    uniform::UniformSource,
};

/// Bucketed min-heap over `(item, key)` pairs where each item appears once.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, UsageHeap};
///
/// let mut heap = UsageHeap::new();
/// heap.push("a", 2)?;
/// heap.push("b", 0)?;
/// heap.push("c", 0)?;
/// assert_eq!(heap.peek_min_key(), Some(0));
///
/// let mut source = UniformSource::from_seed(4);
/// let (item, key) = heap.pop_uniform_min(&mut source).expect("heap is not empty");
/// assert!(item == "b" || item == "c");
/// assert_eq!(key, 0);
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct UsageHeap<T> {
    buckets: BTreeMap<usize, Vec<T>>,
    keys: HashMap<T, usize>,
}

impl<T> Default for UsageHeap<T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            keys: HashMap::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> UsageHeap<T> {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the heap holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts `item` with `key`.
    ///
    /// # Errors
    /// Returns [`SamplingError::DuplicateItem`] carrying the existing key
    /// when `item` is already present.
    pub fn push(&mut self, item: T, key: usize) -> Result<()> {
        if let Some(&held) = self.keys.get(&item) {
            return Err(SamplingError::DuplicateItem { key: held });
        }
        self.keys.insert(item.clone(), key);
        self.buckets.entry(key).or_default().push(item);
        Ok(())
    }

    /// Smallest key currently held.
    #[must_use]
    pub fn peek_min_key(&self) -> Option<usize> {
        self.buckets.keys().next().copied()
    }

    /// Current key of `item`.
    #[must_use]
    pub fn key_of(&self, item: &T) -> Option<usize> {
        self.keys.get(item).copied()
    }

    /// Every item sharing the minimum key; empty when the heap is empty.
    #[must_use]
    pub fn min_bucket(&self) -> &[T] {
        self.buckets
            .values()
            .next()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Removes and returns an item with the minimum key. Ties resolve to
    /// the most recently inserted item; use [`Self::pop_uniform_min`] for a
    /// random tie-break.
    pub fn pop_min(&mut self) -> Option<(T, usize)> {
        let mut entry = self.buckets.first_entry()?;
        let key = *entry.key();
        let item = entry.get_mut().pop()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.keys.remove(&item);
        Some((item, key))
    }

    /// Removes `item`, returning the key it held.
    pub fn remove(&mut self, item: &T) -> Option<usize> {
        let key = self.keys.remove(item)?;
        if let Some(bucket) = self.buckets.get_mut(&key) {
            if let Some(position) = bucket.iter().position(|held| held == item) {
                bucket.swap_remove(position);
            }
            if bucket.is_empty() {
                self.buckets.remove(&key);
            }
        }
        Some(key)
    }

    /// Removes every item at the minimum key as one batch.
    pub fn take_min_bucket(&mut self) -> Option<(usize, Vec<T>)> {
        let (key, bucket) = self.buckets.pop_first()?;
        for item in &bucket {
            self.keys.remove(item);
        }
        Some((key, bucket))
    }

    /// Removes one item chosen uniformly among those with the minimum key.
    pub fn pop_uniform_min(&mut self, source: &mut UniformSource) -> Option<(T, usize)> {
        self.pop_uniform_min_where(source, |_| true)
    }

    /// Removes one item chosen uniformly among the `eligible` items that
    /// share the smallest key any eligible item holds.
    ///
    /// Ineligible items are never moved, so the heap keeps every other item
    /// at its original key. Returns `None` when no item is eligible.
    pub fn pop_uniform_min_where<F>(
        &mut self,
        source: &mut UniformSource,
        mut eligible: F,
    ) -> Option<(T, usize)>
    where
        F: FnMut(&T) -> bool,
    {
        let (key, position) = self.buckets.iter().find_map(|(&key, bucket)| {
            let candidates: Vec<usize> = bucket
                .iter()
                .enumerate()
                .filter(|&(_, item)| eligible(item))
                .map(|(position, _)| position)
                .collect();
            if candidates.is_empty() {
                return None;
            }
            let chosen = candidates.get(source.uniform_index(candidates.len()))?;
            Some((key, *chosen))
        })?;

        let bucket = self.buckets.get_mut(&key)?;
        let item = bucket.swap_remove(position);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.keys.remove(&item);
        Some((item, key))
    }

    /// Iterates `(item, key)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.buckets
            .iter()
            .flat_map(|(&key, bucket)| bucket.iter().map(move |item| (item, key)))
    }
}
