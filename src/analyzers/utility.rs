use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A value and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

/// Grouped occurrence counts that remember first-encounter order.
///
/// Ties in [`ValueCounts::mode`] and [`ValueCounts::into_sorted`] go to the
/// value seen first while scanning.
#[derive(Debug, Clone)]
pub struct ValueCounts<T> {
    index: HashMap<T, usize>,
    counts: Vec<ValueCount<T>>,
}

impl<T> Default for ValueCounts<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> ValueCounts<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: T) {
        match self.index.get(&value) {
            Some(&slot) => self.counts[slot].count += 1,
            None => {
                self.index.insert(value.clone(), self.counts.len());
                self.counts.push(ValueCount { value, count: 1 });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Most frequent value. `None` when nothing was counted.
    pub fn mode(&self) -> Option<ValueCount<T>> {
        // max_by_key keeps the last maximum, so scan in reverse
        self.counts.iter().rev().max_by_key(|vc| vc.count).cloned()
    }

    /// All values by descending count; ties keep first-encounter order.
    pub fn into_sorted(self) -> Vec<ValueCount<T>> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for ValueCounts<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counts = ValueCounts::new();
        for value in iter {
            counts.add(value);
        }
        counts
    }
}
