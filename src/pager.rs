//! Fixed-size pages over the filtered trips, for raw data display.

pub const PAGE_SIZE: usize = 5;

/// The page starting at `offset`. Empty once `offset` is past the end.
pub fn page<T>(items: &[T], offset: usize) -> &[T] {
    let start = offset.min(items.len());
    let end = offset.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Walks a slice [`PAGE_SIZE`] items at a time, in order.
#[derive(Debug, Clone)]
pub struct Pager<'a, T> {
    items: &'a [T],
    offset: usize,
}

impl<'a, T> Pager<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, offset: 0 }
    }
}

impl<'a, T> Iterator for Pager<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let current = page(self.items, self.offset);
        if current.is_empty() {
            return None;
        }
        self.offset += PAGE_SIZE;
        Some(current)
    }
}
