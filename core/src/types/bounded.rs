use std::ops::Deref;

/// A sequence capped at a maximum number of elements
///
/// Appends beyond the capacity are silently dropped instead of growing the
/// sequence or raising an error.
///
/// # Example
///
/// ```
/// use rtdvh_core::BoundedVec;
///
/// let mut list = BoundedVec::new(3);
/// list.push(5);
/// list.extend([1, 2, 3]);
/// assert_eq!(list.as_slice(), &[5, 1, 2]);
/// assert!(list.is_full());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedVec<T> {
    /// Creates an empty sequence holding at most `capacity` elements
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of elements
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, truncating the tail if it no longer fits
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.items.truncate(capacity);
    }

    /// Returns true once the sequence holds `capacity` elements
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Number of remaining free slots
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Appends `value` if there is room
    ///
    /// Returns `false` when the value was dropped.
    pub fn push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Inserts `value` at `index` if there is room
    ///
    /// An index past the end appends. Returns `false` when the sequence is
    /// full and nothing was inserted.
    pub fn insert(&mut self, index: usize, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.insert(index.min(self.items.len()), value);
        true
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> BoundedVec<T> {
    /// Appends as much of `values` as fits
    ///
    /// Returns the number of elements copied.
    pub fn extend_from_slice(&mut self, values: &[T]) -> usize {
        let take = values.len().min(self.remaining());
        self.items.extend_from_slice(&values[..take]);
        take
    }
}

impl<T> Extend<T> for BoundedVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let take = self.remaining();
        self.items.extend(iter.into_iter().take(take));
    }
}

impl<T> Deref for BoundedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for BoundedVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a BoundedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut list = BoundedVec::new(3);
        assert!(list.push(1));
        assert!(list.push(2));
        assert!(list.push(3));
        assert!(!list.push(4));
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_extend_exact_fit() {
        let mut list = BoundedVec::new(3);
        list.extend(vec![1, 2, 3]);
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_extend_from_bounded() {
        let mut source = BoundedVec::new(3);
        source.extend([4, 5, 6]);
        let mut list = BoundedVec::new(3);
        list.extend(source);
        assert_eq!(list.as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn test_extend_truncates_after_lowering_capacity() {
        let mut list = BoundedVec::new(3);
        list.set_capacity(2);
        list.extend([7, 8, 9]);
        assert_eq!(list.as_slice(), &[7, 8]);

        let mut source = BoundedVec::new(3);
        source.extend([10, 11, 12]);
        let mut other = BoundedVec::new(3);
        other.set_capacity(2);
        assert_eq!(other.extend_from_slice(&source), 2);
        assert_eq!(other.as_slice(), &[10, 11]);
    }

    #[test]
    fn test_extend_lazy_iterator_stops_at_capacity() {
        let mut list = BoundedVec::new(3);
        list.extend(13..);
        assert_eq!(list.as_slice(), &[13, 14, 15]);
    }

    #[test]
    fn test_is_full() {
        let mut list = BoundedVec::new(3);
        assert!(!list.is_full());
        list.push(1);
        list.push(1);
        assert!(!list.is_full());
        list.push(1);
        assert!(list.is_full());
        assert_eq!(list.remaining(), 0);
    }

    #[test]
    fn test_insert_ignored_when_full() {
        let mut list = BoundedVec::new(2);
        assert!(list.insert(0, "b"));
        assert!(list.insert(0, "a"));
        assert!(!list.insert(1, "x"));
        assert_eq!(list.as_slice(), &["a", "b"]);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut list = BoundedVec::new(5);
        assert!(list.insert(2, "test"));
        assert!(list.insert(usize::MAX, "tail"));
        assert!(list.insert(1, "mid"));
        assert_eq!(list.as_slice(), &["test", "mid", "tail"]);
    }

    #[test]
    fn test_shrinking_capacity_truncates() {
        let mut list = BoundedVec::new(4);
        list.extend([1, 2, 3, 4]);
        list.set_capacity(2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.into_vec(), vec![1, 2]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut list: BoundedVec<u8> = BoundedVec::new(0);
        assert!(list.is_full());
        assert!(!list.push(1));
        assert!(list.is_empty());
    }
}
