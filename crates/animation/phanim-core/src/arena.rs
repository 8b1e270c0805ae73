//! Index-stable bulk store used by every registry.
//!
//! Entries are appended and never removed one at a time; `free_all` drops the
//! whole store and bumps the generation so handles minted earlier can be told
//! apart. Capacity grows by doubling, starting from the configured initial
//! capacity.

use std::fmt;

pub const DEFAULT_INIT_CAP: usize = 10;

pub struct Arena<T> {
    items: Vec<T>,
    capacity: usize,
    initial_capacity: usize,
    generation: u32,
    label: &'static str,
}

impl<T> Arena<T> {
    pub fn new(label: &'static str) -> Self {
        Self::with_initial_capacity(label, DEFAULT_INIT_CAP)
    }

    /// An initial capacity of zero is bumped to one so growth always makes progress.
    pub fn with_initial_capacity(label: &'static str, initial_capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
            initial_capacity: initial_capacity.max(1),
            generation: 0,
            label,
        }
    }

    /// Append a value, growing first if full. Returns the index of the new entry.
    pub fn push(&mut self, value: T) -> usize {
        if self.items.len() >= self.capacity {
            self.grow();
        }
        let index = self.items.len();
        self.items.push(value);
        index
    }

    fn grow(&mut self) {
        let new_cap = self.initial_capacity.max(self.capacity * 2);
        self.items.reserve_exact(new_cap - self.items.len());
        log::trace!(
            "arena `{}`: grow {} -> {} (len {})",
            self.label,
            self.capacity,
            new_cap,
            self.items.len()
        );
        self.capacity = new_cap;
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity under the doubling policy.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Drop every entry at once. Indices handed out before this call are dead.
    pub fn free_all(&mut self) {
        log::trace!(
            "arena `{}`: free_all ({} entries, generation {})",
            self.label,
            self.items.len(),
            self.generation
        );
        self.items = Vec::new();
        self.capacity = 0;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T: fmt::Debug> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("label", &self.label)
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .field("generation", &self.generation)
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_by_doubling_from_initial() {
        let mut arena = Arena::new("test");
        assert_eq!(arena.capacity(), 0);

        arena.push(0u32);
        assert_eq!(arena.capacity(), DEFAULT_INIT_CAP);

        for i in 1..=DEFAULT_INIT_CAP as u32 {
            arena.push(i);
        }
        assert_eq!(arena.len(), DEFAULT_INIT_CAP + 1);
        assert_eq!(arena.capacity(), 2 * DEFAULT_INIT_CAP);

        for i in 0..DEFAULT_INIT_CAP as u32 {
            arena.push(100 + i);
        }
        assert_eq!(arena.capacity(), 4 * DEFAULT_INIT_CAP);
    }

    #[test]
    fn indices_survive_growth() {
        let mut arena = Arena::with_initial_capacity("test", 2);
        let ids: Vec<usize> = (0..9).map(|i| arena.push(i * 10)).collect();
        assert_eq!(ids, (0..9).collect::<Vec<_>>());
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(arena.get(*id), Some(&(i * 10)));
        }
        assert_eq!(arena.capacity(), 16);
    }

    #[test]
    fn free_all_bumps_generation() {
        let mut arena = Arena::with_initial_capacity("test", 4);
        arena.push("a");
        arena.push("b");
        assert_eq!(arena.generation(), 0);

        arena.free_all();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.generation(), 1);
        assert!(arena.get(0).is_none());

        assert_eq!(arena.push("c"), 0);
        assert_eq!(arena.capacity(), 4);
    }

    #[test]
    fn zero_initial_capacity_still_grows() {
        let mut arena = Arena::with_initial_capacity("test", 0);
        arena.push(1u8);
        arena.push(2u8);
        arena.push(3u8);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.capacity(), 4);
    }
}
