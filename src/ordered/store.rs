use super::reorder::{self, Direction};

/// An entry that can live in an ordered working sequence.
///
/// `key` must be unique within one collection; the store never deduplicates.
pub trait Sequenced {
    fn key(&self) -> &str;
    fn position(&self) -> usize;
    fn set_position(&mut self, position: usize);
}

/// Why a `remove` call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemoveError {
    /// The collection must keep at least its configured minimum of items.
    #[error("the collection must keep at least {0} item(s)")]
    MinItems(usize),
    /// No entry with the given key exists.
    #[error("no item with that key")]
    NotFound,
}

/// Working copy of an ordered sequence during one edit session.
///
/// Holds local state only; no I/O. Every mutation renumbers positions to
/// `0..len-1` in vector order.
#[derive(Debug, Clone)]
pub struct OrderedStore<T: Sequenced> {
    items: Vec<T>,
    min_items: usize,
}

impl<T: Sequenced> Default for OrderedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sequenced> OrderedStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            min_items: 0,
        }
    }

    /// A store that refuses to drop below `min` entries (checklists keep 1).
    pub fn with_min_items(min: usize) -> Self {
        Self {
            items: Vec::new(),
            min_items: min,
        }
    }

    /// Replace the working sequence with a normalized copy of `items`.
    /// Input order is preserved; positions are rewritten to `0..n-1`.
    /// Called once per dialog-open. Idempotent on already-normalized input.
    pub fn hydrate(&mut self, items: Vec<T>) {
        self.items = items;
        reorder::renumber(&mut self.items);
    }

    /// Append at the end; the new entry's position is the previous length.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        reorder::renumber(&mut self.items);
    }

    /// Delete the entry with `key` and renumber the remainder.
    ///
    /// Refused (and the sequence left untouched) when the store is already
    /// at its minimum size or the key is unknown.
    pub fn remove(&mut self, key: &str) -> Result<T, RemoveError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.key() == key)
            .ok_or(RemoveError::NotFound)?;
        if self.items.len() <= self.min_items {
            return Err(RemoveError::MinItems(self.min_items));
        }
        let removed = self.items.remove(idx);
        reorder::renumber(&mut self.items);
        Ok(removed)
    }

    /// Mutate the payload of the entry with `key` in place. Position is not
    /// affected. No-op when the key is unknown.
    pub fn update<F: FnOnce(&mut T)>(&mut self, key: &str, f: F) {
        if let Some(item) = self.items.iter_mut().find(|i| i.key() == key) {
            f(item);
        }
    }

    /// Relocate `source_key` to the slot currently held by `target_key`.
    pub fn move_to(&mut self, source_key: &str, target_key: &str) {
        reorder::move_to_key(&mut self.items, source_key, target_key);
    }

    /// Move the entry at `index` one slot up or down.
    pub fn move_step(&mut self, index: usize, direction: Direction) {
        reorder::move_step(&mut self.items, index, direction);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|i| i.key() == key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys in current sequence order, the shape the reorder endpoints take.
    pub fn keys_in_order(&self) -> Vec<String> {
        self.items.iter().map(|i| i.key().to_string()).collect()
    }

    /// Consume the store, yielding the normalized sequence.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
