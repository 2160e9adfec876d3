//! Ordered record storage with an id index.
//!
//! Records are kept in insertion order in a [`Vec`]. A side [`HashMap`]
//! maps each id to its position so lookups are O(1). Removing a record
//! shifts the rows behind it, so their positions are rewritten.

use std::collections::HashMap;

use crate::record::Record;

/// One ordered collection of records.
pub struct Collection<R: Record> {
    rows: Vec<R>,
    index: HashMap<R::Id, usize>,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter()
    }

    /// Whether a record with `id` exists.
    pub fn contains(&self, id: &R::Id) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.index.get(id).and_then(|&pos| self.rows.get(pos))
    }

    /// Append a record. If its id is already taken the record is handed
    /// back untouched.
    pub fn insert(&mut self, record: R) -> Result<(), R> {
        if self.index.contains_key(record.id()) {
            return Err(record);
        }
        self.index.insert(record.id().clone(), self.rows.len());
        self.rows.push(record);
        Ok(())
    }

    /// Merge `patch` into the record with `id` in place and return a copy
    /// of the merged record.
    pub fn update(&mut self, id: &R::Id, patch: R::Patch) -> Option<R> {
        let pos = *self.index.get(id)?;
        let row = self.rows.get_mut(pos)?;
        row.merge(patch);
        Some(row.clone())
    }

    /// Remove the record with `id`, keeping the order of the others.
    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        let pos = self.index.remove(id)?;
        if pos >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(pos);
        for (offset, row) in self.rows.iter().enumerate().skip(pos) {
            self.index.insert(row.id().clone(), offset);
        }
        Some(removed)
    }

    /// Remove every record, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.rows.len();
        self.rows.clear();
        self.index.clear();
        count
    }
}
