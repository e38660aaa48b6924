//! Page-scoped store of per-field provenance entries

use crate::{FieldKey, ProvenanceEntry, RecordRef, SourceId};
use std::collections::HashMap;

/// Maps each [`FieldKey`] to a stable slot in the store.
///
/// Slots are assigned in first-access order and never move: the store has
/// no removal operation.
#[derive(Debug, Default, Clone)]
pub struct FieldKeyIndex {
    slots: HashMap<FieldKey, usize>,
}

impl FieldKeyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of a key, if it has been seen
    pub fn slot(&self, key: &FieldKey) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Slot of a key, assigning `next` when it has not been seen.
    /// Returns the slot and whether it was newly assigned.
    pub fn slot_or_insert(&mut self, key: &FieldKey, next: usize) -> (usize, bool) {
        if let Some(slot) = self.slots.get(key) {
            return (*slot, false);
        }
        self.slots.insert(key.clone(), next);
        (next, true)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no key has been indexed
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Provenance data for every field touched during one page session.
///
/// Constructed once per page and handed to the editors by reference.
/// Entries are created lazily on first access and live until the page goes
/// away.
#[derive(Debug, Default, Clone)]
pub struct ProvenanceStore {
    index: FieldKeyIndex,
    entries: Vec<(FieldKey, ProvenanceEntry)>,
    next_temporary: u64,
}

impl ProvenanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, created empty if this is the first access
    pub fn get(&mut self, key: &FieldKey) -> &mut ProvenanceEntry {
        let (slot, created) = self.index.slot_or_insert(key, self.entries.len());
        if created {
            self.entries.push((key.clone(), ProvenanceEntry::new()));
        }
        &mut self.entries[slot].1
    }

    /// Entry for `key` without creating it
    pub fn peek(&self, key: &FieldKey) -> Option<&ProvenanceEntry> {
        self.index.slot(key).map(|slot| &self.entries[slot].1)
    }

    /// Whether `key` has an entry
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.index.slot(key).is_some()
    }

    /// All entries in first-access order
    pub fn list(&self) -> impl Iterator<Item = (&FieldKey, &ProvenanceEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    /// Entries belonging to one record, in first-access order
    pub fn record_entries<'a>(
        &'a self,
        record: &'a RecordRef,
    ) -> impl Iterator<Item = (&'a FieldKey, &'a ProvenanceEntry)> + 'a {
        self.list().filter(move |(k, _)| &k.record == record)
    }

    /// Allocate the next client-side placeholder id
    pub fn next_temporary_id(&mut self) -> SourceId {
        let id = SourceId::Temporary(self.next_temporary);
        self.next_temporary += 1;
        id
    }

    /// Number of tracked fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field has been touched yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
