//! In-memory record store.

use crate::error::{CoreError, CoreResult};
use crate::record::{InterfaceFields, InterfaceRecord, RecordId};
use parking_lot::RwLock;
use tracing::debug;

/// Insertion-ordered collection of interface records.
///
/// The store lives for the whole process; nothing is persisted. All
/// mutations go through a single lock so a multi-threaded runtime sees
/// every insert, replace and delete as one atomic step.
pub struct RecordStore {
    /// Records in insertion order.
    records: RwLock<Vec<InterfaceRecord>>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store pre-loaded with seed records, keeping their order and ids.
    pub fn with_records(records: Vec<InterfaceRecord>) -> Self {
        let store = Self::new();
        store.load(records);
        store
    }

    /// Appends seed records. Records whose id is already present are skipped.
    ///
    /// Returns the number of records actually added.
    pub fn load(&self, records: Vec<InterfaceRecord>) -> usize {
        let mut guard = self.records.write();
        let mut added = 0;
        for record in records {
            if guard.iter().any(|r| r.id == record.id) {
                debug!(id = %record.id, "skipping duplicate seed record");
                continue;
            }
            guard.push(record);
            added += 1;
        }
        added
    }

    /// Inserts a new record and returns it with its generated id.
    pub fn insert(&self, fields: InterfaceFields) -> InterfaceRecord {
        let record = InterfaceRecord::create(fields);
        self.records.write().push(record.clone());
        record
    }

    /// Returns the record with the given id.
    pub fn get(&self, id: &RecordId) -> CoreResult<InterfaceRecord> {
        self.records
            .read()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(id.as_str()))
    }

    /// Removes the record with the given id, keeping the order of the rest.
    pub fn delete(&self, id: &RecordId) -> CoreResult<InterfaceRecord> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CoreError::not_found(id.as_str()))?;
        Ok(records.remove(index))
    }

    /// Overwrites every field of the record except its id.
    pub fn replace(&self, id: &RecordId, fields: InterfaceFields) -> CoreResult<InterfaceRecord> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CoreError::not_found(id.as_str()))?;
        record.fields = fields;
        Ok(record.clone())
    }

    /// Returns a snapshot of all records in insertion order.
    pub fn list_all(&self) -> Vec<InterfaceRecord> {
        self.records.read().clone()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
