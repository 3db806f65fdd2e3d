//! Student record operations
//!
//! Each operation is one load -> (mutate -> save) pass over the store.
//! Mutations hold the write side of a process-wide lock for the whole
//! pass; reads hold the read side, so a self-healing load never races a
//! save.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use super::errors::{ServiceError, ServiceResult};
use crate::observability::{log_event_with_fields, Event};
use crate::query::{self, SortKey, SortOrder};
use crate::schema::{validate_full, validate_partial, StudentView, ID_FIELD};
use crate::store::{Collection, JsonFileStore};

/// CRUD and sort operations over a `JsonFileStore`.
#[derive(Debug)]
pub struct StudentService {
    store: JsonFileStore,
    lock: RwLock<()>,
}

impl StudentService {
    pub fn new(store: JsonFileStore) -> Self {
        Self {
            store,
            lock: RwLock::new(()),
        }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Returns the full collection as loaded.
    pub fn get_all(&self) -> ServiceResult<Collection> {
        let _guard = self.read_lock()?;
        Ok(self.store.load()?)
    }

    /// Returns one record with its id and bmi.
    pub fn get_by_id(&self, id: &str) -> ServiceResult<StudentView> {
        let _guard = self.read_lock()?;
        let collection = self.store.load()?;
        collection
            .get(id)
            .map(|profile| StudentView::with_id(id, profile))
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Returns every record ordered by `sort_by`.
    ///
    /// `order_by` defaults to ascending. Arguments are checked before the
    /// store is touched.
    pub fn sorted(&self, sort_by: &str, order_by: Option<&str>) -> ServiceResult<Vec<StudentView>> {
        let key: SortKey = sort_by.parse()?;
        let order: SortOrder = match order_by {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };

        let _guard = self.read_lock()?;
        let collection = self.store.load()?;
        Ok(query::sort(&collection, key, order))
    }

    /// Validates and inserts a new record.
    ///
    /// # Errors
    ///
    /// - `Validation` if the candidate breaks the schema
    /// - `Conflict` if the id is already present; storage is not touched
    pub fn create(&self, candidate: &Value) -> ServiceResult<()> {
        let student = validate_full(candidate)?;
        let (id, profile) = student.into_parts();

        let _guard = self.write_lock()?;
        let mut collection = self.store.load()?;
        if collection.contains_key(&id) {
            return Err(ServiceError::Conflict(id));
        }

        collection.insert(id.clone(), profile);
        self.store.save(&collection)?;

        log_event_with_fields(Event::StudentCreated, &[("id", id.as_str())]);
        Ok(())
    }

    /// Overlays a partial update onto an existing record.
    ///
    /// Present fields replace the stored ones whole, the id is re-attached
    /// and the merged record is validated as a full record. On any failure
    /// storage is left untouched.
    pub fn update(&self, id: &str, partial: &Value) -> ServiceResult<()> {
        let patch = validate_partial(partial)?;

        let _guard = self.write_lock()?;
        let mut collection = self.store.load()?;
        let existing = collection
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let mut body = match serde_json::to_value(existing)? {
            Value::Object(body) => body,
            _ => Map::new(),
        };
        patch.apply_to(&mut body)?;
        body.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let merged = validate_full(&Value::Object(body))?;

        // Replacing an existing key keeps its position in the collection
        collection.insert(id.to_string(), merged.profile);
        self.store.save(&collection)?;

        log_event_with_fields(Event::StudentUpdated, &[("id", id)]);
        Ok(())
    }

    /// Removes a record.
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let _guard = self.write_lock()?;
        let mut collection = self.store.load()?;
        if collection.shift_remove(id).is_none() {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.store.save(&collection)?;

        log_event_with_fields(Event::StudentDeleted, &[("id", id)]);
        Ok(())
    }

    fn read_lock(&self) -> ServiceResult<RwLockReadGuard<'_, ()>> {
        self.lock.read().map_err(|_| ServiceError::LockPoisoned)
    }

    fn write_lock(&self) -> ServiceResult<RwLockWriteGuard<'_, ()>> {
        self.lock.write().map_err(|_| ServiceError::LockPoisoned)
    }
}
