//! JSON file store
//!
//! The whole collection lives in one file as a pretty-printed JSON object
//! `id -> body`. Every save rewrites the file in full:
//! 1. write to a fresh temp file in the same directory
//! 2. fsync the temp file
//! 3. rename over the data file
//!
//! so a reader only ever sees a completed save.
//!
//! Loading decodes each body on its own, so one off-schema body costs only
//! that record.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use tempfile::NamedTempFile;

use super::errors::{StoreError, StoreResult};
use super::Collection;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::StudentProfile;

/// Default data file name
pub const DEFAULT_DATA_FILE: &str = "Students.json";

/// Store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given data file. Nothing is touched on disk
    /// until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the data file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the data file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the full collection.
    ///
    /// - Missing file: created holding an empty mapping, empty collection returned.
    /// - File that is not a JSON object: overwritten with an empty mapping,
    ///   empty collection returned, loss logged as `STORAGE_SELF_HEALED`.
    /// - Body that does not decode as a record: left out of the result and
    ///   logged as `STORAGE_RECORD_DROPPED`. The file is not rewritten; the
    ///   next save persists the collection without it.
    /// - Filesystem failure: returned as `StoreError::Io`.
    pub fn load(&self) -> StoreResult<Collection> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.save(&Collection::new())?;
                let path = self.display();
                log_event_with_fields(Event::StorageCreated, &[("path", path.as_str())]);
                return Ok(Collection::new());
            }
            Err(e) => return Err(StoreError::io("read", &self.path, e)),
        };

        let bodies = match serde_json::from_slice::<IndexMap<String, Value>>(&content) {
            Ok(bodies) => bodies,
            Err(e) => {
                self.heal(&e.to_string(), content.len())?;
                return Ok(Collection::new());
            }
        };

        let mut collection = Collection::with_capacity(bodies.len());
        for (id, body) in bodies {
            match serde_json::from_value::<StudentProfile>(body) {
                Ok(profile) => {
                    collection.insert(id, profile);
                }
                Err(e) => {
                    let path = self.display();
                    let reason = e.to_string();
                    log_event_with_fields(
                        Event::StorageRecordDropped,
                        &[
                            ("path", path.as_str()),
                            ("id", id.as_str()),
                            ("reason", reason.as_str()),
                        ],
                    );
                }
            }
        }

        Ok(collection)
    }

    /// Resets an unparsable data file to an empty mapping.
    fn heal(&self, reason: &str, discarded_bytes: usize) -> StoreResult<()> {
        self.save(&Collection::new())?;

        let path = self.display();
        let discarded = discarded_bytes.to_string();
        log_event_with_fields(
            Event::StorageSelfHealed,
            &[
                ("path", path.as_str()),
                ("reason", reason),
                ("discarded_bytes", discarded.as_str()),
            ],
        );
        Ok(())
    }

    /// Saves the full collection, replacing the data file atomically.
    ///
    /// Each save writes its own uniquely named temp file, so concurrent
    /// saves never interleave bytes; the last rename wins.
    pub fn save(&self, collection: &Collection) -> StoreResult<()> {
        let content = encode(collection)?;

        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StoreError::io("create directory", dir, e))?;

        let mut temp =
            NamedTempFile::new_in(dir).map_err(|e| StoreError::io("create temp file in", dir, e))?;

        temp.write_all(&content)
            .map_err(|e| StoreError::io("write", temp.path(), e))?;

        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io("fsync", temp.path(), e))?;

        temp.persist(&self.path)
            .map_err(|e| StoreError::io("replace", &self.path, e.error))?;

        // Make the rename durable; failure here does not undo the save
        if let Ok(dir) = File::open(dir) {
            let _ = dir.sync_all();
        }

        Ok(())
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes a collection with a four-space indent.
fn encode(collection: &Collection) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(64 * (collection.len() + 1));
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    collection.serialize(&mut serializer)?;
    Ok(buf)
}
