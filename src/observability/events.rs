//! Observable events
//!
//! Every log line names one of these events, so log consumers can match on
//! a closed set of identifiers.

use std::fmt;

/// Observable events in studentdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP server bound and serving
    ServerStart,

    // Storage
    /// Data file was missing and has been created empty
    StorageCreated,
    /// Data file was unreadable as a collection and has been reset to empty
    StorageSelfHealed,
    /// One stored body did not decode as a record and was left out of the load
    StorageRecordDropped,

    // Records
    /// A student record was created
    StudentCreated,
    /// A student record was updated
    StudentUpdated,
    /// A student record was deleted
    StudentDeleted,

    // Boundary
    /// A request failed with an internal error
    RequestFailed,
}

impl Event {
    /// Returns the event identifier written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::StorageCreated => "STORAGE_CREATED",
            Event::StorageSelfHealed => "STORAGE_SELF_HEALED",
            Event::StorageRecordDropped => "STORAGE_RECORD_DROPPED",
            Event::StudentCreated => "STUDENT_CREATED",
            Event::StudentUpdated => "STUDENT_UPDATED",
            Event::StudentDeleted => "STUDENT_DELETED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> super::Severity {
        use super::Severity;
        match self {
            Event::StorageSelfHealed | Event::StorageRecordDropped => Severity::Warn,
            Event::RequestFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
