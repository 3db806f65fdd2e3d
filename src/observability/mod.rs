//! Observability for studentdb
//!
//! Structured JSON logging of lifecycle, storage and record events.
//!
//! ```ignore
//! use studentdb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::StudentCreated, &[("id", "s1")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    match event.severity() {
        Severity::Error => Logger::log_stderr(Severity::Error, event.as_str(), fields),
        severity => Logger::log(severity, event.as_str(), fields),
    }
}
