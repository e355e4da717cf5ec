//! Observability subsystem for chirpy
//!
//! - Structured JSON event logging for the store and process lifecycle
//! - Atomic service counters behind the admin metrics page
//!
//! HTTP request spans go through `tracing` (see `http_server::server`);
//! this module covers the events the service itself decides to record.
//!
//! # Usage
//!
//! ```ignore
//! use chirpy::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ChirpCreated, &[("id", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_fileserver_hits();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::BootStart);
        log_event(Event::ServerListening);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("database_path", "/tmp/db.json")]);
    }
}
