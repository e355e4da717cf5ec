//! Observable events for chirpy
//!
//! Events are explicit and typed. Each maps to a fixed uppercase name
//! written as the `event` field of a log line.

use std::fmt;

use super::logger::Severity;

/// Observable events in chirpy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup aborted before serving (FATAL)
    BootFailed,
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP listener bound, ready for requests
    ServerListening,

    // Store
    /// Existing backing file loaded
    StoreOpened,
    /// Fresh empty backing file written
    StoreInitialized,
    /// Backing file wiped at startup (debug mode)
    StoreReset,
    /// Durable write failed, create rolled back
    StoreWriteFailed,
    /// Backing file replaced but its directory entry not synced
    StoreDirSyncFailed,

    // Records
    /// Chirp committed
    ChirpCreated,
    /// Chirp refused by validation
    ChirpRejected,
    /// User committed
    UserCreated,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "CHIRPY_STARTUP_BEGIN",
            Event::BootFailed => "CHIRPY_STARTUP_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerListening => "CHIRPY_SERVING",

            Event::StoreOpened => "STORE_OPENED",
            Event::StoreInitialized => "STORE_INITIALIZED",
            Event::StoreReset => "STORE_RESET",
            Event::StoreWriteFailed => "STORE_WRITE_FAILED",
            Event::StoreDirSyncFailed => "STORE_DIR_SYNC_FAILED",

            Event::ChirpCreated => "CHIRP_CREATED",
            Event::ChirpRejected => "CHIRP_REJECTED",
            Event::UserCreated => "USER_CREATED",
        }
    }

    /// Severity a log line for this event is written with
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::StoreWriteFailed => Severity::Error,
            Event::ChirpRejected | Event::StoreReset | Event::StoreDirSyncFailed => {
                Severity::Warn
            }
            _ => Severity::Info,
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
