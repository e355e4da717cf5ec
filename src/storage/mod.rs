//! Record store subsystem for chirpy
//!
//! The store holds the canonical persistent state of all chirps and users.
//! It is the only component that touches the backing file.
//!
//! # Design Principles
//!
//! - Ids are assigned by the store, strictly increasing, never reused
//! - Full-state rewrite on every create (temp file + fsync + rename)
//! - A create is acknowledged only after its write is durable
//! - A failed write rolls the in-memory state back before the lock is released
//! - Unreadable state at startup is fatal

mod db;
mod errors;
mod record;
mod state;
mod writer;

pub use db::ChirpDb;
pub use errors::{EntityKind, Severity, StoreError, StoreResult};
pub use record::{Chirp, User};
pub use state::DbState;
pub use writer::SnapshotWriter;
