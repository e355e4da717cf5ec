//! The record store
//!
//! `ChirpDb` is the only owner of persisted state. All reads and writes go
//! through one `RwLock`; a create holds the write half across the durable
//! write so two creates can never interleave their commits or share an id.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{EntityKind, StoreError, StoreResult};
use super::record::{Chirp, User};
use super::state::DbState;
use super::writer::SnapshotWriter;
use crate::crash_point::{fail_point_enabled, points};
use crate::observability::{log_event_with_fields, Event};

/// Durable, thread-safe store for chirps and users.
///
/// Share it as `Arc<ChirpDb>`; there is no global instance.
#[derive(Debug)]
pub struct ChirpDb {
    writer: SnapshotWriter,
    state: RwLock<DbState>,
    fail_next_write: AtomicBool,
}

impl ChirpDb {
    /// Opens the store backed by `path`, creating it if needed.
    ///
    /// An absent or empty file becomes an empty state that is written
    /// durably before this returns.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` if the file cannot be read, does not parse,
    /// violates the id invariants, or the initial state cannot be written.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::unavailable(path, format!("failed to create directory: {}", e))
                })?;
            }
        }

        let writer = SnapshotWriter::new(path);
        let path_str = path.display().to_string();

        let state = match writer.load()? {
            Some(state) => {
                log_event_with_fields(
                    Event::StoreOpened,
                    &[
                        ("path", &path_str),
                        ("chirps", &state.chirps.len().to_string()),
                        ("users", &state.users.len().to_string()),
                        ("next_id", &state.next_id.to_string()),
                    ],
                );
                state
            }
            None => {
                let state = DbState::default();
                writer
                    .write_atomic(&state)
                    .map_err(|reason| StoreError::unavailable(path, reason))?;
                log_event_with_fields(Event::StoreInitialized, &[("path", &path_str)]);
                state
            }
        };

        Ok(Self {
            writer,
            state: RwLock::new(state),
            fail_next_write: AtomicBool::new(false),
        })
    }

    /// Deletes any existing backing file, then opens a fresh store.
    pub fn reset(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        SnapshotWriter::new(path).remove().map_err(|e| {
            StoreError::unavailable(path, format!("failed to remove backing file: {}", e))
        })?;
        log_event_with_fields(Event::StoreReset, &[("path", &path.display().to_string())]);
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    /// Creates a chirp and commits it durably before returning.
    ///
    /// The body is stored as given. On a failed write the id is not
    /// consumed and the record is not visible.
    pub fn create_chirp(&self, body: &str) -> StoreResult<Chirp> {
        let mut state = self.write_state()?;
        let chirp = state.insert_chirp(body);

        if let Err(e) = self.commit(&state) {
            state.rollback_chirp(chirp.id);
            return Err(e);
        }

        log_event_with_fields(Event::ChirpCreated, &[("id", &chirp.id.to_string())]);
        Ok(chirp)
    }

    /// Snapshot of every chirp, in id order.
    pub fn get_chirps(&self) -> Vec<Chirp> {
        self.read_state().chirps.values().cloned().collect()
    }

    pub fn get_chirp(&self, id: u64) -> StoreResult<Chirp> {
        self.read_state()
            .chirps
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Chirp,
                id,
            })
    }

    /// Creates a user in its own id space. Same durability contract as
    /// [`ChirpDb::create_chirp`].
    pub fn create_user(&self, email: &str) -> StoreResult<User> {
        let mut state = self.write_state()?;
        let user = state.insert_user(email);

        if let Err(e) = self.commit(&state) {
            state.rollback_user(user.id);
            return Err(e);
        }

        log_event_with_fields(Event::UserCreated, &[("id", &user.id.to_string())]);
        Ok(user)
    }

    pub fn get_users(&self) -> Vec<User> {
        self.read_state().users.values().cloned().collect()
    }

    pub fn get_user(&self, id: u64) -> StoreResult<User> {
        self.read_state()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: EntityKind::User,
                id,
            })
    }

    /// The id the next successful chirp create will receive.
    pub fn next_chirp_id(&self) -> u64 {
        self.read_state().next_id
    }

    /// Forces the next durable write to fail.
    #[doc(hidden)]
    pub fn inject_write_failure(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Must be called with the write lock held.
    fn commit(&self, state: &DbState) -> StoreResult<()> {
        let result = if self.fail_next_write.swap(false, Ordering::SeqCst)
            || fail_point_enabled(points::STORE_WRITE)
        {
            Err("injected write failure".to_string())
        } else {
            self.writer.write_atomic(state)
        };

        result.map_err(|reason| {
            log_event_with_fields(
                Event::StoreWriteFailed,
                &[
                    ("path", &self.writer.path().display().to_string()),
                    ("reason", &reason),
                ],
            );
            StoreError::write_failed(reason)
        })
    }

    // A create can only fail with a write failure, even when an earlier
    // writer panicked while holding the lock.
    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, DbState>> {
        self.state.write().map_err(|_| {
            let reason = "state lock poisoned by a panicked writer".to_string();
            log_event_with_fields(
                Event::StoreWriteFailed,
                &[
                    ("path", &self.writer.path().display().to_string()),
                    ("reason", &reason),
                ],
            );
            StoreError::write_failed(reason)
        })
    }

    // Writers roll back before releasing the lock, so a poisoned guard
    // still holds committed state.
    fn read_state(&self) -> RwLockReadGuard<'_, DbState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
