//! In-memory image of the backing document
//!
//! The whole `DbState` is what gets written to disk on every create:
//!
//! ```text
//! {
//!   "chirps": { "1": { "id": 1, "body": "..." } },
//!   "next_id": 2,
//!   "users": { "1": { "id": 1, "email": "..." } },
//!   "next_user_id": 2
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::{Chirp, User};

fn first_id() -> u64 {
    1
}

/// Complete durable state of the store.
///
/// Invariants:
/// - `next_id` is greater than every key in `chirps`
/// - `next_user_id` is greater than every key in `users`
/// - every map key equals the `id` of the record stored under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbState {
    pub chirps: BTreeMap<u64, Chirp>,

    #[serde(default = "first_id")]
    pub next_id: u64,

    #[serde(default)]
    pub users: BTreeMap<u64, User>,

    #[serde(default = "first_id")]
    pub next_user_id: u64,
}

impl Default for DbState {
    fn default() -> Self {
        Self {
            chirps: BTreeMap::new(),
            next_id: first_id(),
            users: BTreeMap::new(),
            next_user_id: first_id(),
        }
    }
}

impl DbState {
    /// Checks the invariants of a freshly parsed state.
    pub fn validate(&self) -> Result<(), String> {
        if self.next_id == 0 || self.next_user_id == 0 {
            return Err("id counters must start at 1".to_string());
        }

        for (key, chirp) in &self.chirps {
            if *key != chirp.id {
                return Err(format!("chirp key {} holds record with id {}", key, chirp.id));
            }
        }
        if let Some(max) = self.chirps.keys().next_back() {
            if *max >= self.next_id {
                return Err(format!(
                    "next_id {} does not exceed highest chirp id {}",
                    self.next_id, max
                ));
            }
        }

        for (key, user) in &self.users {
            if *key != user.id {
                return Err(format!("user key {} holds record with id {}", key, user.id));
            }
        }
        if let Some(max) = self.users.keys().next_back() {
            if *max >= self.next_user_id {
                return Err(format!(
                    "next_user_id {} does not exceed highest user id {}",
                    self.next_user_id, max
                ));
            }
        }

        Ok(())
    }

    /// Assigns the next chirp id and inserts the record.
    pub fn insert_chirp(&mut self, body: &str) -> Chirp {
        let chirp = Chirp::new(self.next_id, body);
        self.next_id += 1;
        self.chirps.insert(chirp.id, chirp.clone());
        chirp
    }

    /// Undoes the most recent `insert_chirp`.
    pub fn rollback_chirp(&mut self, id: u64) {
        self.chirps.remove(&id);
        self.next_id = id;
    }

    pub fn insert_user(&mut self, email: &str) -> User {
        let user = User::new(self.next_user_id, email);
        self.next_user_id += 1;
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn rollback_user(&mut self, id: u64) {
        self.users.remove(&id);
        self.next_user_id = id;
    }
}
