//! Persisted record types
//!
//! Chirps and users live in separate identifier spaces. Both are immutable
//! once created: the store never updates or deletes a record.

use serde::{Deserialize, Serialize};

/// A stored public message.
///
/// `body` is the text after profanity filtering; the store does not
/// enforce any content policy itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
}

impl Chirp {
    pub fn new(id: u64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }
}

/// A registered user, keyed by its own id counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
}

impl User {
    pub fn new(id: u64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chirp_json_shape() {
        let chirp = Chirp::new(3, "hello world");
        let json = serde_json::to_value(&chirp).unwrap();

        assert_eq!(json, serde_json::json!({"id": 3, "body": "hello world"}));
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::new(1, "walt@breakingbad.com");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "walt@breakingbad.com");
    }
}
