//! Chirp length check and profanity filter
//!
//! Pure functions: no I/O, no shared state.

use std::collections::HashSet;

use super::errors::{ValidationError, ValidationResult};

/// Maximum chirp length, counted in bytes of UTF-8
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Replacement for a banned token
pub const MASK: &str = "****";

/// Words that are masked, compared lowercase
pub const BANNED_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Length check plus profanity filter.
#[derive(Debug, Clone)]
pub struct ChirpFilter {
    max_length: usize,
    banned: HashSet<String>,
}

impl Default for ChirpFilter {
    fn default() -> Self {
        Self::new(MAX_CHIRP_LENGTH)
    }
}

impl ChirpFilter {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            banned: BANNED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Rejects over-long bodies, then masks banned words.
    pub fn validate(&self, body: &str) -> ValidationResult<String> {
        let length = body.len();
        if length > self.max_length {
            return Err(ValidationError::TooLong {
                length,
                max: self.max_length,
            });
        }
        Ok(self.clean(body))
    }

    /// Splits on whitespace, masks banned tokens, rejoins with single spaces.
    ///
    /// A token only matches when it is exactly a banned word (ignoring case);
    /// `Sharbert!` is left alone.
    pub fn clean(&self, body: &str) -> String {
        body.split_whitespace()
            .map(|word| {
                if self.banned.contains(&word.to_lowercase()) {
                    MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
