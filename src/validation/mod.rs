//! Request validation for chirpy
//!
//! Runs in the handler layer before any store call:
//! - chirp bodies: length limit, then profanity masking
//! - user emails: basic shape check
//!
//! Nothing here touches shared state.

mod email;
mod errors;
mod filter;

pub use email::validate_email;
pub use errors::{ValidationError, ValidationResult};
pub use filter::{ChirpFilter, BANNED_WORDS, MASK, MAX_CHIRP_LENGTH};
