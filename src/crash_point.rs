//! Failure injection for durability testing
//!
//! Two environment variables drive this module:
//!
//! - `CHIRPY_CRASH_POINT=<name>` aborts the process when execution reaches
//!   the named point (no cleanup, no unwinding).
//! - `CHIRPY_FAIL_POINT=<name>` makes the named operation report failure
//!   instead of performing it, without terminating.
//!
//! # Usage
//!
//! ```ignore
//! use chirpy::crash_point::{maybe_crash, points};
//!
//! maybe_crash(points::STORE_BEFORE_RENAME);
//! ```
//!
//! ```bash
//! CHIRPY_CRASH_POINT=store_before_rename chirpy serve
//! ```

use std::sync::OnceLock;

static CRASH_POINT: OnceLock<Option<String>> = OnceLock::new();
static FAIL_POINT: OnceLock<Option<String>> = OnceLock::new();

#[inline]
fn get_crash_point() -> Option<&'static str> {
    CRASH_POINT
        .get_or_init(|| std::env::var("CHIRPY_CRASH_POINT").ok())
        .as_deref()
}

#[inline]
fn get_fail_point() -> Option<&'static str> {
    FAIL_POINT
        .get_or_init(|| std::env::var("CHIRPY_FAIL_POINT").ok())
        .as_deref()
}

/// Returns true if `CHIRPY_CRASH_POINT` equals the given name.
#[inline]
pub fn crash_point_enabled(name: &str) -> bool {
    get_crash_point().map(|p| p == name).unwrap_or(false)
}

/// Returns true if `CHIRPY_FAIL_POINT` equals the given name.
#[inline]
pub fn fail_point_enabled(name: &str) -> bool {
    get_fail_point().map(|p| p == name).unwrap_or(false)
}

/// Abort the process if the named crash point is enabled.
///
/// No-op when `CHIRPY_CRASH_POINT` is unset or names another point.
#[inline]
pub fn maybe_crash(name: &str) {
    if crash_point_enabled(name) {
        eprintln!("[CRASH] Triggering crash at point: {}", name);
        std::process::abort();
    }
}

/// All defined point names
pub mod points {
    /// Temp file written and synced, backing file not yet replaced
    pub const STORE_BEFORE_RENAME: &str = "store_before_rename";
    /// Backing file replaced, create not yet acknowledged
    pub const STORE_AFTER_RENAME: &str = "store_after_rename";
    /// Fail point: the durable write of a create
    pub const STORE_WRITE: &str = "store_write";

    pub fn all() -> &'static [&'static str] {
        &[STORE_BEFORE_RENAME, STORE_AFTER_RENAME, STORE_WRITE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_points_disabled() {
        assert!(!crash_point_enabled("nonexistent_point_xyz"));
        assert!(!fail_point_enabled("nonexistent_point_xyz"));
    }

    #[test]
    fn test_maybe_crash_noop_when_disabled() {
        maybe_crash("nonexistent_point_xyz");
    }

    #[test]
    fn test_point_names_unique() {
        let all = points::all();
        let mut seen = std::collections::HashSet::new();
        for name in all {
            assert!(seen.insert(*name), "duplicate point: {}", name);
        }
    }
}
