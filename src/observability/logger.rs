//! Structured JSON logger for store and lifecycle events
//!
//! - One JSON object per line
//! - `event` first, `severity` second, remaining keys sorted
//! - INFO/WARN to stdout, ERROR/FATAL to stderr
//! - Lines below `CHIRPY_LOG_LEVEL` (default INFO) are dropped
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info = 0,
    Warn = 1,
    Error = 2,
    /// The process is about to exit
    Fatal = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parses a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Some(Severity::Info),
            "WARN" | "WARNING" => Some(Severity::Warn),
            "ERROR" => Some(Severity::Error),
            "FATAL" => Some(Severity::Fatal),
            _ => None,
        }
    }

    fn goes_to_stderr(&self) -> bool {
        *self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static MIN_SEVERITY: OnceLock<Severity> = OnceLock::new();

fn min_severity() -> Severity {
    *MIN_SEVERITY.get_or_init(|| {
        std::env::var("CHIRPY_LOG_LEVEL")
            .ok()
            .and_then(|v| Severity::parse(&v))
            .unwrap_or(Severity::Info)
    })
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Log an event, routing by severity.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity < min_severity() {
            return;
        }
        let line = render(severity, event, fields);
        // Logging never fails the caller
        if severity.goes_to_stderr() {
            let _ = io::stderr().lock().write_all(line.as_bytes());
        } else {
            let mut out = io::stdout().lock();
            let _ = out.write_all(line.as_bytes());
            let _ = out.flush();
        }
    }
}

/// Renders one log line, newline-terminated.
pub(crate) fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);
    output.push_str("{\"event\":");
    push_json_str(&mut output, event);
    output.push_str(",\"severity\":");
    push_json_str(&mut output, severity.as_str());

    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted {
        output.push(',');
        push_json_str(&mut output, key);
        output.push(':');
        push_json_str(&mut output, value);
    }

    output.push_str("}\n");
    output
}

fn push_json_str(output: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => output.push_str(&quoted),
        Err(_) => output.push_str("\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("warn"), Some(Severity::Warn));
        assert_eq!(Severity::parse(" Error "), Some(Severity::Error));
        assert_eq!(Severity::parse("verbose"), None);
    }

    #[test]
    fn test_render_is_json() {
        let line = render(Severity::Info, "CHIRP_CREATED", &[("id", "4")]);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "CHIRP_CREATED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["id"], "4");
    }

    #[test]
    fn test_render_sorts_fields() {
        let a = render(Severity::Info, "E", &[("zebra", "1"), ("apple", "2")]);
        let b = render(Severity::Info, "E", &[("apple", "2"), ("zebra", "1")]);

        assert_eq!(a, b);
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
        assert!(a.find("\"event\"").unwrap() < a.find("\"severity\"").unwrap());
    }

    #[test]
    fn test_render_escapes_values() {
        let line = render(Severity::Warn, "E", &[("body", "say \"hi\"\nbye")]);

        assert_eq!(line.matches('\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["body"], "say \"hi\"\nbye");
    }

    #[test]
    fn test_error_routes_to_stderr() {
        assert!(Severity::Error.goes_to_stderr());
        assert!(Severity::Fatal.goes_to_stderr());
        assert!(!Severity::Warn.goes_to_stderr());
    }
}
