//! Structured audit logging
//!
//! The manager reports successful writes through the [`Logger`] trait rather
//! than calling `tracing` directly, so the sink can be swapped out. The
//! default [`TracingLogger`] forwards every record to `tracing` under the
//! `secretctl::audit` target.

use std::fmt;

/// Sink for key/value log records
pub trait Logger: Send + Sync {
    /// Record an informational message with its attributes
    fn info(&self, message: &str, values: &[(&str, &str)]);
}

/// Logger that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str, values: &[(&str, &str)]) {
        tracing::info!(target: "secretctl::audit", values = %KeyValues(values), "{}", message);
    }
}

/// Renders attributes as `key=value` pairs separated by spaces
struct KeyValues<'a>(&'a [(&'a str, &'a str)]);

impl fmt::Display for KeyValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
