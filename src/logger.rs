//! Optional logging sink for failures the client absorbs instead of returning.

use std::fmt;

use tracing::{debug, error, info, warn};

/// Severity levels accepted by a [`Logger`], highest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Alert => "alert",
            Severity::Emergency => "emergency",
        };
        f.write_str(label)
    }
}

/// A sink accepting a message, a severity and structured key/value context.
pub trait Logger: Send + Sync {
    fn log(&self, severity: Severity, message: &str, context: &[(&str, String)]);

    fn critical(&self, message: &str, context: &[(&str, String)]) {
        self.log(Severity::Critical, message, context);
    }
}

/// Forwards entries to `tracing`, mapping severities onto tracing levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, severity: Severity, message: &str, context: &[(&str, String)]) {
        let context = context
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ");

        match severity {
            Severity::Debug => debug!(%severity, %context, "{}", message),
            Severity::Info | Severity::Notice => info!(%severity, %context, "{}", message),
            Severity::Warning => warn!(%severity, %context, "{}", message),
            _ => error!(%severity, %context, "{}", message),
        }
    }
}
