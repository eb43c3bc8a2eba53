//! Global audit logger singleton.

use std::sync::OnceLock;

use super::entry::{AuditEntry, Severity};
use super::logger::{AuditConfig, AuditLogger};

static GLOBAL_LOGGER: OnceLock<AuditLogger> = OnceLock::new();

/// Initialize the global audit logger.
pub fn init_global_logger(config: AuditConfig) -> std::io::Result<()> {
    let logger = AuditLogger::new(config)?;
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::AlreadyExists, "Logger already initialized"))
}

/// Initialize a stderr-only global logger (for CLI use).
pub fn init_stderr_logger(min_severity: Severity) {
    let _ = GLOBAL_LOGGER.set(AuditLogger::stderr_only(min_severity));
}

/// Get a reference to the global logger (if initialized).
pub fn global_logger() -> Option<&'static AuditLogger> {
    GLOBAL_LOGGER.get()
}

/// Log to the global logger (no-op if not initialized).
pub fn audit(entry: AuditEntry) {
    if let Some(logger) = global_logger() {
        let _ = logger.log(entry);
    }
}

/// Whether the global logger would keep an entry of `severity`.
///
/// Lets hot paths skip building entries nobody will see.
pub fn enabled(severity: Severity) -> bool {
    global_logger().is_some_and(|logger| logger.enabled(severity))
}
