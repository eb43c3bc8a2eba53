//! Audit logger implementation.
//!
//! Writes one line per entry to an optional file and optionally to stderr,
//! as structured text or JSON Lines, dropping entries below a minimum
//! severity. Stdout is left alone so it stays usable for program output.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::entry::{AuditEntry, Severity};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the audit logger.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Audit log file; `None` for no file.
    pub log_path: Option<PathBuf>,
    /// Minimum severity to log.
    pub min_severity: Severity,
    /// Whether to also write to stderr.
    pub echo_stderr: bool,
    pub format: AuditFormat,
}

/// Output format for audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditFormat {
    /// Structured text lines (default).
    Text,
    /// JSON Lines format.
    JsonLines,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            min_severity: Severity::Info,
            echo_stderr: false,
            format: AuditFormat::Text,
        }
    }
}

// =============================================================================
// Audit Logger
// =============================================================================

/// Thread-safe audit logger.
pub struct AuditLogger {
    config: AuditConfig,
    writer: Mutex<Option<BufWriter<File>>>,
    sequence: AtomicU64,
}

impl AuditLogger {
    /// Create a new audit logger, opening the log file in append mode.
    pub fn new(config: AuditConfig) -> std::io::Result<Self> {
        let writer = match &config.log_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(BufWriter::new(file))
            }
            None => None,
        };

        Ok(Self {
            config,
            writer: Mutex::new(writer),
            sequence: AtomicU64::new(0),
        })
    }

    /// Create a logger that only echoes to stderr (no file).
    pub fn stderr_only(min_severity: Severity) -> Self {
        Self {
            config: AuditConfig {
                echo_stderr: true,
                min_severity,
                ..Default::default()
            },
            writer: Mutex::new(None),
            sequence: AtomicU64::new(0),
        }
    }

    /// Would an entry of this severity be written?
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.config.min_severity
    }

    /// Log an audit entry.
    pub fn log(&self, entry: AuditEntry) -> std::io::Result<()> {
        if !self.enabled(entry.severity) {
            return Ok(());
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let line = self.render(seq, &entry);

        if let Ok(mut guard) = self.writer.lock() {
            if let Some(ref mut w) = *guard {
                w.write_all(line.as_bytes())?;
                w.flush()?;
            }
        }

        if self.config.echo_stderr {
            eprint!("{}", line);
        }

        Ok(())
    }

    fn render(&self, seq: u64, entry: &AuditEntry) -> String {
        match self.config.format {
            AuditFormat::Text => format!("{:08} | {}\n", seq, entry.format_line()),
            AuditFormat::JsonLines => format!("{}\n", entry.to_json()),
        }
    }

    /// Flush the log buffer.
    pub fn flush(&self) -> std::io::Result<()> {
        if let Ok(mut guard) = self.writer.lock() {
            if let Some(ref mut w) = *guard {
                w.flush()?;
            }
        }
        Ok(())
    }

    /// Number of entries written so far.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }
}

// =============================================================================
// Tests
// =============================================================================
