//! Audit entry types and structures.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

// =============================================================================
// Core Types
// =============================================================================

/// Severity level for audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Severity {
    /// Per-instruction tracing.
    Debug = 0,
    /// Informational message (normal operation).
    Info = 1,
    /// Warning (potential issue, operation continued).
    Warning = 2,
    /// Error (operation failed).
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionCategory {
    /// Turning source text into a program.
    Parse,
    /// Attaching an inbox and floor to a program.
    Bind,
    /// Running instructions.
    Execute,
    /// Everything else.
    System,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Parse => "PARSE",
            ActionCategory::Bind => "BIND",
            ActionCategory::Execute => "EXECUTE",
            ActionCategory::System => "SYSTEM",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Audit Entry
// =============================================================================

/// An immutable audit log entry.
///
/// Captures WHO did WHAT to WHICH entity, WHEN, and with what OUTCOME.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// Unique identifier for this entry.
    pub id: u64,
    /// UTC timestamp (milliseconds since epoch).
    #[serde(skip)]
    pub timestamp_ms: u64,
    /// Action performed (e.g., "PARSE", "STEP", "FINISH").
    pub action: String,
    pub category: ActionCategory,
    /// Type of entity involved (e.g., "Program", "Run").
    pub entity_type: String,
    /// Identifier of the entity (e.g., file name, instruction index).
    pub entity_id: String,
    pub description: String,
    pub severity: Severity,
    pub outcome: Outcome,
    /// Duration in microseconds (if applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,
    /// Additional structured data.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl AuditEntry {
    /// Create a new audit entry with required fields.
    pub fn new(
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            id: COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst),
            timestamp_ms,
            action: action.into(),
            category: ActionCategory::System,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            description: description.into(),
            severity: Severity::Info,
            outcome: Outcome::Success,
            duration_us: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: ActionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Set the duration in microseconds.
    pub fn with_duration_us(mut self, us: u64) -> Self {
        self.duration_us = Some(us);
        self
    }

    /// Add metadata key-value pair.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Format timestamp as ISO 8601.
    pub fn timestamp_iso(&self) -> String {
        let secs = self.timestamp_ms / 1000;
        let ms = self.timestamp_ms % 1000;

        let days_since_epoch = secs / 86400;
        let time_of_day = secs % 86400;

        let hours = time_of_day / 3600;
        let minutes = (time_of_day % 3600) / 60;
        let seconds = time_of_day % 60;

        let mut year = 1970u32;
        let mut remaining_days = days_since_epoch;
        loop {
            let days_in_year = if is_leap(year) { 366 } else { 365 };
            if remaining_days < days_in_year {
                break;
            }
            remaining_days -= days_in_year;
            year += 1;
        }

        let feb = if is_leap(year) { 29 } else { 28 };
        let days_in_months: [u64; 12] = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

        let mut month = 1u32;
        for days in days_in_months.iter() {
            if remaining_days < *days {
                break;
            }
            remaining_days -= *days;
            month += 1;
        }

        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year, month, remaining_days + 1, hours, minutes, seconds, ms
        )
    }

    /// Format as a single structured log line.
    ///
    /// Format: `TIMESTAMP | SEVERITY | CATEGORY | ACTION | ENTITY | OUTCOME | DESCRIPTION [metadata]`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{} | {:5} | {:7} | {:8} | {}:{} | {:7} | {}",
            self.timestamp_iso(),
            self.severity.as_str(),
            self.category.as_str(),
            self.action,
            self.entity_type,
            self.entity_id,
            self.outcome.as_str(),
            self.description,
        );

        if let Some(us) = self.duration_us {
            if us >= 1_000_000 {
                line.push_str(&format!(" [{:.2}s]", us as f64 / 1_000_000.0));
            } else if us >= 1_000 {
                line.push_str(&format!(" [{:.2}ms]", us as f64 / 1_000.0));
            } else {
                line.push_str(&format!(" [{}us]", us));
            }
        }

        if !self.metadata.is_empty() {
            let meta: Vec<String> = self
                .metadata
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            line.push_str(&format!(" {{{}}}", meta.join(", ")));
        }

        line
    }

    /// Serialize to a single JSON object.
    pub fn to_json(&self) -> String {
        let mut value = match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => return format!(r#"{{"id":{},"error":"{}"}}"#, self.id, e),
        };
        if let Some(obj) = value.as_object_mut() {
            obj.insert("timestamp".to_string(), self.timestamp_iso().into());
        }
        value.to_string()
    }
}

fn is_leap(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

// =============================================================================
// Tests
// =============================================================================
