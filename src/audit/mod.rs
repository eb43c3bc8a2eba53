//! Structured audit logging.
//!
//! Every entry follows a WHO/WHAT/WHEN/OUTCOME shape: an action on a typed
//! entity, with a category, severity, outcome, optional duration and free-form
//! metadata. Entries are written by an `AuditLogger` as text lines or JSON
//! Lines; library code logs through the process-global logger, which is a
//! no-op until a front-end initializes it.
//!
//! # Modules
//!
//! - `entry`: AuditEntry, Severity, Outcome, ActionCategory
//! - `logger`: file/stderr logger with severity filtering
//! - `global`: process-wide singleton
//!
//! # Events
//!
//! | Action   | Category | Severity    | When                          |
//! |----------|----------|-------------|-------------------------------|
//! | `PARSE`  | Parse    | Info/Error  | program text accepted/rejected|
//! | `BIND`   | Bind     | Info        | run created                   |
//! | `STEP`   | Execute  | Debug       | each executed instruction     |
//! | `FINISH` | Execute  | Info        | run terminated normally       |
//! | `FAIL`   | Execute  | Error       | run stopped on an error       |

mod entry;
mod logger;
mod global;

pub use entry::{AuditEntry, Severity, Outcome, ActionCategory};
pub use logger::{AuditLogger, AuditConfig, AuditFormat};
pub use global::{init_global_logger, init_stderr_logger, global_logger, audit, enabled};
