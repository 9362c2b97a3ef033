//! Audit log
//!
//! Services append an [`AuditEntry`] after every successful change: what
//! was recorded, edited or deleted, goal deposits with the resulting
//! balance, category renames with how many transactions moved, and
//! restores from an export. Entries are stored as JSON lines.

mod entry;
mod event;
mod logger;

pub use entry::AuditEntry;
pub use event::{AuditEvent, ChangeSet, FieldChange};
pub use logger::AuditLogger;
