//! brewlog-mg (Migration) - Data migration and normalization tooling
//!
//! Drives full-table field migrations (legacy free-text values to the
//! canonical enums) and one-off schema evolution scripts against a
//! brewlog database. Exposed as a library so integration tests can drive
//! the passes directly.

pub mod orchestrator;
pub mod report;
pub mod schema;

/// Fixed refusal shared by every script's rollback action.
///
/// No change log or reverse mapping is retained, so the only recovery
/// path is the backup snapshot taken before migration.
pub const ROLLBACK_UNSUPPORTED: &str = "Rollback is not supported. \
Restore the database from the backup snapshot taken before running this migration.";
