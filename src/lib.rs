//! # Rollbook - Student Record Manager
//!
//! SQLite-backed roster of student records behind a small typed library,
//! driven by an interactive terminal shell.
//!
//! Rollbook provides:
//! - Connection bootstrap over an ordered list of candidate store locations
//! - Idempotent schema initialization on every startup
//! - CRUD operations with field-presence-driven partial updates
//! - A pure result formatter for fixed-format terminal display

pub mod config;
pub mod format;
pub mod shell;
pub mod store;
pub mod student;
pub mod ui;

// Re-exports for convenient access
pub use format::{StudentRow, format_rows, roster_table};
pub use store::{Candidate, StudentStore, connect};
pub use student::{Student, StudentUpdate};

/// Result type alias for Rollbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Rollbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No candidate store location could be opened; carries the last cause.
    #[error("unable to open a student database: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The students table could not be created.
    #[error("failed to prepare the students table: {0}")]
    Schema(#[source] rusqlite::Error),

    /// A record failed validation at the store boundary; no state changed.
    #[error("invalid student record: {0}")]
    Validation(String),

    /// An operation against the live store failed.
    #[error("student store operation failed: {0}")]
    Store(#[from] rusqlite::Error),

    /// An operation was attempted after `close()`.
    #[error("the database connection is closed")]
    Closed,
}
