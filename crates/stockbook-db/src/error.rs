//! # Store Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← Adds context and categorization         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller (UI layer) decides: inline notice, blocking dialog, retry   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never retries. Every failure propagates to the caller as a
//! rejected operation; user-visible messaging is the UI's job.

use thiserror::Error;

/// Store operation errors.
///
/// These wrap sqlx errors and provide additional context for debugging and
/// user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The schema has not been set up yet.
    ///
    /// ## When This Occurs
    /// - An operation ran against a store opened with migrations disabled
    ///   and no prior initialization ("no such table")
    #[error("store is not initialized: {0}")]
    Uninitialized(String),

    /// Entity not found in the database.
    ///
    /// ## When This Occurs
    /// - Update/delete matched zero rows
    /// - ID doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate category name
    /// - Duplicate invoice number
    #[error("duplicate value for {field}")]
    UniqueViolation { field: String },

    /// Row is still referenced by other rows.
    ///
    /// Only raised under [`DeletePolicy::Restrict`]; the default orphaning
    /// policy deletes unconditionally.
    ///
    /// [`DeletePolicy::Restrict`]: crate::pool::DeletePolicy::Restrict
    #[error("{entity} {id} is still referenced and cannot be deleted")]
    StillReferenced { entity: String, id: i64 },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue, disk full
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    ///
    /// The catch-all for storage-engine errors the store does not translate
    /// into a domain-specific kind; callers treat it as "save failed".
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// Creates a StillReferenced error.
    pub fn still_referenced(entity: impl Into<String>, id: i64) -> Self {
        StoreError::StillReferenced {
            entity: entity.into(),
            id,
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database ("no such table")  → StoreError::Uninitialized
/// sqlx::Error::Database (UNIQUE)           → StoreError::UniqueViolation
/// sqlx::Error::PoolTimedOut                → StoreError::PoolExhausted
/// Other                                    → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    StoreError::UniqueViolation { field }
                } else if msg.contains("no such table") {
                    StoreError::Uninitialized(msg.to_string())
                } else {
                    StoreError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
