//! # Store Lifecycle and Connection Pool
//!
//! Explicitly constructed, dependency-injected store handle with an
//! `open`/`close` lifecycle. There is no global singleton: each caller (the
//! app, or an individual test) owns its own [`Store`] against its own
//! database file or an isolated in-memory database.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  App startup                                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreConfig::new(path) ← pool settings, delete policy              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Store::open(config).await                                          │
//! │       ├── create pool (WAL, NORMAL sync, create-if-missing)         │
//! │       ├── run embedded migrations (idempotent)                      │
//! │       └── seed default categories (insert-if-absent; failures       │
//! │           logged and swallowed, never block startup)                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  store.categories() / items() / customers() / invoices()            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  store.close().await  (app shutdown)                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for better concurrent
//! read performance and crash recovery.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::invoice::InvoiceRepository;
use crate::repository::item::ItemRepository;
use stockbook_core::DashboardCounts;

// =============================================================================
// Delete Policy
// =============================================================================

/// What happens when deleting a row that other rows still reference
/// (Category ← Item, Item ← InvoiceLine, Customer ← Invoice).
///
/// Orphaning is the default; `Restrict` is the opt-in stricter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Unconditional delete; referencing rows keep their dangling id.
    #[default]
    Orphan,
    /// Refuse the delete with [`StoreError::StillReferenced`] while any
    /// reference exists.
    Restrict,
}

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/stockbook.db")
///     .max_connections(5)
///     .delete_policy(DeletePolicy::Restrict);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-user app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on open.
    /// Default: true
    pub run_migrations: bool,

    /// Whether to seed the default categories on open.
    /// Default: true
    pub seed_defaults: bool,

    /// Policy for deleting rows that are still referenced.
    /// Default: Orphan
    pub delete_policy: DeletePolicy,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    ///
    /// The database file is created on first open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            seed_defaults: true,
            delete_policy: DeletePolicy::Orphan,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether to seed default categories on open.
    pub fn seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    /// Sets the delete policy for referenced rows.
    pub fn delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = Store::open(StoreConfig::in_memory()).await?;
    /// // Fully isolated; dropped with the last pool handle
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            // In-memory databases are per-connection; one connection keeps
            // every operation on the same database.
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            seed_defaults: true,
            delete_policy: DeletePolicy::Orphan,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cheap to clone (the pool is internally reference-counted); hand clones to
/// whatever layer dispatches UI calls.
#[derive(Debug, Clone)]
pub struct Store {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Delete policy applied by the repositories.
    delete_policy: DeletePolicy,
}

impl Store {
    /// Opens the store: creates the pool, runs migrations, seeds defaults.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite (WAL journal, NORMAL synchronous)
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    /// 5. Seeds default categories (if enabled); seed failures are logged
    ///    and swallowed so they never block startup
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening inventory store"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Store pool created"
        );

        let store = Store {
            pool,
            delete_policy: config.delete_policy,
        };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        if config.seed_defaults {
            // Must not block startup: log and continue on failure.
            if let Err(e) = store.categories().seed_defaults().await {
                warn!(error = %e, "Default category seeding failed");
            }
        }

        Ok(store)
    }

    /// Runs database migrations.
    ///
    /// Automatically called by `open()` unless disabled in the config.
    /// Idempotent: safe to run multiple times.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by repositories. Prefer repository
    /// methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone(), self.delete_policy)
    }

    /// Returns the item repository.
    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone(), self.delete_policy)
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone(), self.delete_policy)
    }

    /// Returns the invoice repository.
    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.pool.clone())
    }

    /// Returns the live counts shown on the dashboard screen.
    ///
    /// Three plain row-count queries, no caching: every dashboard reload
    /// re-queries the store.
    pub async fn dashboard_counts(&self) -> StoreResult<DashboardCounts> {
        let items = self.items().count().await?;
        let invoices = self.invoices().count().await?;
        let customers = self.customers().count().await?;

        Ok(DashboardCounts {
            items,
            invoices,
            customers,
        })
    }

    /// Closes the store's connection pool.
    ///
    /// After calling close, all repository operations fail.
    pub async fn close(&self) {
        info!("Closing inventory store");
        self.pool.close().await;
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[tokio::test]
    async fn test_in_memory_store_opens() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();

        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .delete_policy(DeletePolicy::Restrict);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
    }

    #[tokio::test]
    async fn test_operations_fail_fast_without_initialization() {
        let config = StoreConfig::in_memory()
            .run_migrations(false)
            .seed_defaults(false);
        let store = Store::open(config).await.unwrap();

        let err = store.categories().list().await.unwrap_err();
        assert!(matches!(err, StoreError::Uninitialized(_)));
    }

    #[tokio::test]
    async fn test_dashboard_counts_start_at_zero() {
        let store = Store::open(StoreConfig::in_memory().seed_defaults(false))
            .await
            .unwrap();

        let counts = store.dashboard_counts().await.unwrap();
        assert_eq!(counts.items, 0);
        assert_eq!(counts.invoices, 0);
        assert_eq!(counts.customers, 0);
    }
}
