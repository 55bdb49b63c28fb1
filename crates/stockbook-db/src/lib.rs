//! # stockbook-db: Database Layer for Stockbook
//!
//! This crate is the Inventory Store. It is the sole gateway to persisted
//! state: UI screens call it for every data need, and there is no caching
//! layer in between.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Data Flow                           │
//! │                                                                     │
//! │  UI screen (e.g. invoice form)                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 stockbook-db (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   ┌────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Store    │   │  Repositories  │   │  Migrations  │   │   │
//! │  │   │ (pool.rs)  │   │ category.rs    │   │  (embedded)  │   │   │
//! │  │   │            │   │ item.rs        │   │              │   │   │
//! │  │   │ SqlitePool │◄──│ customer.rs    │   │ 001_init.sql │   │   │
//! │  │   │ lifecycle  │   │ invoice.rs     │   │              │   │   │
//! │  │   └────────────┘   └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │              SQLite database file (single, local)           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle, configuration, open/close lifecycle
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations per entity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("path/to/stockbook.db")).await?;
//!
//! let items = store.items().list().await?;
//! let counts = store.dashboard_counts().await?;
//!
//! store.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{DeletePolicy, Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::item::ItemRepository;
