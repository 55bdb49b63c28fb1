//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate is the **heart** of Stockbook. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Stockbook Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Screens (external)                    │   │
//! │  │   Items ──► Categories ──► Customers ──► Invoice ──► Dash   │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │                                     │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │             ★ stockbook-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────────┐       │   │
//! │  │   │  types  │ │ invoice │ │  money  │ │ validation │       │   │
//! │  │   │  Item   │ │ totals  │ │ display │ │   rules    │       │   │
//! │  │   │ Invoice │ │ VAT 15% │ │  $X.XX  │ │   checks   │       │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └────────────┘       │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │                                     │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │                stockbook-db (Database Layer)                │   │
//! │  │          SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Item, Customer, Invoice, InvoiceLine)
//! - [`invoice`] - Invoice math: extended amounts, subtotal, VAT, total
//! - [`money`] - Display formatting for currency values
//! - [`error`] - Domain error types
//! - [`validation`] - Form-level validation rules for callers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::invoice::{InvoiceTotals, LineInput};
//!
//! let lines = vec![LineInput { item_id: 1, quantity: 2, unit_price: 10.0 }];
//! let totals = InvoiceTotals::compute(&lines);
//!
//! assert_eq!(totals.subtotal, 20.0);
//! assert_eq!(totals.vat_amount, 3.0); // 15% VAT
//! assert_eq!(totals.total_amount, 23.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockbook_core::Item` instead of
// `use stockbook_core::types::Item`

pub use error::{CoreError, ValidationError};
pub use invoice::{format_invoice_number, InvoiceTotals, LineInput};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// VAT rate applied to every invoice subtotal (15%).
///
/// ## Why a constant?
/// The app runs in a single jurisdiction with one fixed rate. If tax rules
/// ever become configurable this becomes a field on the store config.
pub const VAT_RATE: f64 = 0.15;

/// Inclusive upper bound of the "low stock" band (1..=10).
///
/// ## Business Reason
/// Screens highlight items running low so the owner can restock. Items at
/// zero are "out of stock", not "low", so the band starts at 1.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Default categories seeded on first initialization.
///
/// Seeding is insert-if-absent keyed on name: repeated startups never
/// duplicate these, and user edits to same-named categories are never
/// overwritten.
pub const DEFAULT_CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books", "Home & Garden"];
