//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐             │
//! │  │   Category   │   │     Item     │   │   Customer   │             │
//! │  │ ──────────── │   │ ──────────── │   │ ──────────── │             │
//! │  │ id (i64)     │◄──│ category_id  │   │ id (i64)     │             │
//! │  │ name UNIQUE  │   │ price (f64)  │   │ phone        │             │
//! │  └──────────────┘   │ quantity     │   └──────┬───────┘             │
//! │                     └──────┬───────┘          │                     │
//! │                            │                  │                     │
//! │  ┌──────────────┐   ┌──────┴───────┐   ┌──────┴───────┐             │
//! │  │ InvoiceLine  │──►│   item_id    │   │   Invoice    │             │
//! │  │ ──────────── │   └──────────────┘   │ ──────────── │             │
//! │  │ invoice_id ──┼──────────────────────│ INV-NNNNNN   │             │
//! │  │ ext_amount   │                      │ subtotal/vat │             │
//! │  └──────────────┘                      └──────────────┘             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries a store-assigned `id: i64`, monotonically increasing
//! and unique within its table. Invoices additionally carry the human-facing
//! `invoice_number` business identifier.
//!
//! ## Entity vs. Draft Split
//! Each entity has a paired `New*` draft struct holding caller-supplied
//! fields only (no id, no created_at). Drafts are what the UI sends on
//! create/update; entities are what the store returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Referenced by [`Item::category_id`]. Names are unique across the table;
/// the default set (Electronics, Clothing, Books, Home & Garden) is seeded
/// at first initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name. Unique across live categories.
    pub name: String,

    /// Optional free-text description. `None` when absent, never `""`.
    pub description: Option<String>,

    /// When the category was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or replacing a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// Item
// =============================================================================

/// An inventory item.
///
/// `quantity` is the only field the store ever mutates implicitly: invoice
/// creation decrements it per sold line, floored at zero. It is never
/// incremented automatically (no restock-on-delete-invoice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name shown in catalog screens and on invoice lines.
    pub name: String,

    /// Owning category. May dangle after a category delete under the
    /// orphaning delete policy.
    pub category_id: i64,

    /// Current catalog price. Positive. Invoice lines snapshot their own
    /// unit price, so later edits here never rewrite history.
    pub price: f64,

    /// Units in stock. Never negative.
    pub quantity: i64,

    /// Optional free-text description.
    pub description: Option<String>,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Whether the item sits in the low-stock band (1..=10 inclusive).
    ///
    /// UI-level threshold for the stock filter; the store never enforces it.
    /// Zero stock is "out", not "low".
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity >= 1 && self.quantity <= LOW_STOCK_THRESHOLD
    }

    /// Whether the item is out of stock.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

/// Caller-supplied fields for creating or replacing an item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub category_id: i64,
    pub price: f64,
    pub quantity: i64,
    pub description: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer that invoices are billed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Store-assigned identifier.
    pub id: i64,

    /// Full name. Required.
    pub name: String,

    /// Contact phone. Required.
    pub phone: String,

    /// Optional email address. `None` when absent, never `""`.
    pub email: Option<String>,

    /// When the customer was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or replacing a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

// =============================================================================
// Invoice
// =============================================================================

/// A sale invoice.
///
/// ## Denormalized Totals
/// `subtotal`, `vat_amount`, and `total_amount` are computed once at save
/// time from the invoice's lines and persisted. Reads return the stored
/// values as-is; they are never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    /// Store-assigned identifier.
    pub id: i64,

    /// Business identifier, format `INV-NNNNNN`, zero-padded to six digits.
    /// Strictly sequential by creation order; never reused after deletion.
    pub invoice_number: String,

    /// Billed customer.
    pub customer_id: i64,

    /// The sale date chosen by the user (distinct from `created_at`).
    #[ts(as = "String")]
    pub invoice_date: DateTime<Utc>,

    /// Sum of line extended amounts.
    pub subtotal: f64,

    /// `subtotal * 0.15`.
    pub vat_amount: f64,

    /// `subtotal + vat_amount`.
    pub total_amount: f64,

    /// When the invoice row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A line item of an invoice.
///
/// `unit_price` is a snapshot taken at sale time and is independent of later
/// changes to the item's catalog price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InvoiceLine {
    /// Store-assigned identifier.
    pub id: i64,

    /// Owning invoice.
    pub invoice_id: i64,

    /// Sold item. May dangle after an item delete under the orphaning
    /// delete policy.
    pub item_id: i64,

    /// Units sold. Positive.
    pub quantity: i64,

    /// Price per unit at sale time.
    pub unit_price: f64,

    /// `quantity * unit_price`, recomputed by the store on every save.
    pub extended_amount: f64,
}

/// Caller-supplied invoice contents: who, when, and what was sold.
///
/// Totals and the invoice number are NOT part of the draft. The store
/// derives both itself so callers can never persist inconsistent values.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDraft {
    pub customer_id: i64,
    #[ts(as = "String")]
    pub invoice_date: DateTime<Utc>,
    pub lines: Vec<crate::invoice::LineInput>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Live row counts shown on the dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardCounts {
    pub items: i64,
    pub invoices: i64,
    pub customers: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item_with_quantity(quantity: i64) -> Item {
        Item {
            id: 1,
            name: "Test Item".to_string(),
            category_id: 1,
            price: 9.99,
            quantity,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_band_is_one_to_ten_inclusive() {
        assert!(!item_with_quantity(0).is_low_stock());
        assert!(item_with_quantity(1).is_low_stock());
        assert!(item_with_quantity(10).is_low_stock());
        assert!(!item_with_quantity(11).is_low_stock());
    }

    #[test]
    fn test_out_of_stock() {
        assert!(item_with_quantity(0).is_out_of_stock());
        assert!(!item_with_quantity(1).is_out_of_stock());
    }
}
