//! # Invoice Math
//!
//! Pure computation of invoice totals and invoice-number formatting.
//!
//! ## Where Totals Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Save Workflow                           │
//! │                                                                     │
//! │  Caller supplies lines: (item_id, quantity, unit_price)             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  extended_amount = quantity × unit_price   (per line, recomputed)   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  subtotal   = Σ extended_amount                                     │
//! │  vat_amount = subtotal × 0.15                                       │
//! │  total      = subtotal + vat_amount                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Persisted once on the invoice row, never recomputed on read        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Caller-supplied totals are never trusted: the store calls
//! [`InvoiceTotals::compute`] on every create and update.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::VAT_RATE;

// =============================================================================
// Line Input
// =============================================================================

/// One line of an invoice draft as entered by the user.
///
/// `unit_price` is editable by the user and is not forced to equal the
/// item's current catalog price; it becomes the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineInput {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineInput {
    /// The line's extended amount: `quantity * unit_price`.
    #[inline]
    pub fn extended_amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// Derived monetary totals of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    /// Sum of all line extended amounts.
    pub subtotal: f64,

    /// `subtotal * 0.15`.
    pub vat_amount: f64,

    /// `subtotal + vat_amount`.
    pub total_amount: f64,
}

impl InvoiceTotals {
    /// Computes totals from draft lines.
    ///
    /// ## Example
    /// ```rust
    /// use stockbook_core::invoice::{InvoiceTotals, LineInput};
    ///
    /// let lines = vec![
    ///     LineInput { item_id: 1, quantity: 3, unit_price: 10.0 },
    ///     LineInput { item_id: 2, quantity: 1, unit_price: 5.5 },
    /// ];
    /// let totals = InvoiceTotals::compute(&lines);
    ///
    /// assert_eq!(totals.subtotal, 35.5);
    /// assert_eq!(totals.total_amount, totals.subtotal + totals.vat_amount);
    /// ```
    pub fn compute(lines: &[LineInput]) -> Self {
        let subtotal: f64 = lines.iter().map(LineInput::extended_amount).sum();
        let vat_amount = subtotal * VAT_RATE;

        InvoiceTotals {
            subtotal,
            vat_amount,
            total_amount: subtotal + vat_amount,
        }
    }

    /// Totals of an empty invoice.
    pub const fn zero() -> Self {
        InvoiceTotals {
            subtotal: 0.0,
            vat_amount: 0.0,
            total_amount: 0.0,
        }
    }
}

// =============================================================================
// Invoice Number
// =============================================================================

/// Formats a sequence value as an invoice number: `INV-NNNNNN`.
///
/// ## Format
/// - `INV-` prefix
/// - Sequence value zero-padded to 6 digits
///
/// ## Example
/// ```rust
/// use stockbook_core::invoice::format_invoice_number;
///
/// assert_eq!(format_invoice_number(1), "INV-000001");
/// assert_eq!(format_invoice_number(42), "INV-000042");
/// ```
///
/// Values above 999,999 widen past six digits rather than wrap.
pub fn format_invoice_number(sequence: i64) -> String {
    format!("INV-{:06}", sequence)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VAT_RATE;

    fn line(quantity: i64, unit_price: f64) -> LineInput {
        LineInput {
            item_id: 1,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_extended_amount_is_quantity_times_unit_price() {
        assert_eq!(line(3, 10.0).extended_amount(), 30.0);
        assert_eq!(line(1, 0.5).extended_amount(), 0.5);
        assert_eq!(line(7, 2.25).extended_amount(), 15.75);
    }

    #[test]
    fn test_totals_for_single_line() {
        let totals = InvoiceTotals::compute(&[line(2, 100.0)]);

        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.vat_amount, 30.0);
        assert_eq!(totals.total_amount, 230.0);
    }

    #[test]
    fn test_totals_sum_multiple_lines() {
        let totals = InvoiceTotals::compute(&[line(3, 10.0), line(1, 5.5), line(2, 0.25)]);

        assert_eq!(totals.subtotal, 36.0);
        assert!((totals.vat_amount - 36.0 * VAT_RATE).abs() < 1e-9);
        assert!((totals.total_amount - (totals.subtotal + totals.vat_amount)).abs() < 1e-9);
    }

    #[test]
    fn test_totals_of_no_lines_are_zero() {
        let totals = InvoiceTotals::compute(&[]);
        assert_eq!(totals, InvoiceTotals::zero());
    }

    #[test]
    fn test_vat_is_fifteen_percent_within_tolerance() {
        // Prices that don't divide evenly in binary floating point.
        let totals = InvoiceTotals::compute(&[line(3, 19.99), line(7, 0.1)]);
        assert!((totals.vat_amount - totals.subtotal * 0.15).abs() < 1e-9);
        assert!((totals.total_amount - totals.subtotal * 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_invoice_number_zero_padding() {
        assert_eq!(format_invoice_number(1), "INV-000001");
        assert_eq!(format_invoice_number(42), "INV-000042");
        assert_eq!(format_invoice_number(999999), "INV-999999");
        assert_eq!(format_invoice_number(1000000), "INV-1000000");
    }
}
