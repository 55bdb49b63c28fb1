//! # Money Display Formatting
//!
//! Helpers for rendering monetary values.
//!
//! ## Storage vs. Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Stored:    f64 (IEEE-754 double), full precision                   │
//! │  Displayed: "$X.XX" — dollar prefix, two decimal places             │
//! │                                                                     │
//! │  Formatting happens ONLY at the display boundary. Nothing is ever   │
//! │  stored pre-formatted, and rounding never feeds back into totals.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount for display: `$` prefix, two decimals.
///
/// ## Example
/// ```rust
/// use stockbook_core::money::format_amount;
///
/// assert_eq!(format_amount(10.0), "$10.00");
/// assert_eq!(format_amount(3.456), "$3.46");
/// assert_eq!(format_amount(-5.5), "-$5.50");
/// ```
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Rounds an amount to cents (two decimal places).
///
/// Display-side helper only; persisted totals keep full double precision.
#[inline]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(10.0), "$10.00");
        assert_eq!(format_amount(1234.5), "$1234.50");
        assert_eq!(format_amount(3.456), "$3.46");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_amount(-5.5), "-$5.50");
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(3.456), 3.46);
        assert_eq!(round_cents(3.454), 3.45);
        assert_eq!(round_cents(10.0), 10.0);
    }
}
