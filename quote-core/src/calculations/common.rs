//! Common utility functions for estimate calculations.
//!
//! This module provides shared functionality used by the estimate engine and
//! the currency formatter, including rounding and clamping.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to a whole currency unit using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero, which matches
/// conventional rounding for the non-negative amounts the engine produces.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_whole_units;
///
/// assert_eq!(round_whole_units(dec!(63359.4)), dec!(63359));
/// assert_eq!(round_whole_units(dec!(63359.5)), dec!(63360));
/// assert_eq!(round_whole_units(dec!(-0.5)), dec!(-1)); // Away from zero
/// ```
pub fn round_whole_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
///
/// Catalog prices and multipliers are expected to be non-negative; this
/// keeps a malformed entry from pulling a total below zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-500)), dec!(0));
/// assert_eq!(non_negative(dec!(500)), dec!(500));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole_units tests
    // =========================================================================

    #[test]
    fn round_whole_units_rounds_down_below_midpoint() {
        let result = round_whole_units(dec!(1234.49));

        assert_eq!(result, dec!(1234));
    }

    #[test]
    fn round_whole_units_rounds_up_at_midpoint() {
        let result = round_whole_units(dec!(1234.5));

        assert_eq!(result, dec!(1235));
    }

    #[test]
    fn round_whole_units_rounds_up_above_midpoint() {
        let result = round_whole_units(dec!(1234.51));

        assert_eq!(result, dec!(1235));
    }

    #[test]
    fn round_whole_units_preserves_whole_values() {
        let result = round_whole_units(dec!(33000));

        assert_eq!(result, dec!(33000));
        assert_eq!(result.scale(), 0);
    }

    #[test]
    fn round_whole_units_drops_trailing_fraction_digits() {
        // 33000 × 1.0 carries one fractional digit of scale
        let result = round_whole_units(dec!(33000) * dec!(1.0));

        assert_eq!(result.to_string(), "33000");
    }

    #[test]
    fn round_whole_units_handles_zero() {
        let result = round_whole_units(dec!(0.00));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_clamps_negative_values() {
        let result = non_negative(dec!(-0.01));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn non_negative_keeps_zero() {
        let result = non_negative(dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn non_negative_keeps_positive_values() {
        let result = non_negative(dec!(1.6));

        assert_eq!(result, dec!(1.6));
    }
}
