//! Money helpers for Brazilian Real amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`, carried to whole centavos.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of a centavo amount.
pub const CENTAVO_PLACES: u32 = 2;

/// Rounds an amount to whole centavos using Banker's Rounding
/// (`MidpointNearestEven`), the same strategy used for fee computation:
/// - 2.005 → 2.00 (to nearest even)
/// - 2.015 → 2.02 (to nearest even)
#[must_use]
pub fn round_centavos(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENTAVO_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Formats an amount for operator-facing messages: two decimal places with an
/// explicit currency unit, e.g. `R$ 96.85`.
#[must_use]
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {:.2}", round_centavos(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_centavos_exact() {
        assert_eq!(round_centavos(dec!(96.85)), dec!(96.85));
        assert_eq!(round_centavos(dec!(130)), dec!(130));
    }

    #[test]
    fn test_round_centavos_bankers_midpoint() {
        // Midpoints go to the nearest even centavo.
        assert_eq!(round_centavos(dec!(2.005)), dec!(2.00));
        assert_eq!(round_centavos(dec!(2.015)), dec!(2.02));
        assert_eq!(round_centavos(dec!(-2.005)), dec!(-2.00));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec!(96.85)), "R$ 96.85");
        assert_eq!(format_brl(dec!(130)), "R$ 130.00");
        assert_eq!(format_brl(dec!(0)), "R$ 0.00");
        assert_eq!(format_brl(dec!(-3.155)), "R$ -3.16");
    }
}
