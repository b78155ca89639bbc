//! Acquirer fee table and fee/net computation.

use rust_decimal::Decimal;

use caixa_shared::types::money::round_centavos;

use super::types::{CardBrand, CardMethod};

/// Fee rate charged by the acquirer, keyed by (method, brand).
#[must_use]
pub fn fee_rate(method: CardMethod, brand: CardBrand) -> Decimal {
    match (method, brand) {
        (CardMethod::Credit, CardBrand::VisaMaster) => Decimal::new(315, 4), // 3.15%
        (CardMethod::Credit, CardBrand::EloAmex) => Decimal::new(491, 4),    // 4.91%
        (CardMethod::Debit, CardBrand::VisaMaster) => Decimal::new(137, 4),  // 1.37%
        (CardMethod::Debit, CardBrand::EloAmex) => Decimal::new(258, 4),     // 2.58%
    }
}

/// Fee split of a card sale.
///
/// The fee is rounded to whole centavos and the net is derived by exact
/// subtraction, so `net + fee == gross` always holds with no rounding
/// leakage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// Rate applied.
    pub rate: Decimal,
    /// Fee amount (centavos precision).
    pub fee: Decimal,
    /// Net amount (`gross - fee`).
    pub net: Decimal,
}

impl FeeBreakdown {
    /// Computes the fee split for a gross sale amount.
    #[must_use]
    pub fn compute(gross: Decimal, method: CardMethod, brand: CardBrand) -> Self {
        let rate = fee_rate(method, brand);
        let fee = round_centavos(gross * rate);
        Self {
            rate,
            fee,
            net: gross - fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(CardMethod::Credit, CardBrand::VisaMaster, dec!(0.0315))]
    #[case(CardMethod::Credit, CardBrand::EloAmex, dec!(0.0491))]
    #[case(CardMethod::Debit, CardBrand::VisaMaster, dec!(0.0137))]
    #[case(CardMethod::Debit, CardBrand::EloAmex, dec!(0.0258))]
    fn test_fee_rates(
        #[case] method: CardMethod,
        #[case] brand: CardBrand,
        #[case] expected: Decimal,
    ) {
        assert_eq!(fee_rate(method, brand), expected);
    }

    #[test]
    fn test_credit_visa_on_100() {
        // R$ 100.00 credit Visa/Master: fee R$ 3.15, net R$ 96.85.
        let split = FeeBreakdown::compute(dec!(100), CardMethod::Credit, CardBrand::VisaMaster);
        assert_eq!(split.fee, dec!(3.15));
        assert_eq!(split.net, dec!(96.85));
    }

    #[test]
    fn test_fee_rounds_to_centavos() {
        // 33.33 * 0.0491 = 1.636503 -> R$ 1.64
        let split = FeeBreakdown::compute(dec!(33.33), CardMethod::Credit, CardBrand::EloAmex);
        assert_eq!(split.fee, dec!(1.64));
        assert_eq!(split.net, dec!(31.69));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        // R$ 0.01 ..= R$ 100 000.00
        (1i64..=10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    fn method_brand_strategy() -> impl Strategy<Value = (CardMethod, CardBrand)> {
        prop_oneof![
            Just((CardMethod::Credit, CardBrand::VisaMaster)),
            Just((CardMethod::Credit, CardBrand::EloAmex)),
            Just((CardMethod::Debit, CardBrand::VisaMaster)),
            Just((CardMethod::Debit, CardBrand::EloAmex)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// For any amount and any (method, brand), the split is exact:
        /// net + fee == gross, with the fee at whole centavos.
        #[test]
        fn prop_fee_split_is_exact(
            gross in amount_strategy(),
            (method, brand) in method_brand_strategy(),
        ) {
            let split = FeeBreakdown::compute(gross, method, brand);
            prop_assert_eq!(split.net + split.fee, gross);
            prop_assert!(split.fee.scale() <= 2, "fee must be whole centavos");
            prop_assert!(split.fee >= Decimal::ZERO);
            prop_assert!(split.net <= gross);
        }

        /// The fee equals the rounded product of amount and rate.
        #[test]
        fn prop_fee_matches_rate(
            gross in amount_strategy(),
            (method, brand) in method_brand_strategy(),
        ) {
            let split = FeeBreakdown::compute(gross, method, brand);
            let expected = caixa_shared::types::money::round_centavos(
                gross * fee_rate(method, brand),
            );
            prop_assert_eq!(split.fee, expected);
        }
    }
}
