//! Settlement domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::types::{LiquidationId, SaleId};

/// Card brand group, as priced by the acquirer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    /// Visa and Mastercard.
    VisaMaster,
    /// Elo and American Express.
    EloAmex,
}

impl std::fmt::Display for CardBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VisaMaster => f.write_str("Visa/Master"),
            Self::EloAmex => f.write_str("Elo/Amex"),
        }
    }
}

/// Card payment mode, as priced by the acquirer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMethod {
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
}

impl std::fmt::Display for CardMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credit => f.write_str("crédito"),
            Self::Debit => f.write_str("débito"),
        }
    }
}

/// Pending settlement of one card sale.
///
/// Created atomically with the sale, with the settlement date computed once
/// and frozen; later holiday-calendar changes never move it. The `liquidated`
/// flag flips when the liquidation processor matures the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLiquidation {
    /// Unique identifier.
    pub id: LiquidationId,
    /// The originating sale.
    pub sale_id: SaleId,
    /// Calendar day of the sale.
    pub sale_date: NaiveDate,
    /// Gross sale amount.
    pub sale_amount: Decimal,
    /// Card brand group.
    pub card_brand: CardBrand,
    /// Credit or debit.
    pub method: CardMethod,
    /// Fee rate applied (e.g. 0.0315).
    pub fee_rate: Decimal,
    /// Fee amount in centavos precision.
    pub fee_amount: Decimal,
    /// Net amount that settles (`sale_amount - fee_amount`).
    pub net_amount: Decimal,
    /// Business day on which the net proceeds settle.
    pub settlement_date: NaiveDate,
    /// Whether the settlement has been processed.
    pub liquidated: bool,
}
