//! Card settlement: fee computation and settlement scheduling.
//!
//! Card sales do not credit an account immediately. At sale time the
//! scheduler computes the acquirer fee and the next business day (weekend-
//! and holiday-aware) on which the net proceeds settle, producing a
//! [`CardLiquidation`] record that the liquidation processor matures later.

pub mod error;
pub mod fees;
pub mod schedule;
pub mod types;

pub use error::SettlementError;
pub use fees::{FeeBreakdown, fee_rate};
pub use schedule::{MAX_SETTLEMENT_SEARCH_DAYS, settlement_date};
pub use types::{CardBrand, CardLiquidation, CardMethod};
