//! Closing domain types: allocation policy, pendings, day markers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::config::PolicyConfig;
use caixa_shared::types::PendingId;

use crate::ledger::{AccountKind, EntryCategory};

/// The three end-of-day allocation kinds, in priority order.
///
/// The two percentage allocations compete for the PIX balance and are
/// prioritized by declaration order; the payroll reserve draws from cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    /// 20% of daily revenue into the investment account.
    Allocation20,
    /// 10% of daily revenue into the debt-payoff account.
    Allocation10,
    /// Fixed daily amount into the payroll reserve.
    Reserve130,
}

impl AllocationKind {
    /// All kinds in compensation priority order.
    pub const IN_PRIORITY_ORDER: [Self; 3] =
        [Self::Allocation20, Self::Allocation10, Self::Reserve130];

    /// The account this allocation draws from.
    #[must_use]
    pub const fn source_account(self) -> AccountKind {
        match self {
            Self::Allocation20 | Self::Allocation10 => AccountKind::Pix,
            Self::Reserve130 => AccountKind::Cash,
        }
    }

    /// The account this allocation funds.
    #[must_use]
    pub const fn destination_account(self) -> AccountKind {
        match self {
            Self::Allocation20 => AccountKind::Investment,
            Self::Allocation10 => AccountKind::DebtPayoff,
            Self::Reserve130 => AccountKind::PayrollReserve,
        }
    }

    /// The audit-entry category for transfers of this kind.
    #[must_use]
    pub const fn category(self) -> EntryCategory {
        match self {
            Self::Allocation20 => EntryCategory::Allocation20,
            Self::Allocation10 => EntryCategory::Allocation10,
            Self::Reserve130 => EntryCategory::PayrollReserve,
        }
    }

    /// Short label used in descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Allocation20 => "20% investimento",
            Self::Allocation10 => "10% quitação de dívidas",
            Self::Reserve130 => "reserva de folha",
        }
    }
}

/// Revenue allocation policy.
///
/// Defaults encode the restaurant's fixed rules (20% / 10% / R$ 130); the
/// values come from configuration so the policy can change without a
/// code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Share of daily revenue for the investment account.
    pub investment_rate: Decimal,
    /// Share of daily revenue for the debt-payoff account.
    pub debt_payment_rate: Decimal,
    /// Fixed daily payroll reserve amount.
    pub daily_reserve: Decimal,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::from(&PolicyConfig::default())
    }
}

impl From<&PolicyConfig> for AllocationPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            investment_rate: config.investment_rate,
            debt_payment_rate: config.debt_payment_rate,
            daily_reserve: config.daily_reserve,
        }
    }
}

/// A recorded allocation shortfall.
///
/// Created when a closing step cannot be fully funded; destroyed by the
/// compensator once retired in full. Partial retirement is deliberately
/// unsupported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    /// Unique identifier.
    pub id: PendingId,
    /// The allocation kind that fell short.
    pub kind: AllocationKind,
    /// Amount still owed.
    pub amount: Decimal,
    /// Day the shortfall arose.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
}

impl Pending {
    /// Creates a new pending for a shortfall.
    #[must_use]
    pub fn new(kind: AllocationKind, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: PendingId::new(),
            kind,
            amount,
            date,
            description: format!("Pendência {}", kind.label()),
        }
    }
}

/// Per-date completion marker for the end-of-day closing.
///
/// Running the closing twice for the same date would double-allocate, so
/// the marker is persisted before any money moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayClosing {
    /// The closed calendar day.
    pub date: NaiveDate,
    /// The revenue base the allocation targets were computed from.
    pub revenue_base: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_allocation_routing() {
        assert_eq!(
            AllocationKind::Allocation20.source_account(),
            AccountKind::Pix
        );
        assert_eq!(
            AllocationKind::Allocation20.destination_account(),
            AccountKind::Investment
        );
        assert_eq!(
            AllocationKind::Allocation10.source_account(),
            AccountKind::Pix
        );
        assert_eq!(
            AllocationKind::Reserve130.source_account(),
            AccountKind::Cash
        );
        assert_eq!(
            AllocationKind::Reserve130.destination_account(),
            AccountKind::PayrollReserve
        );
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            AllocationKind::IN_PRIORITY_ORDER,
            [
                AllocationKind::Allocation20,
                AllocationKind::Allocation10,
                AllocationKind::Reserve130,
            ]
        );
        assert!(AllocationKind::Allocation20 < AllocationKind::Allocation10);
        assert!(AllocationKind::Allocation10 < AllocationKind::Reserve130);
    }

    #[test]
    fn test_default_policy() {
        let policy = AllocationPolicy::default();
        assert_eq!(policy.investment_rate, dec!(0.20));
        assert_eq!(policy.debt_payment_rate, dec!(0.10));
        assert_eq!(policy.daily_reserve, dec!(130));
    }
}
