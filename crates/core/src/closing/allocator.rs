//! Pure end-of-day allocation planning.
//!
//! Planning is side-effect free: it takes the day's revenue base and the
//! current source balances and produces a list of steps describing how much
//! to transfer and which pendings to create. The engine applies the plan
//! against storage afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use caixa_shared::types::round_centavos;

use super::types::{AllocationKind, AllocationPolicy, Pending};

/// One planned allocation transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationStep {
    /// Which allocation this step realizes.
    pub kind: AllocationKind,
    /// The full target amount for the day.
    pub target: Decimal,
    /// How much the source balance could actually fund.
    pub transferred: Decimal,
    /// Shortfall to record as a pending, if any.
    pub pending: Option<Pending>,
}

impl AllocationStep {
    /// Amount of the target that could not be funded.
    #[must_use]
    pub fn shortfall(&self) -> Decimal {
        self.target - self.transferred
    }
}

/// The full plan for one day's closing.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPlan {
    /// The day being closed.
    pub date: NaiveDate,
    /// Revenue base the targets were derived from.
    pub revenue_base: Decimal,
    /// Steps in execution order.
    pub steps: Vec<AllocationStep>,
}

impl AllocationPlan {
    /// Total amount the plan moves out of source accounts.
    #[must_use]
    pub fn total_transferred(&self) -> Decimal {
        self.steps.iter().map(|s| s.transferred).sum()
    }

    /// Total shortfall recorded as pendings.
    #[must_use]
    pub fn total_pending(&self) -> Decimal {
        self.steps.iter().map(AllocationStep::shortfall).sum()
    }
}

/// Plans the three end-of-day allocations.
///
/// The two percentage steps draw from the PIX balance in priority order;
/// the payroll reserve draws from cash. Each step transfers as much of its
/// target as the remaining source balance allows and records the rest as a
/// [`Pending`]. Targets are rounded to centavos with Banker's rounding.
#[must_use]
pub fn plan_allocations(
    policy: &AllocationPolicy,
    revenue_base: Decimal,
    pix_balance: Decimal,
    cash_balance: Decimal,
    date: NaiveDate,
) -> AllocationPlan {
    let mut pix_available = pix_balance.max(Decimal::ZERO);
    let mut cash_available = cash_balance.max(Decimal::ZERO);

    let targets = [
        (
            AllocationKind::Allocation20,
            round_centavos(revenue_base * policy.investment_rate),
        ),
        (
            AllocationKind::Allocation10,
            round_centavos(revenue_base * policy.debt_payment_rate),
        ),
        (
            AllocationKind::Reserve130,
            round_centavos(policy.daily_reserve),
        ),
    ];

    let mut steps = Vec::with_capacity(targets.len());
    for (kind, target) in targets {
        let available = match kind.source_account() {
            crate::ledger::AccountKind::Pix => &mut pix_available,
            _ => &mut cash_available,
        };
        let transferred = target.min(*available);
        *available -= transferred;

        let shortfall = target - transferred;
        let pending = if shortfall > Decimal::ZERO {
            Some(Pending::new(kind, shortfall, date))
        } else {
            None
        };

        steps.push(AllocationStep {
            kind,
            target,
            transferred,
            pending,
        });
    }

    AllocationPlan {
        date,
        revenue_base,
        steps,
    }
}
