//! Pure pending-compensation planning.
//!
//! Pendings are retired all-or-nothing: a pending is only paid when the
//! source account can cover it in full, otherwise it is left untouched for
//! a later run. Candidates are considered in allocation priority order and,
//! within a kind, oldest first.

use rust_decimal::Decimal;

use super::types::{AllocationKind, Pending};

/// One pending the compensator will retire in full.
#[derive(Debug, Clone, PartialEq)]
pub struct CompensationStep {
    /// The pending being retired.
    pub pending: Pending,
}

/// The result of one compensation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompensationPlan {
    /// Pendings to retire, in execution order.
    pub steps: Vec<CompensationStep>,
}

impl CompensationPlan {
    /// Total amount the plan moves.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.steps.iter().map(|s| s.pending.amount).sum()
    }
}

/// Plans which pendings the current balances can retire.
///
/// `pix_balance` funds the two percentage allocations, `cash_balance` funds
/// the payroll reserve. Balances deplete as steps are planned, so an early
/// large pending can starve later ones of the same source.
#[must_use]
pub fn plan_compensation(
    pendings: &[Pending],
    pix_balance: Decimal,
    cash_balance: Decimal,
) -> CompensationPlan {
    let mut candidates: Vec<&Pending> = pendings.iter().collect();
    candidates.sort_by(|a, b| a.kind.cmp(&b.kind).then(a.date.cmp(&b.date)));

    let mut pix_available = pix_balance.max(Decimal::ZERO);
    let mut cash_available = cash_balance.max(Decimal::ZERO);

    let mut steps = Vec::new();
    for pending in candidates {
        let available = match pending.kind.source_account() {
            crate::ledger::AccountKind::Pix => &mut pix_available,
            _ => &mut cash_available,
        };
        if pending.amount <= *available {
            *available -= pending.amount;
            steps.push(CompensationStep {
                pending: pending.clone(),
            });
        }
    }

    CompensationPlan { steps }
}
