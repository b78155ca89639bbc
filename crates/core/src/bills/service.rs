//! Bill validation, payment application, and display-status derivation.
//!
//! Payment application is pure: it mutates a bill value and reports the
//! cash movement the caller must apply to the ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::AccountKind;

use super::error::BillError;
use super::types::{Bill, BillDisplayStatus, BillKind, BillStatus, NewBill};

/// The ledger movement a payment produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentOutcome {
    /// Amount that moved.
    pub amount: Decimal,
    /// Account debited (payable) or credited (receivable).
    pub account: AccountKind,
    /// Whether the bill is now fully paid.
    pub settled: bool,
}

/// Validates bill input before registration.
pub fn validate_bill(input: &NewBill) -> Result<(), BillError> {
    if input.amount <= Decimal::ZERO {
        return Err(BillError::NonPositiveAmount(input.amount));
    }
    if input.description.trim().is_empty() {
        return Err(BillError::EmptyDescription);
    }
    Ok(())
}

/// Applies a (possibly partial) payment to a bill.
///
/// The remaining amount decreases and `paid_amount` accumulates; the bill
/// flips to [`BillStatus::Paid`] only once nothing remains. Overpayment is
/// rejected rather than clamped so a typo never silently vanishes money.
pub fn apply_payment(
    bill: &mut Bill,
    payment: Decimal,
    date: NaiveDate,
    account: AccountKind,
) -> Result<PaymentOutcome, BillError> {
    if bill.status == BillStatus::Paid {
        return Err(BillError::AlreadyPaid(bill.id));
    }
    if payment <= Decimal::ZERO {
        return Err(BillError::NonPositiveAmount(payment));
    }
    if payment > bill.amount {
        return Err(BillError::PaymentExceedsRemaining {
            payment,
            remaining: bill.amount,
        });
    }

    bill.amount -= payment;
    bill.paid_amount += payment;
    bill.paid_date = Some(date);
    bill.paid_account = Some(account);
    let settled = bill.amount == Decimal::ZERO;
    if settled {
        bill.status = BillStatus::Paid;
    }

    Ok(PaymentOutcome {
        amount: payment,
        account,
        settled,
    })
}

/// Derives the user-facing status for a reference date.
#[must_use]
pub fn display_status(bill: &Bill, today: NaiveDate) -> BillDisplayStatus {
    match bill.status {
        BillStatus::Paid => BillDisplayStatus::Paid,
        BillStatus::Pending if bill.due_date < today => BillDisplayStatus::Overdue,
        BillStatus::Pending => BillDisplayStatus::Pending,
    }
}

/// Default account a bill payment moves through, by direction.
#[must_use]
pub const fn default_payment_account(kind: BillKind) -> AccountKind {
    match kind {
        BillKind::Payable => AccountKind::Cash,
        BillKind::Receivable => AccountKind::Pix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payable(amount: Decimal) -> Bill {
        Bill::from_input(NewBill {
            kind: BillKind::Payable,
            amount,
            description: "Aluguel".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            category: None,
            counterparty: None,
        })
    }

    #[test]
    fn test_full_payment_settles() {
        let mut bill = payable(dec!(200));
        let outcome = apply_payment(
            &mut bill,
            dec!(200),
            NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(),
            AccountKind::Cash,
        )
        .unwrap();
        assert!(outcome.settled);
        assert_eq!(bill.status, BillStatus::Paid);
        assert_eq!(bill.amount, Decimal::ZERO);
        assert_eq!(bill.paid_amount, dec!(200));
    }

    #[test]
    fn test_partial_payment_keeps_bill_open() {
        let mut bill = payable(dec!(200));
        let outcome = apply_payment(
            &mut bill,
            dec!(80),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            AccountKind::Pix,
        )
        .unwrap();
        assert!(!outcome.settled);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.amount, dec!(120));
        assert_eq!(bill.paid_amount, dec!(80));
        assert_eq!(bill.paid_account, Some(AccountKind::Pix));
    }

    #[test]
    fn test_two_partials_accumulate_to_paid() {
        let mut bill = payable(dec!(100));
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        apply_payment(&mut bill, dec!(60), date, AccountKind::Cash).unwrap();
        let outcome = apply_payment(&mut bill, dec!(40), date, AccountKind::Cash).unwrap();
        assert!(outcome.settled);
        assert_eq!(bill.paid_amount, dec!(100));
    }

    #[test]
    fn test_overpayment_rejected() {
        let mut bill = payable(dec!(100));
        let err = apply_payment(
            &mut bill,
            dec!(100.01),
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            AccountKind::Cash,
        )
        .unwrap_err();
        assert!(matches!(err, BillError::PaymentExceedsRemaining { .. }));
        // Bill untouched on rejection.
        assert_eq!(bill.amount, dec!(100));
    }

    #[test]
    fn test_paying_a_paid_bill_rejected() {
        let mut bill = payable(dec!(50));
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        apply_payment(&mut bill, dec!(50), date, AccountKind::Cash).unwrap();
        let err = apply_payment(&mut bill, dec!(1), date, AccountKind::Cash).unwrap_err();
        assert_eq!(err, BillError::AlreadyPaid(bill.id));
    }

    #[test]
    fn test_display_status_derives_overdue() {
        let bill = payable(dec!(50));
        let before = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        assert_eq!(display_status(&bill, before), BillDisplayStatus::Pending);
        assert_eq!(display_status(&bill, after), BillDisplayStatus::Overdue);
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        let input = NewBill {
            kind: BillKind::Receivable,
            amount: dec!(10),
            description: "   ".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            category: None,
            counterparty: None,
        };
        assert_eq!(validate_bill(&input), Err(BillError::EmptyDescription));
    }
}
