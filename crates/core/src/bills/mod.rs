//! Payable and receivable bills.
//!
//! Bills track money owed to suppliers (payables) and owed by customers
//! (receivables). Payments may be partial; a bill only flips to paid when
//! the remaining amount reaches zero. Overdue is a display concern derived
//! from the due date, never persisted.

pub mod error;
pub mod service;
pub mod types;

pub use error::BillError;
pub use service::{
    PaymentOutcome, apply_payment, default_payment_account, display_status, validate_bill,
};
pub use types::{Bill, BillDisplayStatus, BillKind, BillStatus, NewBill};
