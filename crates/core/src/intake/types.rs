//! Sale and expense records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::types::{ExpenseId, SaleId};

use crate::ledger::AccountKind;
use crate::settlement::{CardBrand, CardMethod};

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash; credits the cash account immediately.
    Cash,
    /// Instant transfer; credits the PIX account immediately.
    Pix,
    /// Credit card; settles next business day, net of fee.
    Credit,
    /// Debit card; settles next business day, net of fee.
    Debit,
}

impl PaymentMethod {
    /// The account credited immediately, if the method is not card-based.
    #[must_use]
    pub const fn deposit_account(self) -> Option<AccountKind> {
        match self {
            Self::Cash => Some(AccountKind::Cash),
            Self::Pix => Some(AccountKind::Pix),
            Self::Credit | Self::Debit => None,
        }
    }

    /// The card mode, if the method is card-based.
    #[must_use]
    pub const fn card_method(self) -> Option<CardMethod> {
        match self {
            Self::Credit => Some(CardMethod::Credit),
            Self::Debit => Some(CardMethod::Debit),
            Self::Cash | Self::Pix => None,
        }
    }

    /// Returns true for credit/debit sales.
    #[must_use]
    pub const fn is_card(self) -> bool {
        matches!(self, Self::Credit | Self::Debit)
    }
}

/// Input for recording a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    /// Calendar day of the sale.
    pub date: NaiveDate,
    /// Gross amount (must be positive).
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Card brand; required iff the method is credit/debit.
    pub card_brand: Option<CardBrand>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional sale-type tag (e.g. counter, delivery).
    pub sale_type: Option<String>,
}

/// A recorded sale.
///
/// Immutable after creation except for the liquidation-status fields, which
/// the liquidation processor flips when the matching settlement matures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier.
    pub id: SaleId,
    /// Calendar day of the sale.
    pub date: NaiveDate,
    /// Gross amount.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Card brand for credit/debit sales.
    pub card_brand: Option<CardBrand>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional sale-type tag.
    pub sale_type: Option<String>,
    /// Fee-deducted amount, informational, set for card sales only.
    pub net_amount: Option<Decimal>,
    /// Whether the matching settlement has been processed.
    pub liquidated: bool,
    /// Day the settlement was processed.
    pub liquidation_date: Option<NaiveDate>,
}

impl Sale {
    /// Builds the sale record from validated input.
    #[must_use]
    pub fn from_input(input: NewSale) -> Self {
        Self {
            id: SaleId::new(),
            date: input.date,
            amount: input.amount,
            method: input.method,
            card_brand: input.card_brand,
            description: input.description,
            sale_type: input.sale_type,
            net_amount: None,
            liquidated: false,
            liquidation_date: None,
        }
    }
}

/// Input for recording an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    /// Calendar day of the expense.
    pub date: NaiveDate,
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Free-text category (e.g. supplier, maintenance).
    pub category: String,
    /// Account the expense is paid from.
    pub account: AccountKind,
    /// Description (must be non-empty).
    pub description: String,
}

/// A recorded expense. Debits its source account on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Calendar day of the expense.
    pub date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Free-text category.
    pub category: String,
    /// Account the expense was paid from.
    pub account: AccountKind,
    /// Description.
    pub description: String,
}

impl Expense {
    /// Builds the expense record from validated input.
    #[must_use]
    pub fn from_input(input: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            date: input.date,
            amount: input.amount,
            category: input.category,
            account: input.account,
            description: input.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_accounts() {
        assert_eq!(
            PaymentMethod::Cash.deposit_account(),
            Some(AccountKind::Cash)
        );
        assert_eq!(PaymentMethod::Pix.deposit_account(), Some(AccountKind::Pix));
        assert_eq!(PaymentMethod::Credit.deposit_account(), None);
        assert_eq!(PaymentMethod::Debit.deposit_account(), None);
    }

    #[test]
    fn test_card_methods() {
        assert_eq!(
            PaymentMethod::Credit.card_method(),
            Some(CardMethod::Credit)
        );
        assert_eq!(PaymentMethod::Debit.card_method(), Some(CardMethod::Debit));
        assert_eq!(PaymentMethod::Cash.card_method(), None);
        assert!(PaymentMethod::Debit.is_card());
        assert!(!PaymentMethod::Pix.is_card());
    }
}
