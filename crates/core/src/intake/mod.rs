//! Revenue intake: sales and expenses.

pub mod error;
pub mod types;
pub mod validation;

pub use error::IntakeError;
pub use types::{Expense, NewExpense, NewSale, PaymentMethod, Sale};
pub use validation::{validate_expense, validate_sale};
