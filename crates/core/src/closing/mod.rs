//! End-of-day revenue allocation and pending compensation.
//!
//! The closing operation distributes a day's revenue into the reserve
//! accounts per the allocation policy. Steps run in a fixed order and each
//! one reads the balance left by the previous step; a step that cannot be
//! fully funded moves what it can and records the shortfall as a
//! [`Pending`], which the compensator retires later when funds appear.

pub mod allocator;
pub mod compensation;
pub mod error;
pub mod types;

pub use allocator::{AllocationPlan, AllocationStep, plan_allocations};
pub use compensation::{CompensationPlan, CompensationStep, plan_compensation};
pub use error::ClosingError;
pub use types::{AllocationKind, AllocationPolicy, DayClosing, Pending};
