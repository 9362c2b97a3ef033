//! Service layer for the finance tracker
//!
//! Business logic on top of the storage layer: validation, cross-collection
//! rules and audit logging for every mutation.

pub mod category;
pub mod goal;
pub mod transaction;

pub use category::{CategoryService, CategoryUpdate, UpdateCategoryInput};
pub use goal::{DepositOutcome, GoalService};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
