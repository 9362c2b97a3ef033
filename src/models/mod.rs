//! Core data models for the finance tracker
//!
//! The three persisted collections (transactions, categories, goals) plus
//! the money and ID types they share, and the transient listing filters.

pub mod category;
pub mod filter;
pub mod goal;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::{Category, CategoryKind};
pub use filter::{FilterSpec, Period, TypeFilter};
pub use goal::Goal;
pub use ids::{CategoryId, GoalId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind};
