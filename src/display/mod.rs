//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models and reports for terminal
//! display, including tables, text charts and colors.

pub mod category;
pub mod chart;
pub mod dashboard;
pub mod goal;
pub mod report;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use chart::{render_breakdown, render_monthly, render_trend, ChartStyle};
pub use dashboard::{format_dashboard, format_monthly, format_trend};
pub use goal::{format_deposit_outcome, format_goal_list};
pub use transaction::{format_transaction_details, format_transaction_list};
