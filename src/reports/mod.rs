//! Reports module
//!
//! Pure computations over the transaction, category and goal collections:
//! period filtering, aggregation, monthly trends, the dashboard and the
//! per-period financial report.

pub mod aggregate;
pub mod dashboard;
pub mod period;
pub mod summary;
pub mod trend;

pub use aggregate::{
    balance_slices, category_slices, top_categories, totals_by_category, CategoryTotal, ChartSlice,
    TypeTotals,
};
pub use dashboard::Dashboard;
pub use period::{filter_by_period, DateRange, Dated};
pub use summary::{FinancialReport, GoalProgress};
pub use trend::{build_trend, MonthlyEntry, TrendStats};
