//! The dashboard feature: aggregates transactions into a grand total, two
//! pie charts, and category summary tables.

mod aggregation;
mod charts;
mod handlers;
mod tables;

pub use handlers::{DashboardState, get_dashboard_page};
