/// Day series builder with battery simulation.
pub mod builder;
pub mod power_balance;
/// Daily summary statistics.
pub mod stats;
pub mod types;

pub use builder::build;
pub use stats::{DailyStats, aggregate};
pub use types::{DaySeries, Point};
