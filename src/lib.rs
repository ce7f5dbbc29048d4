//! One-day solar, household consumption and home battery simulator.

pub mod cli;
pub mod config;
pub mod devices;
/// CSV import and CSV/JSON export.
pub mod io;
pub mod reporting;
pub mod sample;
pub mod scaling;
/// Day series builder and daily statistics.
pub mod sim;
pub mod synthetic;
