//! File input and output around the simulation core.

pub mod export;
pub mod import;
