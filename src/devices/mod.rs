//! Battery model and synthetic production/consumption profiles.

/// Aggregate household consumption profile.
pub mod baseload;
/// Home battery with a bounded state-of-charge window.
pub mod battery;
/// Solar production profile.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use baseload::HouseholdLoad;
pub use battery::{Battery, BatteryMode};
pub use solar::SolarProfile;
pub use types::Device;
pub use types::DeviceContext;
