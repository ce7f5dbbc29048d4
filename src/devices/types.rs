//! Common types and traits for synthetic sample profiles.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rand::{Rng, rngs::StdRng};

/// Calendar position of one interval, passed to profiles when sampling.
#[derive(Debug, Clone, Copy)]
pub struct DeviceContext {
    pub at: NaiveDateTime,
}

impl DeviceContext {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Time of day in fractional hours, e.g. 12.25 for 12:15.
    pub fn hour_decimal(&self) -> f64 {
        f64::from(self.at.hour()) + f64::from(self.at.minute()) / 60.0
    }

    /// Whole hour of day.
    pub fn hour(&self) -> f64 {
        f64::from(self.at.hour())
    }

    pub fn day_of_year(&self) -> u32 {
        self.at.ordinal()
    }

    pub fn month(&self) -> u32 {
        self.at.month()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.at.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// A source that produces or consumes power over the course of a day.
///
/// Implementations return non-negative power; whether it counts as
/// production or consumption is decided by the caller.
pub trait Device {
    /// Returns the power in kilowatts for the interval described by `context`.
    fn power_kw(&mut self, context: &DeviceContext) -> f64;
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Multiplicative noise factor `N(1, std_dev)` clipped to `[lo, hi]`.
pub fn noise_factor(rng: &mut StdRng, std_dev: f64, lo: f64, hi: f64) -> f64 {
    (1.0 + gaussian_noise(rng, std_dev)).clamp(lo, hi)
}
