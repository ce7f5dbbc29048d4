use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::devices::types::{Device, DeviceContext, noise_factor};

/// Always-on consumption per home (kW).
const BASE_KW_PER_HOME: f64 = 0.5;

/// Probability that an interval carries an appliance spike.
const SPIKE_PROBABILITY: f64 = 0.05;

/// Multiplier applied to spiking intervals.
const SPIKE_FACTOR: f64 = 1.5;

/// Consumption is never reported below this share of the all-homes base load.
const FLOOR_SHARE: f64 = 0.2;

/// Aggregate consumption of a group of homes.
///
/// `HouseholdLoad` shapes the demand with:
/// - an hourly profile taking the strongest of a morning peak, an evening peak
///   and a night plateau,
/// - a seasonal factor for winter heating and summer cooling,
/// - a 15 % weekend reduction,
/// - multiplicative noise clipped to `[0.7, 1.3]` plus occasional appliance spikes.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use solar_day::devices::{Device, DeviceContext, HouseholdLoad};
///
/// let mut load = HouseholdLoad::new(10, 0.0, 42);
/// let at = NaiveDate::from_ymd_opt(2023, 6, 21)
///     .and_then(|d| d.and_hms_opt(19, 0, 0))
///     .unwrap();
/// assert!(load.power_kw(&DeviceContext::new(at)) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct HouseholdLoad {
    /// Number of homes aggregated.
    pub homes: u32,

    /// Standard deviation of the multiplicative noise.
    pub noise_std: f64,

    /// Random number generator for noise and spike generation.
    rng: StdRng,
}

impl HouseholdLoad {
    /// Creates a new household load.
    ///
    /// # Arguments
    ///
    /// * `homes` - Number of homes aggregated (at least 1)
    /// * `noise_std` - Standard deviation of the multiplicative noise
    /// * `seed` - Random seed for reproducible noise generation
    pub fn new(homes: u32, noise_std: f64, seed: u64) -> Self {
        Self {
            homes: homes.max(1),
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Relative demand for an hour of the day, between about 0.3 and 1.5.
    pub fn hourly_profile(hour: f64) -> f64 {
        let morning = (-(hour - 8.0).powi(2) / 4.0).exp();
        let evening = (-(hour - 19.0).powi(2) / 6.0).exp() * 1.5;
        let night = 0.3 + 0.2 * (-(hour - 3.0).powi(2) / 8.0).exp();
        morning.max(evening).max(night)
    }

    /// Heating in winter months, cooling in summer months.
    pub fn seasonal_factor(month: u32) -> f64 {
        match month {
            1 | 2 | 3 | 11 | 12 => 2.5,
            6..=8 => 1.8,
            _ => 1.0,
        }
    }

    fn base_kw(&self) -> f64 {
        BASE_KW_PER_HOME * f64::from(self.homes)
    }
}

impl Device for HouseholdLoad {
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        let weekend = if context.is_weekend() { 0.85 } else { 1.0 };
        let mut kw = self.base_kw()
            * Self::hourly_profile(context.hour())
            * Self::seasonal_factor(context.month())
            * weekend
            * noise_factor(&mut self.rng, self.noise_std, 0.7, 1.3);

        if self.rng.random::<f64>() < SPIKE_PROBABILITY {
            kw *= SPIKE_FACTOR;
        }

        kw.max(self.base_kw() * FLOOR_SHARE)
    }
}
