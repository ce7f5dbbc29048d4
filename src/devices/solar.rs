use rand::{SeedableRng, rngs::StdRng};

use crate::devices::types::{Device, DeviceContext, noise_factor};

/// Day of year with the strongest sun (June solstice).
const SOLSTICE_DAY: f64 = 172.0;

/// Production is forced to zero before this hour...
const DAWN_HOUR: f64 = 6.0;

/// ...and after this one.
const DUSK_HOUR: f64 = 20.0;

/// A solar array whose output follows a bell curve around noon, scaled by season.
///
/// `SolarProfile` multiplies three factors:
/// - a seasonal factor peaking at the June solstice,
/// - a gaussian day curve centred on 12:00,
/// - a cloud noise factor clipped to `[0.3, 1.2]`.
///
/// Output is zero before 06:00 and after 20:00.
#[derive(Debug, Clone)]
pub struct SolarProfile {
    /// Output at solar noon on the solstice with clear sky (kW).
    pub kw_peak: f64,

    /// Standard deviation of the cloud noise factor.
    pub noise_std: f64,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl SolarProfile {
    /// Creates a new solar profile.
    ///
    /// # Arguments
    ///
    /// * `kw_peak` - Clear-sky noon output on the solstice (kW)
    /// * `noise_std` - Standard deviation of the multiplicative cloud noise
    /// * `seed` - Random seed for reproducible noise generation
    pub fn new(kw_peak: f64, noise_std: f64, seed: u64) -> Self {
        Self {
            kw_peak: kw_peak.max(0.0),
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seasonal factor in `[0, 1]`, 1 on the solstice.
    pub fn season_factor(day_of_year: u32) -> f64 {
        0.5 + 0.5 * (2.0 * std::f64::consts::PI * (f64::from(day_of_year) - SOLSTICE_DAY) / 365.0).cos()
    }

    /// Bell-shaped daylight curve in `(0, 1]`, 1 at noon.
    pub fn day_curve(hour_decimal: f64) -> f64 {
        (-(hour_decimal - 12.0).powi(2) / 18.0).exp()
    }
}

impl Device for SolarProfile {
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        let hour = context.hour_decimal();
        // Draw even at night so a given seed maps to the same noise per interval.
        let noise = noise_factor(&mut self.rng, self.noise_std, 0.3, 1.2);
        if !(DAWN_HOUR..=DUSK_HOUR).contains(&hour) {
            return 0.0;
        }

        let kw = self.kw_peak
            * Self::season_factor(context.day_of_year())
            * Self::day_curve(hour)
            * noise;
        kw.max(0.0)
    }
}
