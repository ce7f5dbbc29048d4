use std::fmt;

use crate::sim::power_balance::network_kw;
use crate::sim::types::INTERVAL_HOURS;

/// Lowest state of charge the battery may reach, as a fraction of capacity.
pub const MIN_SOC: f64 = 0.10;

/// Highest state of charge the battery may reach, as a fraction of capacity.
pub const MAX_SOC: f64 = 0.80;

/// State of charge at the start of every simulated day, as a fraction of capacity.
pub const INITIAL_SOC: f64 = 0.50;

/// Highest power that can be absorbed in one interval without exceeding [`MAX_SOC`].
///
/// # Arguments
///
/// * `soc_kwh` - Current stored energy (kWh)
/// * `capacity_kwh` - Battery capacity (kWh)
/// * `dt_hours` - Interval length (hours)
pub fn charge_limit_kw(soc_kwh: f64, capacity_kwh: f64, dt_hours: f64) -> f64 {
    (capacity_kwh * MAX_SOC - soc_kwh) / dt_hours
}

/// Highest power that can be delivered in one interval without dropping below [`MIN_SOC`].
///
/// # Arguments
///
/// * `soc_kwh` - Current stored energy (kWh)
/// * `capacity_kwh` - Battery capacity (kWh)
/// * `dt_hours` - Interval length (hours)
pub fn discharge_limit_kw(soc_kwh: f64, capacity_kwh: f64, dt_hours: f64) -> f64 {
    (soc_kwh - capacity_kwh * MIN_SOC) / dt_hours
}

/// A home battery that absorbs solar surplus and covers household deficit.
///
/// The battery has no power rating of its own: every interval it takes as much
/// surplus, or delivers as much deficit, as its state-of-charge window allows.
///
/// # Power Flow Convention
/// - Negative power: charging (absorbing surplus)
/// - Positive power: discharging (covering deficit)
#[derive(Debug, Clone)]
pub struct Battery {
    /// Battery capacity in kilowatt-hours.
    pub capacity_kwh: f64,

    /// Stored energy in kilowatt-hours.
    pub soc_kwh: f64,

    /// Duration of one interval in hours.
    dt_hours: f64,
}

/// Outcome of one interval of battery dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    /// State of charge before the interval's action (% of capacity).
    pub soc_pct_before: f64,
    /// Battery power (kW; negative = charging, positive = discharging).
    pub battery_kw: f64,
    /// Grid exchange left after the battery acted (kW; positive = injection).
    pub network_kw: f64,
}

impl Battery {
    /// Creates a battery at [`INITIAL_SOC`] for a day of 15-minute intervals.
    ///
    /// Returns `None` for a non-positive capacity: such a battery does nothing.
    pub fn new(capacity_kwh: f64) -> Option<Self> {
        Self::with_interval(capacity_kwh, INTERVAL_HOURS)
    }

    /// Same as [`Battery::new`] with an explicit interval length.
    pub fn with_interval(capacity_kwh: f64, dt_hours: f64) -> Option<Self> {
        (capacity_kwh > 0.0).then(|| Self {
            capacity_kwh,
            soc_kwh: capacity_kwh * INITIAL_SOC,
            dt_hours,
        })
    }

    /// State of charge as a percentage of capacity.
    pub fn soc_pct(&self) -> f64 {
        self.soc_kwh / self.capacity_kwh * 100.0
    }

    /// Applies one interval of net power (production minus consumption).
    ///
    /// Surplus charges the battery, deficit (or zero) discharges it, each capped
    /// by the headroom left in the state-of-charge window. Headroom is recomputed
    /// from the current state of charge, so consecutive intervals in the same
    /// direction cannot push it past the bounds.
    pub fn dispatch(&mut self, net_kw: f64) -> Dispatch {
        let soc_pct_before = self.soc_pct();

        if net_kw > 0.0 {
            let limit = charge_limit_kw(self.soc_kwh, self.capacity_kwh, self.dt_hours);
            let charge_kw = net_kw.min(limit);
            self.soc_kwh += charge_kw * self.dt_hours;

            Dispatch {
                soc_pct_before,
                battery_kw: -charge_kw,
                network_kw: network_kw(net_kw, -charge_kw),
            }
        } else {
            let limit = discharge_limit_kw(self.soc_kwh, self.capacity_kwh, self.dt_hours);
            let discharge_kw = net_kw.abs().min(limit);
            self.soc_kwh -= discharge_kw * self.dt_hours;

            Dispatch {
                soc_pct_before,
                battery_kw: discharge_kw,
                network_kw: network_kw(net_kw, discharge_kw),
            }
        }
    }
}

/// Direction of battery power flow during an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryMode {
    Charging,
    Discharging,
    Idle,
}

impl BatteryMode {
    pub fn from_power_kw(battery_kw: f64) -> Self {
        if battery_kw < 0.0 {
            Self::Charging
        } else if battery_kw > 0.0 {
            Self::Discharging
        } else {
            Self::Idle
        }
    }
}

impl fmt::Display for BatteryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Charging => "charging",
            Self::Discharging => "discharging",
            Self::Idle => "idle",
        })
    }
}
