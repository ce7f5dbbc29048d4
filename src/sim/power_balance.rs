//! Per-interval power balance between production, consumption, battery and grid.

/// Net power before any battery interaction.
///
/// Positive means surplus production, negative means the home is short.
pub fn net_power_kw(production_kw: f64, consumption_kw: f64) -> f64 {
    production_kw - consumption_kw
}

/// Grid exchange once the battery has acted.
///
/// `battery_kw` follows the battery convention (negative = charging,
/// positive = discharging), so charging reduces injection and discharging
/// reduces the draw. The result is positive for injection, negative for draw.
pub fn network_kw(net_kw: f64, battery_kw: f64) -> f64 {
    net_kw + battery_kw
}
