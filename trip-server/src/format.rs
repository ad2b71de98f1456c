//! Display formatting for trip metrics.

use crate::domain::TransportMode;

/// Placeholder for a missing value.
pub const MISSING: &str = "—";

/// Format a duration in minutes as `3h 27m`, `45m` or `2h`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Format a price in whole euros.
pub fn format_price(euros: f64) -> String {
    format!("€{euros:.0}")
}

/// Format an emission figure with one decimal.
pub fn format_co2(kg: f64) -> String {
    format!("{kg:.1} kg CO₂")
}

/// Format an optional clock time.
pub fn format_time(time: Option<&str>) -> &str {
    match time {
        Some(t) if !t.is_empty() => t,
        _ => MISSING,
    }
}

/// Format an optional value, or the missing placeholder.
pub fn format_opt<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| MISSING.to_string())
}

/// Icon for a transport mode.
pub fn mode_icon(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Train => "🚄",
        TransportMode::Flight => "✈️",
        TransportMode::Bus => "🚌",
        TransportMode::Car => "🚗",
        TransportMode::Ferry => "⛴️",
    }
}

/// Human-readable label for a transport mode.
pub fn mode_label(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Train => "Train",
        TransportMode::Flight => "Flight",
        TransportMode::Bus => "Bus",
        TransportMode::Car => "Car",
        TransportMode::Ferry => "Ferry",
    }
}
