//! In-transit truck telemetry
//!
//! Turns a generated delivery into a sequence of [`TelemetrySample`]s:
//! fuel and CO2 accumulate towards the trip totals, speed and engine
//! temperature carry noise, and at most one sample per trip carries an
//! injected anomaly.

pub mod anomaly;
pub mod fuel;
pub mod generator;
pub mod sample;

pub use anomaly::*;
pub use fuel::*;
pub use generator::*;
pub use sample::*;

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(58.24, 1), 58.2);
        assert_eq!(round_to(58.26, 1), 58.3);
        assert_eq!(round_to(12.345678, 2), 12.35);
        assert_eq!(round_to(-1.04, 1), -1.0);
    }
}
