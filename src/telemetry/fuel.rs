//! Fuel and emissions model
//!
//! Efficiency drops linearly with cargo weight and, optionally, in high traffic,
//! but never below the configured floor.

use serde::{Deserialize, Serialize};

use crate::fleet::Delivery;
use crate::telemetry::round_to;
use crate::types::{TelemetryConfig, TrafficCondition};

/// Trip-level fuel totals for one delivery
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProfile {
    /// Weight and traffic adjusted efficiency
    pub km_per_liter: f64,
    /// Fuel burnt over the whole trip
    pub total_fuel_liters: f64,
    /// CO2 emitted over the whole trip
    pub total_co2_kg: f64,
}

impl FuelProfile {
    /// Efficiency for a load and traffic condition, floored at `min_km_per_liter`
    pub fn km_per_liter(
        config: &TelemetryConfig,
        cargo_weight_ton: u32,
        traffic: TrafficCondition,
    ) -> f64 {
        let traffic_penalty = if traffic.is_high() { config.high_traffic_penalty } else { 0.0 };
        let efficiency = config.base_km_per_liter
            - cargo_weight_ton as f64 * config.weight_penalty_per_ton
            - traffic_penalty;
        efficiency.max(config.min_km_per_liter)
    }

    /// Totals for a delivery
    pub fn for_delivery(config: &TelemetryConfig, delivery: &Delivery) -> Self {
        let km_per_liter =
            Self::km_per_liter(config, delivery.cargo_weight_ton, delivery.traffic_condition);
        let total_fuel_liters = delivery.trip_distance_km as f64 / km_per_liter;
        Self {
            km_per_liter,
            total_fuel_liters,
            total_co2_kg: total_fuel_liters * config.co2_per_liter,
        }
    }

    /// Cumulative (fuel, co2) at a completion fraction, rounded to 2 decimals
    pub fn cumulative_at(&self, progress: f64) -> (f64, f64) {
        (
            round_to(self.total_fuel_liters * progress, 2),
            round_to(self.total_co2_kg * progress, 2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_penalty_scenario() {
        let config = TelemetryConfig::default();
        let efficiency = FuelProfile::km_per_liter(&config, 20, TrafficCondition::Low);
        assert!((efficiency - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_high_traffic_penalty_hits_floor() {
        let config = TelemetryConfig::default();
        // 3.5 - 1.0 - 1.0 = 1.5, exactly the floor
        let efficiency = FuelProfile::km_per_liter(&config, 20, TrafficCondition::High);
        assert!((efficiency - 1.5).abs() < 1e-9);

        let heavier = TelemetryConfig { weight_penalty_per_ton: 0.2, ..TelemetryConfig::default() };
        assert_eq!(FuelProfile::km_per_liter(&heavier, 20, TrafficCondition::High), 1.5);
    }

    #[test]
    fn test_disabled_traffic_penalty() {
        let config = TelemetryConfig { high_traffic_penalty: 0.0, ..TelemetryConfig::default() };
        let low = FuelProfile::km_per_liter(&config, 10, TrafficCondition::Low);
        let high = FuelProfile::km_per_liter(&config, 10, TrafficCondition::High);
        assert_eq!(low, high);
    }

    #[test]
    fn test_cumulative_rounding() {
        let profile =
            FuelProfile { km_per_liter: 3.0, total_fuel_liters: 100.0 / 3.0, total_co2_kg: 89.0 };
        assert_eq!(profile.cumulative_at(1.0), (33.33, 89.0));
        assert_eq!(profile.cumulative_at(0.5), (16.67, 44.5));
    }
}
