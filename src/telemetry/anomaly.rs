//! Anomaly injection
//!
//! At most one anomaly is chosen per delivery. Its override value is drawn when
//! the anomaly is chosen, so applying it to a sample is a pure transformation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::telemetry::{round_to, TelemetrySample};
use crate::types::{AlertType, TelemetryConfig};

/// The anomaly chosen for one delivery's telemetry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anomaly {
    /// Telemetry stays within normal ranges
    None,
    /// Sample `at` reports a speed well above the effective speed
    Speeding {
        /// Index of the affected sample
        at: usize,
        /// Overriding speed
        speed_kmh: f64,
    },
    /// Sample `at` reports an overheating engine
    HighEngineTemp {
        /// Index of the affected sample
        at: usize,
        /// Overriding engine temperature
        engine_temp_c: f64,
    },
}

impl Anomaly {
    /// Decide whether a trip of `sample_count` samples carries an anomaly, and which
    ///
    /// The index is drawn from `1..sample_count`, so the first sample is never affected.
    pub fn draw<R: Rng + ?Sized>(
        config: &TelemetryConfig,
        sample_count: usize,
        effective_speed_kmh: f64,
        rng: &mut R,
    ) -> Self {
        if sample_count < 2 || !rng.gen_bool(config.anomaly_probability) {
            return Anomaly::None;
        }
        let kind = AlertType::ALL[rng.gen_range(0..AlertType::ALL.len())];
        let at = rng.gen_range(1..sample_count);
        Self::of_kind(kind, at, config, effective_speed_kmh, rng)
    }

    /// Build an anomaly of a given kind at a given index, drawing its override value
    pub fn of_kind<R: Rng + ?Sized>(
        kind: AlertType,
        at: usize,
        config: &TelemetryConfig,
        effective_speed_kmh: f64,
        rng: &mut R,
    ) -> Self {
        match kind {
            AlertType::Speeding => {
                let low = effective_speed_kmh + config.min_speeding_margin_kmh;
                let high = effective_speed_kmh + config.max_speeding_margin_kmh;
                Anomaly::Speeding { at, speed_kmh: draw_rounded(low, high, rng) }
            }
            AlertType::HighEngineTemp => {
                let low = config.min_overheat_temp_c;
                let high = config.max_overheat_temp_c;
                Anomaly::HighEngineTemp { at, engine_temp_c: draw_rounded(low, high, rng) }
            }
        }
    }

    /// Index of the affected sample, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Anomaly::None => None,
            Anomaly::Speeding { at, .. } | Anomaly::HighEngineTemp { at, .. } => Some(*at),
        }
    }

    /// Alert raised by this anomaly, if any
    pub fn alert_type(&self) -> Option<AlertType> {
        match self {
            Anomaly::None => None,
            Anomaly::Speeding { .. } => Some(AlertType::Speeding),
            Anomaly::HighEngineTemp { .. } => Some(AlertType::HighEngineTemp),
        }
    }

    /// Apply the anomaly to the sample at `index`; other samples pass through unchanged
    pub fn apply(&self, index: usize, sample: TelemetrySample) -> TelemetrySample {
        match *self {
            Anomaly::Speeding { at, speed_kmh } if at == index => TelemetrySample {
                speed_kmh,
                alert_type: Some(AlertType::Speeding),
                ..sample
            },
            Anomaly::HighEngineTemp { at, engine_temp_c } if at == index => TelemetrySample {
                engine_temp_c,
                alert_type: Some(AlertType::HighEngineTemp),
                ..sample
            },
            _ => sample,
        }
    }
}

/// Uniform draw in `[low, high]`, rounded to one decimal without leaving the band
fn draw_rounded<R: Rng + ?Sized>(low: f64, high: f64, rng: &mut R) -> f64 {
    round_to(rng.gen_range(low..=high), 1).clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeliveryId, TrafficCondition, TruckId};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> TelemetrySample {
        TelemetrySample {
            delivery_id: DeliveryId::new(),
            truck_id: TruckId(4),
            timestamp: Utc::now(),
            speed_kmh: 58.2,
            fuel_used_liters: 10.0,
            co2_emitted_kg: 26.8,
            engine_temp_c: 88.1,
            alert_type: None,
            traffic_condition: TrafficCondition::Low,
        }
    }

    #[test]
    fn test_zero_probability_never_draws() {
        let config = TelemetryConfig { anomaly_probability: 0.0, ..TelemetryConfig::default() };
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert_eq!(Anomaly::draw(&config, 8, 60.0, &mut rng), Anomaly::None);
        }
    }

    #[test]
    fn test_certain_probability_never_touches_first_sample() {
        let config = TelemetryConfig { anomaly_probability: 1.0, ..TelemetryConfig::default() };
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let anomaly = Anomaly::draw(&config, 5, 60.0, &mut rng);
            let at = anomaly.index().unwrap();
            assert!((1..5).contains(&at));
        }
    }

    #[test]
    fn test_override_ranges() {
        let config = TelemetryConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            match Anomaly::of_kind(AlertType::Speeding, 1, &config, 42.0, &mut rng) {
                Anomaly::Speeding { speed_kmh, .. } => {
                    assert!((62.0..=82.0).contains(&speed_kmh))
                }
                other => panic!("unexpected anomaly {:?}", other),
            }
            match Anomaly::of_kind(AlertType::HighEngineTemp, 1, &config, 42.0, &mut rng) {
                Anomaly::HighEngineTemp { engine_temp_c, .. } => {
                    assert!((105.0..=115.0).contains(&engine_temp_c))
                }
                other => panic!("unexpected anomaly {:?}", other),
            }
        }
    }

    #[test]
    fn test_apply_only_touches_target_index() {
        let anomaly = Anomaly::HighEngineTemp { at: 2, engine_temp_c: 110.4 };

        let untouched = anomaly.apply(1, sample());
        assert_eq!(untouched.engine_temp_c, 88.1);
        assert!(untouched.alert_type.is_none());

        let hit = anomaly.apply(2, sample());
        assert_eq!(hit.engine_temp_c, 110.4);
        assert_eq!(hit.speed_kmh, 58.2);
        assert_eq!(hit.alert_type, Some(AlertType::HighEngineTemp));

        assert_eq!(Anomaly::None.apply(0, sample()).alert_type, None);
    }
}
