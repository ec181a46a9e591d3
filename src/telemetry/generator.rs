//! Telemetry generation
//!
//! Derives the in-transit sample sequence of a delivery. Samples are evenly
//! spaced by completion fraction between pickup and planned arrival, the last
//! one landing exactly on the planned arrival, and the cumulative fuel and CO2
//! readings end on the trip totals of the delivery's fuel profile.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info, instrument};

use crate::fleet::Delivery;
use crate::simulation::{SimulationError, SimulationResult};
use crate::telemetry::{round_to, Anomaly, FuelProfile, TelemetrySample};
use crate::types::{AlertType, SimulationConfig, TelemetryConfig};

/// Everything the telemetry generator derives from one delivery
#[derive(Debug, Clone, PartialEq)]
pub struct TripTelemetry {
    /// Samples ordered by timestamp
    pub samples: Vec<TelemetrySample>,
    /// The anomaly applied to the samples
    pub anomaly: Anomaly,
    /// Fuel totals the cumulative readings converge to
    pub fuel: FuelProfile,
    /// Arrival time including real-world schedule slip
    pub actual_delivery_time: DateTime<Utc>,
}

impl TripTelemetry {
    /// Samples that raised an alert (zero or one)
    pub fn alerts(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter().filter(|sample| sample.has_alert())
    }
}

/// Generator for per-trip telemetry sequences
#[derive(Debug, Clone)]
pub struct TelemetryGenerator {
    config: TelemetryConfig,
    speed_noise: Normal<f64>,
}

impl TelemetryGenerator {
    /// Create a telemetry generator, checking the telemetry section of `config`
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate_telemetry()?;
        let speed_noise = Normal::new(0.0, config.telemetry.speed_stddev_kmh).map_err(|e| {
            SimulationError::configuration_error(format!("invalid speed_stddev_kmh: {}", e))
        })?;
        info!(
            "Initializing telemetry generator: one sample per {} km, anomaly probability {}",
            config.telemetry.sample_interval_km, config.telemetry.anomaly_probability
        );
        Ok(Self { config: config.telemetry.clone(), speed_noise })
    }

    /// Number of samples for a delivery: one per interval, never fewer than two
    pub fn sample_count(&self, delivery: &Delivery) -> usize {
        let count = delivery.trip_distance_km / self.config.sample_interval_km;
        (count as usize).max(2)
    }

    /// Fuel totals for a delivery
    pub fn fuel_profile(&self, delivery: &Delivery) -> FuelProfile {
        FuelProfile::for_delivery(&self.config, delivery)
    }

    /// Decide the anomaly for a delivery
    pub fn draw_anomaly<R: Rng + ?Sized>(&self, delivery: &Delivery, rng: &mut R) -> Anomaly {
        Anomaly::draw(
            &self.config,
            self.sample_count(delivery),
            delivery.effective_speed_kmh,
            rng,
        )
    }

    /// Build an anomaly of a chosen kind at a chosen sample index
    pub fn anomaly_of_kind<R: Rng + ?Sized>(
        &self,
        kind: AlertType,
        at: usize,
        delivery: &Delivery,
        rng: &mut R,
    ) -> Anomaly {
        Anomaly::of_kind(kind, at, &self.config, delivery.effective_speed_kmh, rng)
    }

    /// Generate the telemetry of a delivery, drawing its anomaly
    #[instrument(skip(self, delivery, rng), fields(delivery_id = %delivery.delivery_id))]
    pub fn generate<R: Rng + ?Sized>(&self, delivery: &Delivery, rng: &mut R) -> TripTelemetry {
        let anomaly = self.draw_anomaly(delivery, rng);
        self.generate_with_anomaly(delivery, anomaly, rng)
    }

    /// Generate the telemetry of a delivery with a predetermined anomaly
    ///
    /// An anomaly whose index falls outside the sample range affects no sample.
    pub fn generate_with_anomaly<R: Rng + ?Sized>(
        &self,
        delivery: &Delivery,
        anomaly: Anomaly,
        rng: &mut R,
    ) -> TripTelemetry {
        let count = self.sample_count(delivery);
        let fuel = self.fuel_profile(delivery);
        let planned_micros = delivery.planned_duration().num_microseconds().unwrap_or(i64::MAX);

        let samples: Vec<TelemetrySample> = (0..count)
            .map(|index| {
                let step = index + 1;
                let progress = step as f64 / count as f64;
                let offset = (planned_micros as i128 * step as i128 / count as i128) as i64;
                let (fuel_used_liters, co2_emitted_kg) = fuel.cumulative_at(progress);

                let sample = TelemetrySample {
                    delivery_id: delivery.delivery_id,
                    truck_id: delivery.truck_id,
                    timestamp: delivery.pickup_time + Duration::microseconds(offset),
                    speed_kmh: self.sample_speed(delivery, rng),
                    fuel_used_liters,
                    co2_emitted_kg,
                    engine_temp_c: self.sample_engine_temp(delivery, rng),
                    alert_type: None,
                    traffic_condition: delivery.traffic_condition,
                };
                anomaly.apply(index, sample)
            })
            .collect();

        let actual_delivery_time = self.actual_arrival(&samples, delivery, rng);

        if let Some(alert) = anomaly.alert_type() {
            debug!("Injected {} anomaly into delivery {}", alert, delivery.delivery_id);
        }
        debug!(
            "Generated {} telemetry samples for delivery {} ({:.2} km/l, {:.2} l total)",
            samples.len(),
            delivery.delivery_id,
            fuel.km_per_liter,
            fuel.total_fuel_liters
        );

        TripTelemetry { samples, anomaly, fuel, actual_delivery_time }
    }

    fn sample_speed<R: Rng + ?Sized>(&self, delivery: &Delivery, rng: &mut R) -> f64 {
        let speed = delivery.effective_speed_kmh + self.speed_noise.sample(rng);
        round_to(speed.max(0.0), 1)
    }

    fn sample_engine_temp<R: Rng + ?Sized>(&self, delivery: &Delivery, rng: &mut R) -> f64 {
        let config = &self.config;
        let traffic_bonus =
            if delivery.traffic_condition.is_high() { config.high_traffic_temp_bonus_c } else { 0.0 };
        let noise = rng.gen_range(-config.engine_temp_noise_c..=config.engine_temp_noise_c);
        round_to(
            config.base_engine_temp_c
                + delivery.cargo_weight_ton as f64 * config.engine_temp_per_ton_c
                + traffic_bonus
                + noise,
            1,
        )
    }

    /// Last sample time shifted by a symmetric, bounded schedule slip
    fn actual_arrival<R: Rng + ?Sized>(
        &self,
        samples: &[TelemetrySample],
        delivery: &Delivery,
        rng: &mut R,
    ) -> DateTime<Utc> {
        let last = samples.last().map_or(delivery.planned_delivery_time, |sample| sample.timestamp);
        let slip = self.config.max_delivery_slip_minutes as i64;
        last + Duration::minutes(rng.gen_range(-slip..=slip))
    }
}
