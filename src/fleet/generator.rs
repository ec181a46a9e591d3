//! Delivery generation
//!
//! Turns a simulated timestamp and a random source into a freshly scheduled
//! delivery with a distinct route, bounded distance and load, traffic, and a
//! planned arrival consistent with the traffic-adjusted speed.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::fleet::{travel_duration, Delivery, LocationSet};
use crate::simulation::SimulationResult;
use crate::types::{
    CargoType, CustomerId, DeliveryId, DeliveryStatus, DriverId, FleetConfig, SimulationConfig,
    TrafficCondition, TruckId,
};

/// Generator for scheduled deliveries
#[derive(Debug, Clone)]
pub struct DeliveryGenerator {
    config: FleetConfig,
    locations: LocationSet,
}

impl DeliveryGenerator {
    /// Create a delivery generator, checking the fleet section of `config`
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        let locations = LocationSet::new(config.fleet.locations.clone())?;
        config.validate_fleet_ranges()?;
        info!("Initializing delivery generator with {} locations", locations.len());
        Ok(Self { config: config.fleet.clone(), locations })
    }

    /// The location set routes are drawn from
    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    /// Effective speed for a traffic condition
    pub fn effective_speed(&self, traffic: TrafficCondition) -> f64 {
        self.config.base_average_speed_kmh * traffic.speed_multiplier()
    }

    /// Generate a new delivery picked up at `pickup_time`
    #[instrument(skip(self, rng))]
    pub fn generate<R: Rng + ?Sized>(&self, pickup_time: DateTime<Utc>, rng: &mut R) -> Delivery {
        let config = &self.config;

        let (pickup_location, delivery_location) = self.locations.pick_route(rng);
        let trip_distance_km =
            rng.gen_range(config.min_trip_distance_km..=config.max_trip_distance_km);
        let cargo_weight_ton =
            rng.gen_range(config.min_cargo_weight_ton..=config.max_cargo_weight_ton);
        let traffic_condition = TrafficCondition::random(rng);
        let effective_speed_kmh = self.effective_speed(traffic_condition);
        let planned_delivery_time =
            pickup_time + travel_duration(trip_distance_km as f64, effective_speed_kmh);

        let delivery = Delivery {
            delivery_id: DeliveryId::random(rng),
            truck_id: TruckId(rng.gen_range(config.min_truck_id..=config.max_truck_id)),
            driver_id: DriverId(rng.gen_range(config.min_driver_id..=config.max_driver_id)),
            customer_id: CustomerId(
                rng.gen_range(config.min_customer_id..=config.max_customer_id),
            ),
            pickup_location: pickup_location.to_string(),
            delivery_location: delivery_location.to_string(),
            pickup_time,
            planned_delivery_time,
            trip_distance_km,
            cargo_weight_ton,
            cargo_type: CargoType::random(rng),
            traffic_condition,
            effective_speed_kmh,
            delivery_status: DeliveryStatus::Scheduled,
        };

        debug!(
            "Generated delivery {} ({}), {} km, {} t, {} traffic",
            delivery.delivery_id,
            delivery.route(),
            trip_distance_km,
            cargo_weight_ton,
            traffic_condition
        );

        delivery
    }
}
