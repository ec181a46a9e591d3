//! Delivery and delivery update records
//!
//! A `Delivery` is created once per tick and never mutated afterwards; the
//! telemetry generator and the resolver only read it. A `DeliveryUpdate` is the
//! derived status transition emitted once the actual arrival time is known.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    CargoType, CustomerId, DeliveryId, DeliveryStatus, DriverId, TrafficCondition, TruckId,
};

/// One simulated truck trip from pickup to drop-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Unique identifier of the delivery
    pub delivery_id: DeliveryId,
    /// Truck assigned to the trip
    pub truck_id: TruckId,
    /// Driver assigned to the trip
    pub driver_id: DriverId,
    /// Customer the cargo belongs to
    pub customer_id: CustomerId,
    /// Where the cargo is collected
    pub pickup_location: String,
    /// Where the cargo is dropped off (never equal to the pickup location)
    pub delivery_location: String,
    /// When the truck leaves the pickup location
    pub pickup_time: DateTime<Utc>,
    /// When the truck is expected at the drop-off location
    pub planned_delivery_time: DateTime<Utc>,
    /// Road distance of the trip
    pub trip_distance_km: u32,
    /// Cargo load
    pub cargo_weight_ton: u32,
    /// Kind of cargo
    pub cargo_type: CargoType,
    /// Traffic for the whole trip
    pub traffic_condition: TrafficCondition,
    /// Base speed adjusted for traffic, used to plan the trip
    pub effective_speed_kmh: f64,
    /// Always `Scheduled` on creation
    pub delivery_status: DeliveryStatus,
}

impl Delivery {
    /// Planned time between pickup and drop-off
    pub fn planned_duration(&self) -> Duration {
        self.planned_delivery_time - self.pickup_time
    }

    /// Route label used in logs, e.g. `Chennai -> Madurai`
    pub fn route(&self) -> String {
        format!("{} -> {}", self.pickup_location, self.delivery_location)
    }
}

/// Status transition of a delivery once it has arrived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUpdate {
    /// Delivery this update resolves
    pub delivery_id: DeliveryId,
    /// Truck that carried the delivery
    pub truck_id: TruckId,
    /// When the truck actually arrived
    pub actual_delivery_time: DateTime<Utc>,
    /// `Completed` when on time, `Delayed` otherwise
    pub delivery_status: DeliveryStatus,
}

impl DeliveryUpdate {
    /// Whether the delivery arrived after its planned time
    pub fn is_delayed(&self) -> bool {
        self.delivery_status == DeliveryStatus::Delayed
    }
}

/// Time needed to cover `distance_km` at `speed_kmh`, at microsecond precision
pub fn travel_duration(distance_km: f64, speed_kmh: f64) -> Duration {
    let hours = distance_km / speed_kmh;
    Duration::microseconds((hours * 3_600_000_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_duration() {
        assert_eq!(travel_duration(100.0, 60.0), Duration::minutes(100));
        assert_eq!(travel_duration(60.0, 60.0), Duration::hours(1));
        assert_eq!(travel_duration(70.0, 42.0), Duration::minutes(100));
    }
}
