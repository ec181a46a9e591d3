//! Telemetry samples

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AlertType, DeliveryId, TrafficCondition, TruckId};

/// One timestamped in-transit reading of a delivery's truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Delivery the reading belongs to
    pub delivery_id: DeliveryId,
    /// Truck that produced the reading
    pub truck_id: TruckId,
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Instantaneous speed
    pub speed_kmh: f64,
    /// Fuel burnt since pickup
    pub fuel_used_liters: f64,
    /// CO2 emitted since pickup
    pub co2_emitted_kg: f64,
    /// Engine temperature
    pub engine_temp_c: f64,
    /// Set only on the sample carrying an injected anomaly
    pub alert_type: Option<AlertType>,
    /// Traffic of the delivery
    pub traffic_condition: TrafficCondition,
}

impl TelemetrySample {
    /// Whether this sample raised an alert
    pub fn has_alert(&self) -> bool {
        self.alert_type.is_some()
    }
}
