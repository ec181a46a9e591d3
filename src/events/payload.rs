//! Wire records written to the fleet and truck streams
//!
//! Each record is a flat JSON object. Timestamps are rendered as ISO-8601 UTC
//! with millisecond precision and a trailing `Z`, dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::fleet::{Delivery, DeliveryUpdate};
use crate::telemetry::TelemetrySample;
use crate::types::{
    AlertType, CargoType, CustomerId, DeliveryId, DeliveryStatus, DriverId, EventType,
    TrafficCondition, TruckId,
};

/// Render a timestamp as `2024-07-01T09:15:00.000Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(timestamp))
}

/// A newly scheduled delivery, as published on the fleet stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEventRecord {
    /// Delivery the record belongs to
    pub delivery_id: DeliveryId,
    /// Truck carrying the delivery
    pub truck_id: TruckId,
    /// Driver assigned to the trip
    pub driver_id: DriverId,
    /// Customer, rendered as `CUST-<n>`
    pub customer_id: CustomerId,
    /// When the truck leaves the pickup location
    #[serde(serialize_with = "serialize_timestamp")]
    pub pickup_time: DateTime<Utc>,
    /// Planned arrival
    #[serde(serialize_with = "serialize_timestamp")]
    pub delivery_time: DateTime<Utc>,
    /// Road distance in kilometres
    pub trip_distance_km: u32,
    /// Cargo load in tonnes
    pub cargo_weight_ton: u32,
    /// Kind of cargo
    pub cargo_type: CargoType,
    /// Lifecycle state
    pub delivery_status: DeliveryStatus,
    /// Where the cargo is collected
    pub pickup_location: String,
    /// Where the cargo is dropped off
    pub delivery_location: String,
    /// Traffic for the trip
    pub traffic_condition: TrafficCondition,
    /// Payload discriminator
    pub event_type: EventType,
    /// Date of the pickup
    pub event_date: NaiveDate,
}

impl From<&Delivery> for FleetEventRecord {
    fn from(delivery: &Delivery) -> Self {
        Self {
            delivery_id: delivery.delivery_id,
            truck_id: delivery.truck_id,
            driver_id: delivery.driver_id,
            customer_id: delivery.customer_id,
            pickup_time: delivery.pickup_time,
            delivery_time: delivery.planned_delivery_time,
            trip_distance_km: delivery.trip_distance_km,
            cargo_weight_ton: delivery.cargo_weight_ton,
            cargo_type: delivery.cargo_type,
            delivery_status: delivery.delivery_status,
            pickup_location: delivery.pickup_location.clone(),
            delivery_location: delivery.delivery_location.clone(),
            traffic_condition: delivery.traffic_condition,
            event_type: EventType::FleetEvent,
            event_date: delivery.pickup_time.date_naive(),
        }
    }
}

/// The resolution of a delivery, as published on the fleet stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetUpdateRecord {
    /// Delivery the record belongs to
    pub delivery_id: DeliveryId,
    /// Truck carrying the delivery
    pub truck_id: TruckId,
    /// Lifecycle state
    pub delivery_status: DeliveryStatus,
    /// When the truck actually arrived
    #[serde(serialize_with = "serialize_timestamp")]
    pub actual_delivery_time: DateTime<Utc>,
    /// Payload discriminator
    pub event_type: EventType,
    /// Date of the actual arrival
    pub event_date: NaiveDate,
}

impl From<&DeliveryUpdate> for FleetUpdateRecord {
    fn from(update: &DeliveryUpdate) -> Self {
        Self {
            delivery_id: update.delivery_id,
            truck_id: update.truck_id,
            delivery_status: update.delivery_status,
            actual_delivery_time: update.actual_delivery_time,
            event_type: EventType::FleetUpdateEvent,
            event_date: update.actual_delivery_time.date_naive(),
        }
    }
}

/// One telemetry reading, as published on the truck stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckTelemetryRecord {
    /// Delivery the record belongs to
    pub delivery_id: DeliveryId,
    /// Truck carrying the delivery
    pub truck_id: TruckId,
    /// Speed in km/h
    #[serde(rename = "speed")]
    pub speed_kmh: f64,
    /// Cumulative fuel in litres
    #[serde(rename = "fuel_used")]
    pub fuel_used_liters: f64,
    /// Cumulative CO2 in kilograms
    #[serde(rename = "co2_emitted")]
    pub co2_emitted_kg: f64,
    /// Engine temperature in degrees Celsius
    #[serde(rename = "engine_temp")]
    pub engine_temp_c: f64,
    /// `null` unless the reading carries an injected anomaly
    pub alert_type: Option<AlertType>,
    /// Traffic for the trip
    pub traffic_condition: TrafficCondition,
    /// Payload discriminator
    pub event_type: EventType,
    /// Date of the reading
    pub event_date: NaiveDate,
    /// When the reading was taken
    #[serde(rename = "EventTimestamp", serialize_with = "serialize_timestamp")]
    pub event_timestamp: DateTime<Utc>,
}

impl From<&TelemetrySample> for TruckTelemetryRecord {
    fn from(sample: &TelemetrySample) -> Self {
        Self {
            delivery_id: sample.delivery_id,
            truck_id: sample.truck_id,
            speed_kmh: sample.speed_kmh,
            fuel_used_liters: sample.fuel_used_liters,
            co2_emitted_kg: sample.co2_emitted_kg,
            engine_temp_c: sample.engine_temp_c,
            alert_type: sample.alert_type,
            traffic_condition: sample.traffic_condition,
            event_type: EventType::TruckTelemetry,
            event_date: sample.timestamp.date_naive(),
            event_timestamp: sample.timestamp,
        }
    }
}
