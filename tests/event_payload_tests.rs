//! Tests for the wire records of both streams

use chrono::{TimeZone, Utc};
use fleet_telemetry_simulator::events::{FleetEventRecord, FleetUpdateRecord, TruckTelemetryRecord};
use fleet_telemetry_simulator::fleet::{resolve_delivery, DeliveryGenerator};
use fleet_telemetry_simulator::telemetry::TelemetryGenerator;
use fleet_telemetry_simulator::types::{AlertType, SimulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FLEET_EVENT_FIELDS: [&str; 15] = [
    "delivery_id",
    "truck_id",
    "driver_id",
    "customer_id",
    "pickup_time",
    "delivery_time",
    "trip_distance_km",
    "cargo_weight_ton",
    "cargo_type",
    "delivery_status",
    "pickup_location",
    "delivery_location",
    "traffic_condition",
    "event_type",
    "event_date",
];

const TELEMETRY_FIELDS: [&str; 11] = [
    "delivery_id",
    "truck_id",
    "speed",
    "fuel_used",
    "co2_emitted",
    "engine_temp",
    "alert_type",
    "traffic_condition",
    "event_type",
    "event_date",
    "EventTimestamp",
];

#[test]
fn test_fleet_event_shape() {
    let generator = DeliveryGenerator::new(&SimulationConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(10);
    let pickup = Utc.with_ymd_and_hms(2024, 6, 30, 22, 45, 0).unwrap();
    let delivery = generator.generate(pickup, &mut rng);

    let value = serde_json::to_value(FleetEventRecord::from(&delivery)).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), FLEET_EVENT_FIELDS.len());
    for field in FLEET_EVENT_FIELDS {
        assert!(object.contains_key(field), "missing {}", field);
    }
    assert_eq!(value["event_type"], "FleetEvent");
    assert_eq!(value["delivery_status"], "Scheduled");
    assert_eq!(value["pickup_time"], "2024-06-30T22:45:00.000Z");
    assert_eq!(value["event_date"], "2024-06-30");
    assert!(value["customer_id"].as_str().unwrap().starts_with("CUST-"));
    assert!(value["delivery_id"].as_str().unwrap().starts_with("D-"));
    assert!(value["delivery_time"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_telemetry_and_update_shapes() {
    let mut config = SimulationConfig::default();
    config.telemetry.anomaly_probability = 1.0;
    let delivery_generator = DeliveryGenerator::new(&config).unwrap();
    let telemetry_generator = TelemetryGenerator::new(&config).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let delivery =
        delivery_generator.generate(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(), &mut rng);
    let trip = telemetry_generator.generate(&delivery, &mut rng);

    let records: Vec<serde_json::Value> = trip
        .samples
        .iter()
        .map(|sample| serde_json::to_value(TruckTelemetryRecord::from(sample)).unwrap())
        .collect();

    for record in &records {
        let object = record.as_object().unwrap();
        assert_eq!(object.len(), TELEMETRY_FIELDS.len());
        for field in TELEMETRY_FIELDS {
            assert!(object.contains_key(field), "missing {}", field);
        }
        assert_eq!(record["event_type"], "TruckTelemetry");
    }

    let alerts: Vec<_> = records.iter().filter(|record| !record["alert_type"].is_null()).collect();
    assert_eq!(alerts.len(), 1);
    let alert = alerts[0]["alert_type"].as_str().unwrap();
    assert!(alert == AlertType::Speeding.to_string() || alert == AlertType::HighEngineTemp.to_string());

    let update = resolve_delivery(&delivery, trip.actual_delivery_time);
    let value = serde_json::to_value(FleetUpdateRecord::from(&update)).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 6);
    assert_eq!(value["event_type"], "FleetUpdateEvent");
    assert_eq!(value["delivery_id"], serde_json::to_value(delivery.delivery_id).unwrap());
}

#[test]
fn test_fleet_event_parses_back() {
    let generator = DeliveryGenerator::new(&SimulationConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(12);
    let delivery = generator.generate(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(), &mut rng);
    let record = FleetEventRecord::from(&delivery);

    let json = serde_json::to_string(&record).unwrap();
    let parsed: FleetEventRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.delivery_id, delivery.delivery_id);
    assert_eq!(parsed.customer_id, delivery.customer_id);
    assert_eq!(parsed.cargo_type, delivery.cargo_type);
    assert_eq!(parsed.pickup_time, delivery.pickup_time);
}
