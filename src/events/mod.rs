//! Wire payloads for the fleet and truck streams
//!
//! # Overview
//!
//! - **FleetEventRecord**: a newly scheduled delivery (`FleetEvent`)
//! - **FleetUpdateRecord**: the resolution of a delivery (`FleetUpdateEvent`)
//! - **TruckTelemetryRecord**: one in-transit reading (`TruckTelemetry`)
//!
//! Domain records convert into wire records with `From`, so serialization only
//! happens at the publish boundary.
//!
//! # Usage Example
//!
//! ```rust
//! use fleet_telemetry_simulator::events::*;
//! use fleet_telemetry_simulator::fleet::*;
//! use fleet_telemetry_simulator::types::*;
//! use rand::SeedableRng;
//!
//! let generator = DeliveryGenerator::new(&SimulationConfig::default()).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let delivery = generator.generate(chrono::Utc::now(), &mut rng);
//!
//! let record = FleetEventRecord::from(&delivery);
//! let json = serde_json::to_value(&record).unwrap();
//! assert_eq!(json["event_type"], "FleetEvent");
//! ```

pub mod payload;

pub use payload::*;
