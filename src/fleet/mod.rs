//! Delivery lifecycle: model, generation and resolution
//!
//! # Overview
//!
//! - **Delivery**: one scheduled truck trip with its planned arrival
//! - **DeliveryGenerator**: creates deliveries from a simulated timestamp
//! - **resolve_delivery**: turns an actual arrival time into a `DeliveryUpdate`
//! - **LocationSet**: the fixed regional locations routes are drawn from
//!
//! # Usage Example
//!
//! ```rust
//! use fleet_telemetry_simulator::fleet::*;
//! use fleet_telemetry_simulator::types::*;
//! use rand::SeedableRng;
//!
//! let generator = DeliveryGenerator::new(&SimulationConfig::default()).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let delivery = generator.generate(chrono::Utc::now(), &mut rng);
//!
//! let update = resolve_delivery(&delivery, delivery.planned_delivery_time);
//! assert_eq!(update.delivery_status, DeliveryStatus::Completed);
//! ```

pub mod delivery;
pub mod generator;
pub mod location;
pub mod resolver;

// Re-export all public types for convenience
pub use delivery::*;
pub use generator::*;
pub use location::*;
pub use resolver::*;
