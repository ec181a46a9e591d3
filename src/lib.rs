//! Fleet Telemetry Simulator
//!
//! A synthetic event generator for a regional trucking fleet. It produces two
//! correlated streams: delivery lifecycle events (scheduled, then completed or
//! delayed) on the fleet stream, and in-transit truck telemetry (speed, fuel,
//! CO2, engine temperature, alerts) on the truck stream.
//!
//! # Overview
//!
//! Each tick of the simulation picks a delivery at the current simulated time,
//! derives its telemetry from the same trip parameters, resolves it against a
//! slipped arrival time and advances simulated time. Simulated time trails real
//! time and is rewound once it catches up.
//!
//! ## Key Features
//!
//! - **Deterministic runs**: every random draw comes from one seedable `StdRng`
//! - **Physically consistent telemetry**: fuel and CO2 accumulate towards trip totals
//!   computed from distance, load and traffic
//! - **Anomaly injection**: at most one speeding or overheating reading per trip
//! - **Size-bounded publishing**: records are packed into batches under a byte limit
//!
//! ## Quick Start
//!
//! ```rust
//! use fleet_telemetry_simulator::*;
//!
//! let mut config = SimulationConfig { seed: Some(42), ..Default::default() };
//! config.clock.max_ticks = Some(1);
//! config.clock.tick_delay_ms = 0;
//!
//! let mut driver = SimulationDriver::new(config, MemoryTransport::new())?;
//! driver.run(&ShutdownSignal::new())?;
//!
//! let transport = driver.into_transport();
//! assert_eq!(transport.stream_order()[0], "fleet_data");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`fleet`]: Delivery model, generation and resolution
//! - [`telemetry`]: Fuel model, telemetry samples and anomalies
//! - [`events`]: Wire records for both streams
//! - [`publish`]: Batching publisher and transports
//! - [`simulation`]: Tick driver, clock, statistics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Fleet     │    │  Telemetry  │
//! │             │◄───┤             │◄───┤             │
//! │ Identifiers │    │ Generator   │    │ Fuel model  │
//! │ Enums       │    │ Resolver    │    │ Anomalies   │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                           ▲                  ▲
//!                           │                  │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Publish    │    │   Events    │    │ Simulation  │
//! │             │◄───┤             │◄───┤             │
//! │ Batching    │    │ Wire        │    │ Driver      │
//! │ Transports  │    │ records     │    │ Clock       │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod events;
pub mod fleet;
pub mod publish;
pub mod simulation;
pub mod telemetry;
pub mod types;

// Core types and identifiers
pub use types::{
    AlertType, CargoType, ConfigValidationError, CustomerId, DeliveryId, DeliveryStatus, DriverId,
    EventType, SimulationConfig, TrafficCondition, TruckId,
};

// Fleet
pub use fleet::{resolve_delivery, Delivery, DeliveryGenerator, DeliveryUpdate};

// Telemetry
pub use telemetry::{Anomaly, TelemetryGenerator, TelemetrySample, TripTelemetry};

// Wire records
pub use events::{FleetEventRecord, FleetUpdateRecord, TruckTelemetryRecord};

// Publishing
pub use publish::{
    DirectoryTransport, MemoryTransport, PublishError, Publisher, StdoutTransport, StreamTransport,
};

// Simulation
pub use simulation::{
    ShutdownSignal, SimulationClock, SimulationDriver, SimulationError, SimulationStatistics,
    TickReport,
};
