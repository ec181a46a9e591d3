//! Simulation driving and control
//!
//! This module contains the tick driver, the simulated clock, run statistics,
//! logging setup and error handling.
//!
//! # Overview
//!
//! - **SimulationDriver**: runs ticks and publishes their records
//! - **SimulationClock**: simulated time, rewound when it overtakes real time
//! - **ShutdownSignal**: cooperative stop flag checked between ticks
//! - **SimulationStatistics**: counters for a run
//! - **SimulationError**: errors surfaced by the simulation
//!
//! # Usage Example
//!
//! ```rust
//! use fleet_telemetry_simulator::publish::MemoryTransport;
//! use fleet_telemetry_simulator::simulation::*;
//! use fleet_telemetry_simulator::types::*;
//!
//! let mut config = SimulationConfig { seed: Some(42), ..Default::default() };
//! config.clock.max_ticks = Some(2);
//! config.clock.tick_delay_ms = 0;
//!
//! let mut driver = SimulationDriver::new(config, MemoryTransport::new()).unwrap();
//! driver.run(&ShutdownSignal::new()).unwrap();
//! assert_eq!(driver.statistics().deliveries, 2);
//! ```

pub mod clock;
pub mod driver;
pub mod error;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export all public types for convenience
pub use clock::*;
pub use driver::*;
pub use error::*;
pub use logging::*;
pub use shutdown::*;
pub use statistics::*;
