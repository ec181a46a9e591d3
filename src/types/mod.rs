//! Core types and identifiers for the fleet telemetry simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: delivery, truck, driver and customer identifiers with their wire formats
//! - **Enums**: traffic conditions, cargo types, delivery states, alerts and event types
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use fleet_telemetry_simulator::types::*;
//!
//! let traffic = TrafficCondition::Medium;
//! assert_eq!(traffic.speed_multiplier(), 0.85);
//!
//! let config = SimulationConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
