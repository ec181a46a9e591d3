//! Enumeration types for the fleet telemetry simulator
//!
//! This module contains all enumeration types used throughout the simulation system,
//! including traffic conditions, cargo types, delivery states, alert kinds and the
//! event type discriminator written to every wire payload.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Road traffic observed for the whole of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficCondition {
    /// Free-flowing roads
    Low,
    /// Moderate congestion
    Medium,
    /// Heavy congestion, slows the truck and burns more fuel
    High,
}

impl TrafficCondition {
    /// Every traffic condition, in declaration order
    pub const ALL: [TrafficCondition; 3] =
        [TrafficCondition::Low, TrafficCondition::Medium, TrafficCondition::High];

    /// Multiplier applied to the base average speed
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            TrafficCondition::Low => 1.0,
            TrafficCondition::Medium => 0.85,
            TrafficCondition::High => 0.70,
        }
    }

    /// Whether this condition triggers the high-traffic fuel and engine penalties
    pub fn is_high(&self) -> bool {
        matches!(self, TrafficCondition::High)
    }

    /// Draw a traffic condition uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for TrafficCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficCondition::Low => write!(f, "Low"),
            TrafficCondition::Medium => write!(f, "Medium"),
            TrafficCondition::High => write!(f, "High"),
        }
    }
}

/// Kind of goods carried on a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoType {
    /// Cloth and garments
    Textiles,
    /// Consumer and industrial electronics
    Electronics,
    /// Spare parts for vehicle manufacturing
    #[serde(rename = "Automotive Parts")]
    AutomotiveParts,
    /// Farm produce
    #[serde(rename = "Agricultural Produce")]
    AgriculturalProduce,
}

impl CargoType {
    /// Every cargo type, in declaration order
    pub const ALL: [CargoType; 4] = [
        CargoType::Textiles,
        CargoType::Electronics,
        CargoType::AutomotiveParts,
        CargoType::AgriculturalProduce,
    ];

    /// Draw a cargo type uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CargoType::Textiles => write!(f, "Textiles"),
            CargoType::Electronics => write!(f, "Electronics"),
            CargoType::AutomotiveParts => write!(f, "Automotive Parts"),
            CargoType::AgriculturalProduce => write!(f, "Agricultural Produce"),
        }
    }
}

/// Lifecycle state of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Planned, not yet resolved
    Scheduled,
    /// Arrived on or before the planned delivery time
    Completed,
    /// Arrived after the planned delivery time
    Delayed,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Scheduled => write!(f, "Scheduled"),
            DeliveryStatus::Completed => write!(f, "Completed"),
            DeliveryStatus::Delayed => write!(f, "Delayed"),
        }
    }
}

/// Alert raised on a telemetry sample carrying an injected anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    /// Speed well above the traffic-adjusted average
    Speeding,
    /// Engine temperature in the overheating band
    HighEngineTemp,
}

impl AlertType {
    /// Every alert type, in declaration order
    pub const ALL: [AlertType; 2] = [AlertType::Speeding, AlertType::HighEngineTemp];
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::Speeding => write!(f, "Speeding"),
            AlertType::HighEngineTemp => write!(f, "HighEngineTemp"),
        }
    }
}

/// Discriminator carried in the `event_type` field of every payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A newly scheduled delivery (fleet stream)
    FleetEvent,
    /// The resolution of a delivery (fleet stream)
    FleetUpdateEvent,
    /// One in-transit telemetry reading (truck stream)
    TruckTelemetry,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::FleetEvent => write!(f, "FleetEvent"),
            EventType::FleetUpdateEvent => write!(f, "FleetUpdateEvent"),
            EventType::TruckTelemetry => write!(f, "TruckTelemetry"),
        }
    }
}
