//! Identifier types for the fleet telemetry simulator
//!
//! Deliveries get UUID-based identifiers rendered as `D-<hex>`. Trucks, drivers
//! and customers are small integer pools, matching how a regional fleet numbers
//! its assets; customers are rendered as `CUST-<n>` on the wire.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeliveryId(pub Uuid);

impl DeliveryId {
    /// Create a new delivery ID from system entropy
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a delivery ID from the given random source, so seeded runs reproduce it
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.gen();
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl Default for DeliveryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D-{}", self.0.simple())
    }
}

impl Serialize for DeliveryId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DeliveryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("D-").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(DeliveryId(uuid))
    }
}

/// Fleet number of a truck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckId(pub u32);

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employee number of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u32);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account number of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub u32);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CUST-{}", self.0)
    }
}

impl Serialize for CustomerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("CUST-").unwrap_or(&s);
        let number = raw.parse::<u32>().map_err(serde::de::Error::custom)?;
        Ok(CustomerId(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_delivery_id_display() {
        let id = DeliveryId::new();
        let rendered = id.to_string();
        assert!(rendered.starts_with("D-"));
        assert_eq!(rendered.len(), 2 + 32);
    }

    #[test]
    fn test_delivery_id_seeded_is_reproducible() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(DeliveryId::random(&mut a), DeliveryId::random(&mut b));
        assert_ne!(DeliveryId::random(&mut a), DeliveryId::random(&mut a));
    }

    #[test]
    fn test_id_serialization() {
        let id = DeliveryId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: DeliveryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert_eq!(serde_json::to_string(&TruckId(17)).unwrap(), "17");
        assert_eq!(serde_json::to_string(&DriverId(250)).unwrap(), "250");
        assert_eq!(serde_json::to_string(&CustomerId(123)).unwrap(), "\"CUST-123\"");
    }

    #[test]
    fn test_customer_id_deserialization_accepts_bare_number_string() {
        let with_prefix: CustomerId = serde_json::from_str("\"CUST-101\"").unwrap();
        let bare: CustomerId = serde_json::from_str("\"101\"").unwrap();
        assert_eq!(with_prefix, bare);
        assert!(serde_json::from_str::<CustomerId>("\"CUST-abc\"").is_err());
    }
}
