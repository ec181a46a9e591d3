//! Delivery resolution
//!
//! Pure mapping from a delivery and its actual arrival time to the status
//! transition published on the fleet stream.

use chrono::{DateTime, Utc};

use crate::fleet::{Delivery, DeliveryUpdate};
use crate::types::DeliveryStatus;

/// Resolve a delivery: `Completed` when it arrived on or before plan, `Delayed` otherwise
pub fn resolve_delivery(delivery: &Delivery, actual_delivery_time: DateTime<Utc>) -> DeliveryUpdate {
    let delivery_status = if actual_delivery_time <= delivery.planned_delivery_time {
        DeliveryStatus::Completed
    } else {
        DeliveryStatus::Delayed
    };

    DeliveryUpdate {
        delivery_id: delivery.delivery_id,
        truck_id: delivery.truck_id,
        actual_delivery_time,
        delivery_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::DeliveryGenerator;
    use crate::types::SimulationConfig;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn delivery() -> Delivery {
        let generator = DeliveryGenerator::new(&SimulationConfig::default()).unwrap();
        let pickup = Utc.with_ymd_and_hms(2024, 5, 10, 6, 30, 0).unwrap();
        generator.generate(pickup, &mut StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_on_time_is_completed() {
        let delivery = delivery();
        let update = resolve_delivery(&delivery, delivery.planned_delivery_time);
        assert_eq!(update.delivery_status, DeliveryStatus::Completed);
        assert_eq!(update.delivery_id, delivery.delivery_id);
        assert_eq!(update.truck_id, delivery.truck_id);

        let early = resolve_delivery(&delivery, delivery.planned_delivery_time - Duration::minutes(5));
        assert_eq!(early.delivery_status, DeliveryStatus::Completed);
    }

    #[test]
    fn test_late_is_delayed() {
        let delivery = delivery();
        let update =
            resolve_delivery(&delivery, delivery.planned_delivery_time + Duration::seconds(1));
        assert_eq!(update.delivery_status, DeliveryStatus::Delayed);
        assert!(update.is_delayed());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let delivery = delivery();
        let actual = delivery.planned_delivery_time + Duration::minutes(12);
        let first = resolve_delivery(&delivery, actual);
        let second = resolve_delivery(&delivery, actual);
        assert_eq!(first, second);
    }
}
