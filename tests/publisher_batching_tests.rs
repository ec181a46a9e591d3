//! Tests for size-bounded batch publishing

use fleet_telemetry_simulator::publish::{MemoryTransport, PublishError, Publisher};
use serde_json::json;

#[test]
fn test_every_batch_stays_under_limit() {
    let records: Vec<_> =
        (0..200).map(|i| json!({ "delivery_id": format!("D-{:04}", i), "speed": i })).collect();
    let limit = 500;
    let mut publisher = Publisher::new(MemoryTransport::new(), limit);

    let batches = publisher.publish("truck_data", &records).unwrap();

    let transport = publisher.transport();
    assert_eq!(batches, transport.batches.len());
    assert!(batches > 1);
    for batch in &transport.batches {
        let bytes: usize = batch.records.iter().map(String::len).sum();
        assert!(bytes <= limit);
        assert!(!batch.records.is_empty());
    }

    let sent = transport.records("truck_data");
    assert_eq!(sent.len(), 200);
    let first: serde_json::Value = serde_json::from_str(sent[0]).unwrap();
    assert_eq!(first["delivery_id"], "D-0000");
}

#[test]
fn test_single_batch_under_default_limit() {
    let records: Vec<_> = (0..20).map(|i| json!({ "value": i })).collect();
    let mut publisher = Publisher::new(MemoryTransport::new(), 1_048_576);
    assert_eq!(publisher.publish("fleet_data", &records).unwrap(), 1);
}

#[test]
fn test_empty_slice_is_a_no_op() {
    let mut publisher = Publisher::new(MemoryTransport::new(), 10);
    let records: Vec<serde_json::Value> = Vec::new();
    assert_eq!(publisher.publish("fleet_data", &records).unwrap(), 0);
    assert!(publisher.into_transport().batches.is_empty());
}

#[test]
fn test_record_larger_than_limit_is_fatal() {
    let records = vec![json!({ "payload": "x".repeat(100) })];
    let mut publisher = Publisher::new(MemoryTransport::new(), 50);

    let error = publisher.publish("fleet_data", &records).unwrap_err();
    assert!(matches!(error, PublishError::RecordTooLarge { limit: 50, .. }));
    assert!(error.to_string().contains("fleet_data"));
}
