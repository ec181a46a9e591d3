//! Publishing records to named streams
//!
//! # Overview
//!
//! - **Publisher**: serializes records and packs them into size-bounded batches
//! - **StreamTransport**: where batches go; stdout, a directory of JSONL files,
//!   or memory
//! - **PublishError**: oversized records and transport failures, both fatal
//!
//! # Usage Example
//!
//! ```rust
//! use fleet_telemetry_simulator::publish::*;
//!
//! let mut publisher = Publisher::new(MemoryTransport::new(), DEFAULT_MAX_BATCH_BYTES);
//! let batches = publisher.publish("fleet_data", &[serde_json::json!({"delivery_id": "D-1"})]).unwrap();
//! assert_eq!(batches, 1);
//! ```

pub mod error;
pub mod publisher;
pub mod transport;

pub use error::*;
pub use publisher::*;
pub use transport::*;
