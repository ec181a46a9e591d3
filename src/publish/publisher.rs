//! Size-bounded batch publisher

use serde::Serialize;
use tracing::{debug, instrument};

use crate::publish::{PublishError, StreamTransport};

/// Default batch limit, the size of a standard Event Hubs batch
pub const DEFAULT_MAX_BATCH_BYTES: usize = 1_048_576;

/// Serializes records and packs them into batches no larger than a byte limit
#[derive(Debug)]
pub struct Publisher<T> {
    transport: T,
    max_batch_bytes: usize,
}

impl<T: StreamTransport> Publisher<T> {
    /// Create a publisher over a transport
    pub fn new(transport: T, max_batch_bytes: usize) -> Self {
        Self { transport, max_batch_bytes }
    }

    /// Batch limit in bytes
    pub fn max_batch_bytes(&self) -> usize {
        self.max_batch_bytes
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Take back the underlying transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Publish `records` to `stream`, returning the number of batches sent
    ///
    /// Every record is serialized before anything is sent, so an oversized or
    /// unserializable record aborts the call without a partial publish.
    #[instrument(skip(self, records), fields(transport = self.transport.name(), count = records.len()))]
    pub fn publish<S: Serialize>(
        &mut self,
        stream: &str,
        records: &[S],
    ) -> Result<usize, PublishError> {
        if records.is_empty() {
            return Ok(0);
        }

        let documents = records
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(oversized) = documents.iter().find(|doc| doc.len() > self.max_batch_bytes) {
            return Err(PublishError::RecordTooLarge {
                stream: stream.to_string(),
                size: oversized.len(),
                limit: self.max_batch_bytes,
            });
        }

        let mut batches = 0;
        let mut batch: Vec<String> = Vec::new();
        let mut batch_bytes = 0;

        for document in documents {
            if !batch.is_empty() && batch_bytes + document.len() > self.max_batch_bytes {
                self.transport.send_batch(stream, &batch)?;
                batches += 1;
                batch.clear();
                batch_bytes = 0;
            }
            batch_bytes += document.len();
            batch.push(document);
        }
        self.transport.send_batch(stream, &batch)?;
        batches += 1;

        debug!("Published {} records to '{}' in {} batch(es)", records.len(), stream, batches);
        Ok(batches)
    }
}
