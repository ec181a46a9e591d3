//! Publish errors

use thiserror::Error;

/// Errors raised while handing records to a stream
#[derive(Debug, Error)]
pub enum PublishError {
    /// A single serialized record exceeds the batch limit
    #[error("Record of {size} bytes exceeds the {limit} byte batch limit on stream '{stream}'")]
    RecordTooLarge {
        /// Target stream
        stream: String,
        /// Serialized record size
        size: usize,
        /// Configured batch limit
        limit: usize,
    },

    /// The transport could not write a batch
    #[error("Transport error on stream '{stream}': {source}")]
    Io {
        /// Target stream
        stream: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized
    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PublishError {
    /// Wrap an I/O failure on a stream
    pub fn io(stream: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { stream: stream.into(), source }
    }
}
