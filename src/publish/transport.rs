//! Stream transports
//!
//! A transport receives ready-made batches of serialized JSON documents. It
//! never splits or merges batches; that is the publisher's job.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::publish::PublishError;

/// Destination for batches of serialized records
pub trait StreamTransport {
    /// Deliver one batch to `stream`
    fn send_batch(&mut self, stream: &str, batch: &[String]) -> Result<(), PublishError>;

    /// Human-readable name used in logs
    fn name(&self) -> &str;
}

impl<T: StreamTransport + ?Sized> StreamTransport for Box<T> {
    fn send_batch(&mut self, stream: &str, batch: &[String]) -> Result<(), PublishError> {
        (**self).send_batch(stream, batch)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Writes every record as one JSON line on stdout
#[derive(Debug, Default)]
pub struct StdoutTransport;

impl StdoutTransport {
    /// Create a stdout transport
    pub fn new() -> Self {
        Self
    }
}

impl StreamTransport for StdoutTransport {
    fn send_batch(&mut self, stream: &str, batch: &[String]) -> Result<(), PublishError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for record in batch {
            writeln!(out, "{}", record).map_err(|e| PublishError::io(stream, e))?;
        }
        out.flush().map_err(|e| PublishError::io(stream, e))
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// Appends each stream to `<directory>/<stream>.jsonl`
#[derive(Debug)]
pub struct DirectoryTransport {
    directory: PathBuf,
    writers: HashMap<String, BufWriter<File>>,
}

impl DirectoryTransport {
    /// Create a directory transport, creating the directory if needed
    pub fn new(directory: impl AsRef<Path>) -> io::Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory, writers: HashMap::new() })
    }

    /// File a stream is appended to
    pub fn stream_path(&self, stream: &str) -> PathBuf {
        self.directory.join(format!("{}.jsonl", stream))
    }

    fn writer(&mut self, stream: &str) -> io::Result<&mut BufWriter<File>> {
        if !self.writers.contains_key(stream) {
            // The stream name must be a single plain file name inside the directory
            let mut components = Path::new(stream).components();
            if !matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(name)), None) if name == stream
            ) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("stream name {:?} is not a plain file name", stream),
                ));
            }
            let path = self.stream_path(stream);
            debug!("Opening stream file {}", path.display());
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            self.writers.insert(stream.to_string(), BufWriter::new(file));
        }
        self.writers
            .get_mut(stream)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "stream writer missing"))
    }
}

impl StreamTransport for DirectoryTransport {
    fn send_batch(&mut self, stream: &str, batch: &[String]) -> Result<(), PublishError> {
        let writer = self.writer(stream).map_err(|e| PublishError::io(stream, e))?;
        for record in batch {
            writeln!(writer, "{}", record).map_err(|e| PublishError::io(stream, e))?;
        }
        writer.flush().map_err(|e| PublishError::io(stream, e))
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// One batch captured by a [`MemoryTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedBatch {
    /// Stream the batch was sent to
    pub stream: String,
    /// Serialized records in send order
    pub records: Vec<String>,
}

/// Keeps every batch in memory, in send order
#[derive(Debug, Default)]
pub struct MemoryTransport {
    /// Captured batches
    pub batches: Vec<CapturedBatch>,
}

impl MemoryTransport {
    /// Create an empty memory transport
    pub fn new() -> Self {
        Self::default()
    }

    /// All records sent to `stream`, in order, across batches
    pub fn records(&self, stream: &str) -> Vec<&str> {
        self.batches
            .iter()
            .filter(|batch| batch.stream == stream)
            .flat_map(|batch| batch.records.iter().map(String::as_str))
            .collect()
    }

    /// Stream names in send order, one entry per batch
    pub fn stream_order(&self) -> Vec<&str> {
        self.batches.iter().map(|batch| batch.stream.as_str()).collect()
    }
}

impl StreamTransport for MemoryTransport {
    fn send_batch(&mut self, stream: &str, batch: &[String]) -> Result<(), PublishError> {
        self.batches.push(CapturedBatch { stream: stream.to_string(), records: batch.to_vec() });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
