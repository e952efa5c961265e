//! Host transport: notifications from the editor to the host process.
//!
//! Messages are fire-and-forget. A failed send is logged by the session
//! and never rolls back editor state.

use std::io::{BufWriter, Write};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use framecut_common::error::{FramecutError, FramecutResult};
use framecut_editor_model::event::HostMessage;

/// Outbound channel to the host process.
pub trait HostTransport: Send {
    /// Deliver a message. Must not block on the host's handling of it.
    fn send(&mut self, message: HostMessage) -> FramecutResult<()>;

    /// Transport name for logging.
    fn name(&self) -> &str;
}

/// A shared JSONL sink. Every value is written as one line and flushed.
///
/// Clones write to the same underlying writer, so host messages and
/// export requests can share one stream in order.
pub struct JsonLinesWriter<W: Write + Send> {
    inner: Arc<Mutex<JsonLinesInner<W>>>,
}

struct JsonLinesInner<W: Write + Send> {
    writer: BufWriter<W>,
    lines_written: u64,
}

impl<W: Write + Send> Clone for JsonLinesWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write + Send> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(JsonLinesInner {
                writer: BufWriter::new(writer),
                lines_written: 0,
            })),
        }
    }

    /// Write a single value as a JSONL line.
    pub fn write<T: Serialize>(&self, value: &T) -> FramecutResult<()> {
        let json = serde_json::to_string(value)?;
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| FramecutError::transport("JSONL writer lock poisoned"))?;
        writeln!(inner.writer, "{json}")
            .map_err(|e| FramecutError::transport(format!("Failed to write line: {e}")))?;
        inner
            .writer
            .flush()
            .map_err(|e| FramecutError::transport(format!("Failed to flush line: {e}")))?;
        inner.lines_written += 1;
        Ok(())
    }

    /// Number of lines written through any clone.
    pub fn lines_written(&self) -> u64 {
        self.inner.lock().map(|i| i.lines_written).unwrap_or(0)
    }
}

/// Host transport that writes each message as a JSONL line.
pub struct JsonLinesHost<W: Write + Send> {
    writer: JsonLinesWriter<W>,
}

impl<W: Write + Send> JsonLinesHost<W> {
    pub fn new(writer: JsonLinesWriter<W>) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> HostTransport for JsonLinesHost<W> {
    fn send(&mut self, message: HostMessage) -> FramecutResult<()> {
        self.writer.write(&message)
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}
