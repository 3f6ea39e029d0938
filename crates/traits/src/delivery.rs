//! Source and sink traits for the briefing pipeline.
//!
//! The pipeline reads one blob of markdown-flavored text from a
//! [`BriefingSource`], renders it, and hands the results to a
//! [`BriefingSink`]. The sink contract mirrors chat-platform webhooks: each
//! posted unit has a maximum size, so long text must be split upstream (see
//! the chunker in the root crate).

use std::fmt::Debug;
use std::sync::Mutex;
use thiserror::Error;

/// Error type for briefing text acquisition.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("Briefing source unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// A source of raw markdown-like briefing text.
pub trait BriefingSource: Send + Sync + Debug {
    fn fetch_markdown(&self) -> Result<String, SourceError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A source returning a fixed string; used by the CLI (file contents) and tests.
#[derive(Debug)]
pub struct StaticSource(pub String);

impl BriefingSource for StaticSource {
    fn fetch_markdown(&self) -> Result<String, SourceError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Error type for delivery operations.
#[derive(Error, Debug, Clone)]
pub enum SinkError {
    #[error("Sink rejected payload: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// A destination accepting one payload per logical unit.
pub trait BriefingSink: Send + Sync + Debug {
    /// Maximum size of a single text payload, in bytes.
    fn max_payload(&self) -> usize;

    /// Post one text unit. Callers must keep `content` within
    /// [`max_payload`](Self::max_payload).
    fn post_text(&self, content: &str) -> Result<(), SinkError>;

    /// Post a document attachment (not subject to the text payload limit).
    fn post_document(&self, filename: &str, bytes: &[u8]) -> Result<(), SinkError>;

    /// Returns a human-readable name for this sink (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// One unit recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Text(String),
    Document { filename: String, len: usize },
}

/// A sink recording everything posted to it, for tests.
#[derive(Debug)]
pub struct MemorySink {
    limit: usize,
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl BriefingSink for MemorySink {
    fn max_payload(&self) -> usize {
        self.limit
    }

    fn post_text(&self, content: &str) -> Result<(), SinkError> {
        if content.len() > self.limit {
            return Err(SinkError::Rejected(format!(
                "payload of {} bytes exceeds limit of {}",
                content.len(),
                self.limit
            )));
        }
        let mut events = self
            .events
            .lock()
            .map_err(|_| SinkError::Io("sink lock poisoned".to_string()))?;
        events.push(SinkEvent::Text(content.to_string()));
        Ok(())
    }

    fn post_document(&self, filename: &str, bytes: &[u8]) -> Result<(), SinkError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| SinkError::Io("sink lock poisoned".to_string()))?;
        events.push(SinkEvent::Document {
            filename: filename.to_string(),
            len: bytes.len(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
