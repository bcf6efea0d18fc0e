//! Telemetry Module for the trace cleaner
//!
//! Notable transitions of the scanner are reported as structured JSON log
//! lines through the `log` facade. The crate never installs a logger.

use log::{debug, info, warn};
use serde::Serialize;

/// Event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanerEventType {
    /// Header/body boundary crossed
    BoundaryCrossed,
    /// `curl: (` error line detected
    ErrorLine,
    /// One-time insertion spliced into the output
    InsertionSpliced,
    /// Sink rejected a write
    SinkFailure,
}

/// Structured event for logging
#[derive(Debug, Clone, Serialize)]
pub struct CleanerEvent {
    /// Event type
    pub event_type: CleanerEventType,
    /// Total input bytes seen when the event fired
    pub offset: u64,
    /// Whether the stream was muted before the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_muted: Option<bool>,
    /// Byte count involved (insertion size, rejected output size)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// Reason for failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CleanerEvent {
    /// Create a new event at the given input offset
    pub fn new(event_type: CleanerEventType, offset: u64) -> Self {
        Self {
            event_type,
            offset,
            was_muted: None,
            bytes: None,
            reason: None,
        }
    }

    /// Set prior mute state
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.was_muted = Some(muted);
        self
    }

    /// Set byte count
    pub fn with_bytes(mut self, bytes: usize) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// Set reason
    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Log the event
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => match self.event_type {
                CleanerEventType::SinkFailure => warn!("[TRACE-CLEANER] {}", json),
                CleanerEventType::ErrorLine => info!("[TRACE-CLEANER] {}", json),
                _ => debug!("[TRACE-CLEANER] {}", json),
            },
            Err(e) => {
                warn!("Failed to serialize cleaner event: {}", e);
            }
        }
    }
}

/// Running counters for one cleaner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanerStats {
    /// Chunks accepted
    pub chunks: u64,
    /// Input bytes consumed
    pub bytes_in: u64,
    /// Bytes handed to the sink
    pub bytes_out: u64,
    /// Error lines passed through
    pub error_lines: u64,
}

/// Create a boundary crossing event
pub fn event_boundary(offset: u64, was_muted: bool) -> CleanerEvent {
    CleanerEvent::new(CleanerEventType::BoundaryCrossed, offset).with_muted(was_muted)
}

/// Create an error line event
pub fn event_error_line(offset: u64, was_muted: bool) -> CleanerEvent {
    CleanerEvent::new(CleanerEventType::ErrorLine, offset).with_muted(was_muted)
}

/// Create an insertion event
pub fn event_insertion(offset: u64, bytes: usize) -> CleanerEvent {
    CleanerEvent::new(CleanerEventType::InsertionSpliced, offset).with_bytes(bytes)
}

/// Create a sink failure event
pub fn event_sink_failure(offset: u64, bytes: usize, reason: &str) -> CleanerEvent {
    CleanerEvent::new(CleanerEventType::SinkFailure, offset)
        .with_bytes(bytes)
        .with_reason(reason)
}
