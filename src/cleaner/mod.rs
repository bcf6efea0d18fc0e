//! Line Cleaner
//!
//! Streaming filter over `curl --verbose` output. Each chunk is scanned in
//! full and the cleaned bytes are handed to the sink with a single write.
//! Memory usage is bounded by the chunk size; the stream is never buffered.
//!
//! ```
//! use curl_trace_filter::LineCleaner;
//!
//! let mut cleaner = LineCleaner::new(Vec::new(), false);
//! cleaner.accept(b"> GET / HTTP/1.1\r\n> Host: exam").unwrap();
//! cleaner.accept(b"ple.com\r\n> \r\n< HTTP/1.1 200 OK\r\n").unwrap();
//! assert_eq!(cleaner.into_inner(), b"HTTP/1.1 200 OK\r\n");
//! ```

pub mod state;

use std::io::{self, Write};

use log::debug;

use crate::config::CleanerConfig;
use crate::error::CleanerError;
use crate::telemetry::{self, CleanerStats};

pub use state::ScannerState;
use state::Transition;

/// Streaming cleaner writing to `W`
///
/// A cleaner serves exactly one stream. Chunks must be fed in order from a
/// single caller; `accept` takes `&mut self`, so sharing across threads
/// needs an external lock.
pub struct LineCleaner<W> {
    /// Downstream consumer of cleaned bytes
    sink: W,
    state: ScannerState,
    /// Reused between calls
    output: Vec<u8>,
    stats: CleanerStats,
    log_events: bool,
}

impl<W: Write> LineCleaner<W> {
    /// Create a cleaner. When `verbose` is false, request headers and
    /// comment lines are dropped.
    pub fn new(sink: W, verbose: bool) -> Self {
        Self {
            sink,
            state: ScannerState::new(verbose),
            output: Vec::new(),
            stats: CleanerStats::default(),
            log_events: true,
        }
    }

    /// Create a cleaner from configuration
    pub fn from_config(sink: W, config: &CleanerConfig) -> Self {
        debug!(
            "Trace cleaner initialized (verbose={}, insertion={})",
            config.verbose,
            config.insertion.is_some()
        );

        let mut cleaner = Self::new(sink, config.verbose).with_event_logging(config.log_events);
        if let Some(insertion) = &config.insertion {
            cleaner = cleaner.with_insertion(insertion.as_bytes());
        }
        cleaner
    }

    /// Splice `content` and a newline into the output once, right after the
    /// first comment marker following the header/body boundary. Only applies
    /// to verbose cleaners.
    pub fn with_insertion(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.state.set_insertion(content.into());
        self
    }

    /// Enable or disable structured telemetry events
    pub fn with_event_logging(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    /// Clean `chunk` and write the result to the sink.
    ///
    /// Returns `chunk.len()` on success. A sink failure is terminal for the
    /// stream: scanner state has already advanced past the chunk.
    pub fn accept(&mut self, chunk: &[u8]) -> Result<usize, CleanerError> {
        let offset = self.stats.bytes_in;

        self.output.clear();
        self.state.scan(chunk, &mut self.output);
        self.stats.chunks += 1;
        self.stats.bytes_in += chunk.len() as u64;
        self.report(offset);

        if self.output.is_empty() {
            return Ok(chunk.len());
        }

        let expected = self.output.len();
        match self.sink.write(&self.output) {
            Ok(written) => {
                self.stats.bytes_out += written as u64;
                if written != expected {
                    self.report_failure(expected, "short write");
                    return Err(CleanerError::ShortWrite { written, expected });
                }
                Ok(chunk.len())
            }
            Err(e) => {
                self.report_failure(expected, &e.to_string());
                Err(CleanerError::Sink(e))
            }
        }
    }

    /// Counters since creation
    pub fn stats(&self) -> CleanerStats {
        self.stats
    }

    pub fn is_verbose(&self) -> bool {
        self.state.is_verbose()
    }

    /// Whether content is currently suppressed
    pub fn is_muted(&self) -> bool {
        self.state.is_muted()
    }

    /// Whether the header/body boundary has been crossed
    pub fn in_body(&self) -> bool {
        self.state.in_body()
    }

    /// Borrow the sink
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Consume the cleaner, returning the sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn report(&mut self, offset: u64) {
        for transition in self.state.drain_transitions() {
            let event = match transition {
                Transition::Boundary { index, was_muted } => {
                    telemetry::event_boundary(offset + index as u64, was_muted)
                }
                Transition::ErrorLine { index, was_muted } => {
                    self.stats.error_lines += 1;
                    telemetry::event_error_line(offset + index as u64, was_muted)
                }
                Transition::Insertion { index, bytes } => {
                    telemetry::event_insertion(offset + index as u64, bytes)
                }
            };
            if self.log_events {
                event.emit();
            }
        }
    }

    fn report_failure(&self, bytes: usize, reason: &str) {
        if self.log_events {
            telemetry::event_sink_failure(self.stats.bytes_in, bytes, reason).emit();
        }
    }
}

impl<W: Write> Write for LineCleaner<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.accept(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
