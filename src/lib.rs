//! Streaming cleaner for curl trace output
//!
//! Rewrites the combined output of `curl --verbose` into a display-friendly
//! stream while it is still arriving:
//! - `>` / `<` header markers and their separator are stripped
//! - request headers are hidden unless verbose, until the header/body
//!   boundary is crossed
//! - `*` comment lines become `###` lines (verbose) or disappear
//! - `{` / `}` echo lines are dropped
//! - `curl: (` error lines always pass through verbatim
//!
//! Input may be split at any byte; the output does not depend on where the
//! chunk boundaries fall.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod streaming;
pub mod telemetry;

pub use cleaner::{LineCleaner, ScannerState};
pub use config::CleanerConfig;
pub use error::{CleanerError, ConfigError};
pub use telemetry::{CleanerEvent, CleanerEventType, CleanerStats};
