//! Streaming primitives for chunked trace input
//!
//! Tokens are matched one byte at a time with persisted progress, so a
//! token split across any number of chunks is recognized without buffering
//! the stream.

pub mod prefix_fsm;

pub use prefix_fsm::{MatchStep, PrefixMatcher, PrefixToken, CURL_ERROR};
