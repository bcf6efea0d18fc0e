//! Anchored Prefix Matching
//!
//! Matches a fixed literal token one byte at a time so that a token split
//! across chunk boundaries is still recognized. This module provides:
//! - O(1) per byte
//! - Constant memory usage (one counter per token)
//! - Exact, case-sensitive comparison

/// The prefix curl writes in front of every fatal error message,
/// e.g. `curl: (6) Could not resolve host: example.invalid`.
pub const CURL_ERROR: PrefixToken = PrefixToken::new("curl-error", b"curl: (");

/// A literal token to match at the start of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixToken {
    /// Token name (for logging)
    name: &'static str,
    /// Token bytes, compared as-is
    bytes: &'static [u8],
}

impl PrefixToken {
    /// Create a new token from its literal bytes
    pub const fn new(name: &'static str, bytes: &'static [u8]) -> Self {
        Self { name, bytes }
    }

    /// Token name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full token bytes
    pub fn as_bytes(&self) -> &'static [u8] {
        self.bytes
    }

    /// The first `count` bytes of the token
    pub fn head(&self, count: usize) -> &'static [u8] {
        &self.bytes[..count.min(self.bytes.len())]
    }

    /// Token length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Outcome of feeding one byte to a [`PrefixMatcher`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStep {
    /// Byte matched, token not complete yet
    Partial,
    /// Byte completed the token; the matcher is reset
    Complete,
    /// Byte did not match; `held` bytes of the token had been matched before it
    Mismatch { held: usize },
}

/// Match progress against a single [`PrefixToken`]
///
/// The matcher never restarts in the middle of a line: the caller decides
/// when a new attempt may begin (at a line start) and only keeps feeding
/// while [`PrefixMatcher::is_matching`] holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixMatcher {
    /// Bytes of the token matched so far (0 = not matching)
    position: usize,
}

impl PrefixMatcher {
    /// Create a matcher with no progress
    pub fn new() -> Self {
        Self { position: 0 }
    }

    /// Advance the FSM by one byte - O(1)
    pub fn advance(&mut self, byte: u8, token: &PrefixToken) -> MatchStep {
        if token.bytes.get(self.position) == Some(&byte) {
            self.position += 1;
            if self.position >= token.len() {
                self.position = 0;
                return MatchStep::Complete;
            }
            return MatchStep::Partial;
        }

        let held = self.position;
        self.position = 0;
        MatchStep::Mismatch { held }
    }

    /// Whether a partial match is in progress
    pub fn is_matching(&self) -> bool {
        self.position > 0
    }

    /// Bytes matched so far
    pub fn matched(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(matcher: &mut PrefixMatcher, bytes: &[u8]) -> Vec<MatchStep> {
        bytes.iter().map(|&b| matcher.advance(b, &CURL_ERROR)).collect()
    }

    #[test]
    fn test_full_match() {
        let mut matcher = PrefixMatcher::new();
        let steps = feed(&mut matcher, b"curl: (");

        assert_eq!(steps.last(), Some(&MatchStep::Complete));
        assert!(steps[..6].iter().all(|s| *s == MatchStep::Partial));
        assert!(!matcher.is_matching());
    }

    #[test]
    fn test_case_sensitive() {
        let mut matcher = PrefixMatcher::new();

        assert_eq!(matcher.advance(b'C', &CURL_ERROR), MatchStep::Mismatch { held: 0 });
        assert_eq!(matcher.matched(), 0);
    }

    #[test]
    fn test_mismatch_reports_held_bytes() {
        let mut matcher = PrefixMatcher::new();
        feed(&mut matcher, b"cur");
        assert_eq!(matcher.matched(), 3);

        assert_eq!(matcher.advance(b'v', &CURL_ERROR), MatchStep::Mismatch { held: 3 });
        assert!(!matcher.is_matching());
        assert_eq!(CURL_ERROR.head(3), b"cur");
    }

    #[test]
    fn test_progress_survives_between_feeds() {
        let mut matcher = PrefixMatcher::new();
        feed(&mut matcher, b"curl");
        let steps = feed(&mut matcher, b": (");

        assert_eq!(steps, vec![MatchStep::Partial, MatchStep::Partial, MatchStep::Complete]);
    }

    #[test]
    fn test_token_accessors() {
        assert_eq!(CURL_ERROR.len(), 7);
        assert_eq!(CURL_ERROR.name(), "curl-error");
        assert_eq!(CURL_ERROR.head(99), b"curl: (");
        assert!(!CURL_ERROR.is_empty());
    }
}
