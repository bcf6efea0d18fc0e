//! Scanner state for the line cleaner
//!
//! All classification decisions are made one byte at a time from the
//! persisted fields below, so the outcome never depends on where chunk
//! boundaries fall.

use crate::streaming::{MatchStep, PrefixMatcher, CURL_ERROR};

const LF: u8 = b'\n';
const CR: u8 = b'\r';
/// Outgoing (request) header line
const OUTGOING: u8 = b'>';
/// Incoming (response) header line
const INCOMING: u8 = b'<';
/// Informational line written by curl itself
const COMMENT: u8 = b'*';
const COMMENT_REPLACEMENT: &[u8] = b"###";

/// A transition worth reporting, with the index of the byte that caused it
/// within the scanned chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Boundary { index: usize, was_muted: bool },
    ErrorLine { index: usize, was_muted: bool },
    Insertion { index: usize, bytes: usize },
}

/// Per-stream scanning state
#[derive(Debug)]
pub struct ScannerState {
    /// Keep header and comment lines
    verbose: bool,
    /// Content currently suppressed; only ever goes from true to false
    muted: bool,
    /// Last byte that took part in line-start detection (`None` before any)
    last_byte: Option<u8>,
    /// Upcoming bytes to discard
    pending_skip: usize,
    /// Discard up to and including the next newline
    skip_rest_of_line: bool,
    /// Copy verbatim up to the next newline, ignoring `muted`
    passthrough_rest_of_line: bool,
    /// Header/body boundary crossed
    in_body: bool,
    /// Progress against the curl error prefix
    error_match: PrefixMatcher,
    /// Spliced once after the first comment line past the boundary
    pending_insertion: Option<Vec<u8>>,
    transitions: Vec<Transition>,
}

impl ScannerState {
    /// Create the state for a new stream
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            muted: !verbose,
            last_byte: None,
            pending_skip: 0,
            skip_rest_of_line: false,
            passthrough_rest_of_line: false,
            in_body: false,
            error_match: PrefixMatcher::new(),
            pending_insertion: None,
            transitions: Vec::new(),
        }
    }

    /// Set content to splice after the first comment line past the boundary
    pub fn set_insertion(&mut self, content: Vec<u8>) {
        self.pending_insertion = Some(content);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn in_body(&self) -> bool {
        self.in_body
    }

    /// Whether the insertion is still waiting to be spliced
    pub fn insertion_pending(&self) -> bool {
        self.pending_insertion.is_some()
    }

    /// Scan a chunk, appending the cleaned bytes to `out`
    pub fn scan(&mut self, chunk: &[u8], out: &mut Vec<u8>) {
        for (index, &byte) in chunk.iter().enumerate() {
            self.step(index, byte, out);
        }
    }

    /// Take the transitions recorded since the last call
    pub(crate) fn drain_transitions(&mut self) -> std::vec::Drain<'_, Transition> {
        self.transitions.drain(..)
    }

    fn at_line_start(&self) -> bool {
        matches!(self.last_byte, None | Some(LF))
    }

    fn step(&mut self, index: usize, byte: u8, out: &mut Vec<u8>) {
        if self.passthrough_rest_of_line && byte != LF {
            out.push(byte);
            return;
        }
        if self.skip_rest_of_line && byte != LF {
            return;
        }
        self.skip_rest_of_line = false;

        if self.pending_skip > 0 {
            self.pending_skip -= 1;
            return;
        }

        if self.at_line_start() || self.error_match.is_matching() {
            match self.error_match.advance(byte, &CURL_ERROR) {
                MatchStep::Partial => return,
                MatchStep::Complete => {
                    self.transitions.push(Transition::ErrorLine {
                        index,
                        was_muted: self.muted,
                    });
                    self.passthrough_rest_of_line = true;
                    // the token bytes were held back while matching
                    out.extend_from_slice(CURL_ERROR.as_bytes());
                    return;
                }
                MatchStep::Mismatch { held } => self.release_held(held, out),
            }
        }

        match byte {
            OUTGOING | INCOMING if self.at_line_start() => {
                self.pending_skip = 1;
                self.last_byte = Some(byte);
                return;
            }
            CR if self.last_byte == Some(OUTGOING) => {
                if !self.in_body {
                    self.transitions.push(Transition::Boundary {
                        index,
                        was_muted: self.muted,
                    });
                }
                self.in_body = true;
                if self.muted {
                    self.muted = false;
                    self.pending_skip = 1;
                    self.last_byte = Some(LF);
                    return;
                }
            }
            b'{' | b'}' if self.at_line_start() => {
                self.skip_line();
                return;
            }
            COMMENT if self.at_line_start() => {
                if !self.verbose {
                    self.skip_line();
                    return;
                }
                out.extend_from_slice(COMMENT_REPLACEMENT);
                if self.in_body {
                    if let Some(insertion) = self.pending_insertion.take() {
                        out.extend_from_slice(&insertion);
                        out.push(LF);
                        self.transitions.push(Transition::Insertion {
                            index,
                            bytes: insertion.len(),
                        });
                    }
                }
                self.last_byte = Some(byte);
                return;
            }
            _ => {}
        }

        if !self.muted || self.passthrough_rest_of_line {
            out.push(byte);
        }
        self.last_byte = Some(byte);
        self.passthrough_rest_of_line = false;
    }

    /// Drop the current line, its newline included
    fn skip_line(&mut self) {
        self.skip_rest_of_line = true;
        self.pending_skip = 1;
    }

    /// Give back the bytes of an abandoned error-prefix match as ordinary
    /// content of the line they started
    fn release_held(&mut self, held: usize, out: &mut Vec<u8>) {
        if held == 0 {
            return;
        }
        let head = CURL_ERROR.head(held);
        if !self.muted {
            out.extend_from_slice(head);
        }
        self.last_byte = head.last().copied();
    }
}
