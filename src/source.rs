//! Frame sources: the capture-side collaborators that feed raw frames into
//! the decoder.
//!
//! A source is polled one frame at a time and answers with an explicit
//! [`PollOutcome`] (frame, timeout, end, or error), so the read loop has a
//! stated contract instead of ad-hoc control flow. The decoder itself never
//! touches a source; it only sees the borrowed [`Frame`] view of one
//! [`CapturedFrame`] at a time.

use crate::protocol::Frame;
use std::fmt;
use std::io::BufRead;

/// Errors from a frame source.
#[derive(Debug)]
pub enum SourceError {
    /// Underlying reader failed.
    Io(std::io::Error),
    /// A line could not be parsed as hex bytes.
    BadHex { line: usize, reason: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "read error: {}", e),
            SourceError::BadHex { line, reason } => {
                write!(f, "bad hex on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e)
    }
}

/// An owned captured frame handed across the source boundary.
///
/// The capture side owns the bytes; the decoder borrows them for the
/// duration of one decode via [`CapturedFrame::frame`].
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Wire length: bytes on the wire, before any snap-length cut.
    pub wire_len: u32,
    /// Bytes actually captured.
    pub data: Vec<u8>,
}

impl CapturedFrame {
    /// A frame captured in full.
    pub fn new(data: Vec<u8>) -> Self {
        let wire_len = data.len() as u32;
        CapturedFrame { wire_len, data }
    }

    /// A frame cut to `snaplen` captured bytes (0 = keep every byte). The
    /// wire length still reports the original size.
    pub fn snapped(mut data: Vec<u8>, snaplen: usize) -> Self {
        let wire_len = data.len() as u32;
        if snaplen > 0 && data.len() > snaplen {
            data.truncate(snaplen);
        }
        CapturedFrame { wire_len, data }
    }

    /// Number of bytes actually captured.
    pub fn captured_len(&self) -> usize {
        self.data.len()
    }

    /// Borrow this frame for one decode.
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(&self.data, self.wire_len)
    }
}

/// Outcome of one poll of a frame source.
#[derive(Debug)]
pub enum PollOutcome {
    /// The next captured frame.
    Frame(CapturedFrame),
    /// Nothing arrived; poll again.
    Timeout,
    /// The source is exhausted.
    EndOfCapture,
    /// This poll failed. The caller decides whether to keep polling.
    Error(SourceError),
}

/// A sequence of captured frames, polled one at a time.
pub trait FrameSource {
    fn poll_next(&mut self) -> PollOutcome;
}

/// Reads frames from a text stream, one frame per line of hex bytes.
///
/// Whitespace between byte pairs is optional, blank lines and `#` comments
/// are skipped, and an unparseable line is reported as a per-frame error
/// without ending the capture.
pub struct HexLineSource<R: BufRead> {
    reader: R,
    line: usize,
    snaplen: usize,
}

impl<R: BufRead> HexLineSource<R> {
    /// `snaplen` caps the captured bytes per frame (0 = no cap).
    pub fn new(reader: R, snaplen: usize) -> Self {
        HexLineSource {
            reader,
            line: 0,
            snaplen,
        }
    }
}

impl<R: BufRead> FrameSource for HexLineSource<R> {
    fn poll_next(&mut self) -> PollOutcome {
        loop {
            let mut buf = String::new();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return PollOutcome::EndOfCapture,
                Ok(_) => {}
                Err(e) => return PollOutcome::Error(SourceError::Io(e)),
            }
            self.line += 1;

            let text = buf.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            return match parse_hex_line(text) {
                Ok(data) => PollOutcome::Frame(CapturedFrame::snapped(data, self.snaplen)),
                Err(reason) => PollOutcome::Error(SourceError::BadHex {
                    line: self.line,
                    reason,
                }),
            };
        }
    }
}

/// Parse a line of hex byte pairs, ignoring interior whitespace.
fn parse_hex_line(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let hi = pair[0]
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}'", pair[0]))?;
        let lo = pair[1]
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}'", pair[1]))?;
        bytes.push(((hi << 4) | lo) as u8);
    }
    Ok(bytes)
}

/// A restartable in-memory sequence of captured frames.
///
/// Used by tests and library consumers that replay the same capture more
/// than once.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    frames: Vec<CapturedFrame>,
    pos: usize,
}

impl ReplaySource {
    pub fn new(frames: Vec<CapturedFrame>) -> Self {
        ReplaySource { frames, pos: 0 }
    }

    /// Restart the sequence from the first frame.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn poll_next(&mut self) -> PollOutcome {
        match self.frames.get(self.pos) {
            Some(frame) => {
                self.pos += 1;
                PollOutcome::Frame(frame.clone())
            }
            None => PollOutcome::EndOfCapture,
        }
    }
}
