//! Raw captured frame view.
//!
//! A [`Frame`] borrows one captured packet's bytes together with the capture
//! metadata: how many bytes were actually stored (`captured_len`, which a
//! snap length may have cut short of the real packet) and how many were on
//! the wire (`wire_len`). Decoders read exclusively through [`Frame::bytes`],
//! which is capped at `captured_len`, so no decode step can see bytes the
//! capture did not store.

/// A borrowed view of one captured packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    bytes: &'a [u8],
    captured_len: u32,
    wire_len: u32,
}

impl<'a> Frame<'a> {
    /// Wrap a fully captured packet: every byte of `bytes` was on the wire.
    pub fn new(bytes: &'a [u8], wire_len: u32) -> Self {
        Self::with_captured_len(bytes, bytes.len() as u32, wire_len)
    }

    /// Wrap a packet whose capture may have been cut short.
    ///
    /// `captured_len` is clamped to `bytes.len()`, and `wire_len` is raised
    /// to at least `captured_len`, so the invariants
    /// `captured_len <= bytes.len()` and `captured_len <= wire_len` hold for
    /// every constructed frame.
    pub fn with_captured_len(bytes: &'a [u8], captured_len: u32, wire_len: u32) -> Self {
        let captured_len = captured_len.min(bytes.len() as u32);
        Frame {
            bytes,
            captured_len,
            wire_len: wire_len.max(captured_len),
        }
    }

    /// The captured bytes. Never longer than `captured_len`.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        &self.bytes[..self.captured_len as usize]
    }

    /// Number of bytes actually captured.
    #[inline]
    pub fn captured_len(&self) -> usize {
        self.captured_len as usize
    }

    /// Length of the packet on the wire, which may exceed what was captured.
    #[inline]
    pub fn wire_len(&self) -> u32 {
        self.wire_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_capture() {
        let data = [1u8, 2, 3, 4];
        let frame = Frame::new(&data, 4);
        assert_eq!(frame.bytes(), &data);
        assert_eq!(frame.captured_len(), 4);
        assert_eq!(frame.wire_len(), 4);
    }

    #[test]
    fn snapped_capture_caps_bytes() {
        let data = [0u8; 10];
        let frame = Frame::with_captured_len(&data, 6, 100);
        assert_eq!(frame.bytes().len(), 6);
        assert_eq!(frame.captured_len(), 6);
        assert_eq!(frame.wire_len(), 100);
    }

    #[test]
    fn captured_len_clamped_to_buffer() {
        let data = [0u8; 3];
        let frame = Frame::with_captured_len(&data, 999, 999);
        assert_eq!(frame.captured_len(), 3);
        assert_eq!(frame.bytes().len(), 3);
    }

    #[test]
    fn wire_len_raised_to_captured() {
        let data = [0u8; 8];
        let frame = Frame::with_captured_len(&data, 8, 2);
        assert_eq!(frame.wire_len(), 8);
    }
}
