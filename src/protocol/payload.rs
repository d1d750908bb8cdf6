//! Application payload extraction.
//!
//! The payload's declared length comes from the IPv4 total-length field
//! minus the two *parsed* header lengths; whatever it declares, the range
//! never extends past the bytes actually captured. Ethernet trailer padding
//! beyond the IP total length is excluded the same way.

use super::frame::Frame;
use super::ipv4::Ipv4Header;
use super::tcp::TcpHeader;

/// The application data region after the TCP header.
///
/// Holds the full effective range; any display cap is the printer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload<'a> {
    data: &'a [u8],
    start: usize,
    declared_len: usize,
}

/// Extract the payload region that follows a TCP header ending at `offset`.
pub fn extract<'a>(
    frame: &Frame<'a>,
    ip: &Ipv4Header<'a>,
    tcp: &TcpHeader<'a>,
    offset: usize,
) -> Payload<'a> {
    let bytes = frame.bytes();
    let declared_len = (ip.total_length() as usize)
        .saturating_sub(ip.header_len())
        .saturating_sub(tcp.header_len());
    let start = offset.min(bytes.len());
    let available = bytes.len() - start;
    let effective_len = declared_len.min(available);
    Payload {
        data: &bytes[start..start + effective_len],
        start,
        declared_len,
    }
}

impl<'a> Payload<'a> {
    /// The captured payload bytes.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of payload bytes captured.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset of the payload within the frame.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last captured payload byte, relative to the frame.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.data.len()
    }

    /// Payload length the IP total-length field declared.
    #[inline]
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// True when the capture stored fewer payload bytes than were declared.
    #[inline]
    pub fn is_clipped(&self) -> bool {
        self.declared_len > self.data.len()
    }
}
