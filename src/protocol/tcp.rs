//! TCP header decoding.
//!
//! TCP header layout (20-60 bytes):
//!   0                   1                   2                   3
//!   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |          Source Port          |       Destination Port        |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                        Sequence Number                        |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                    Acknowledgment Number                      |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |  Data |           |U|A|P|R|S|F|                               |
//!  | Offset| Reserved  |R|C|S|S|Y|I|            Window             |
//!  |       |           |G|K|H|T|N|N|                               |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |           Checksum            |         Urgent Pointer        |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!
//! The data-offset nibble is validated against the captured bytes the same
//! way the IPv4 IHL is: declared length first, captured length wins.

use super::frame::Frame;
use super::DecodeError;

/// Minimum TCP header length (data offset = 5, no options).
pub const TCP_MIN_HEADER_LEN: usize = 20;

/// TCP flags bitmask constants.
pub mod flags {
    pub const FIN: u8 = 0x01;
    pub const SYN: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const PSH: u8 = 0x08;
    pub const ACK: u8 = 0x10;
    pub const URG: u8 = 0x20;
}

/// Zero-copy TCP header covering exactly the header bytes, options included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpHeader<'a> {
    data: &'a [u8],
}

/// Decode a TCP header at `offset` into `frame`.
///
/// The caller is expected to invoke this only after seeing IP protocol 6;
/// nothing here re-checks that.
pub fn decode<'a>(frame: &Frame<'a>, offset: usize) -> Result<(TcpHeader<'a>, usize), DecodeError> {
    let bytes = frame.bytes();
    let have = bytes.len().saturating_sub(offset);
    if have < TCP_MIN_HEADER_LEN {
        return Err(DecodeError::Truncated {
            needed: TCP_MIN_HEADER_LEN,
            have,
        });
    }

    let data = &bytes[offset..];
    let data_offset = ((data[12] >> 4) & 0x0F) as usize;
    if data_offset < 5 {
        return Err(DecodeError::MalformedHeader(format!(
            "data offset too small: {} (min 5)",
            data_offset
        )));
    }

    let header_len = data_offset * 4;
    if have < header_len {
        return Err(DecodeError::Truncated {
            needed: header_len,
            have,
        });
    }

    let header = TcpHeader {
        data: &data[..header_len],
    };
    Ok((header, offset + header_len))
}

impl<'a> TcpHeader<'a> {
    /// Source port.
    #[inline]
    pub fn src_port(&self) -> u16 {
        u16::from_be_bytes([self.data[0], self.data[1]])
    }

    /// Destination port.
    #[inline]
    pub fn dst_port(&self) -> u16 {
        u16::from_be_bytes([self.data[2], self.data[3]])
    }

    /// Sequence number.
    #[inline]
    pub fn sequence_number(&self) -> u32 {
        u32::from_be_bytes([self.data[4], self.data[5], self.data[6], self.data[7]])
    }

    /// Acknowledgment number.
    #[inline]
    pub fn ack_number(&self) -> u32 {
        u32::from_be_bytes([self.data[8], self.data[9], self.data[10], self.data[11]])
    }

    /// Data offset in 32-bit words.
    #[inline]
    pub fn data_offset(&self) -> u8 {
        (self.data[12] >> 4) & 0x0F
    }

    /// Header length in bytes.
    #[inline]
    pub fn header_len(&self) -> usize {
        self.data.len()
    }

    /// Raw flags byte.
    #[inline]
    pub fn flags_raw(&self) -> u8 {
        self.data[13]
    }

    #[inline]
    pub fn fin(&self) -> bool {
        self.data[13] & flags::FIN != 0
    }

    #[inline]
    pub fn syn(&self) -> bool {
        self.data[13] & flags::SYN != 0
    }

    #[inline]
    pub fn rst(&self) -> bool {
        self.data[13] & flags::RST != 0
    }

    #[inline]
    pub fn psh(&self) -> bool {
        self.data[13] & flags::PSH != 0
    }

    #[inline]
    pub fn ack(&self) -> bool {
        self.data[13] & flags::ACK != 0
    }

    #[inline]
    pub fn urg(&self) -> bool {
        self.data[13] & flags::URG != 0
    }

    /// Format flags as a string like "[SYN, ACK]".
    pub fn flags_string(&self) -> String {
        let mut parts = Vec::new();
        if self.syn() {
            parts.push("SYN");
        }
        if self.ack() {
            parts.push("ACK");
        }
        if self.fin() {
            parts.push("FIN");
        }
        if self.rst() {
            parts.push("RST");
        }
        if self.psh() {
            parts.push("PSH");
        }
        if self.urg() {
            parts.push("URG");
        }
        format!("[{}]", parts.join(", "))
    }

    /// Window size.
    #[inline]
    pub fn window_size(&self) -> u16 {
        u16::from_be_bytes([self.data[14], self.data[15]])
    }

    /// Options bytes (empty unless data offset > 5).
    #[inline]
    pub fn options(&self) -> &'a [u8] {
        &self.data[TCP_MIN_HEADER_LEN..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tcp_syn() -> Vec<u8> {
        let mut pkt = vec![0u8; 20];
        pkt[0] = 0xC0;
        pkt[1] = 0x00; // src port = 49152
        pkt[2] = 0x00;
        pkt[3] = 0x50; // dst port = 80
        // Sequence number = 1000
        pkt[6] = 0x03;
        pkt[7] = 0xE8;
        // Data offset = 5 (20 bytes), reserved = 0
        pkt[12] = 0x50;
        // Flags: SYN
        pkt[13] = flags::SYN;
        // Window = 65535
        pkt[14] = 0xFF;
        pkt[15] = 0xFF;
        pkt
    }

    #[test]
    fn decode_tcp_syn() {
        let pkt = make_tcp_syn();
        let frame = Frame::new(&pkt, pkt.len() as u32);
        let (hdr, offset) = decode(&frame, 0).unwrap();
        assert_eq!(offset, 20);
        assert_eq!(hdr.src_port(), 49152);
        assert_eq!(hdr.dst_port(), 80);
        assert_eq!(hdr.sequence_number(), 1000);
        assert_eq!(hdr.ack_number(), 0);
        assert_eq!(hdr.data_offset(), 5);
        assert!(hdr.syn());
        assert!(!hdr.ack());
        assert!(!hdr.fin());
        assert!(!hdr.rst());
        assert_eq!(hdr.window_size(), 65535);
        assert_eq!(hdr.flags_string(), "[SYN]");
    }

    #[test]
    fn reject_short_tcp() {
        let pkt = [0u8; 19];
        let frame = Frame::new(&pkt, 19);
        assert_eq!(
            decode(&frame, 0),
            Err(DecodeError::Truncated {
                needed: 20,
                have: 19
            })
        );
    }

    #[test]
    fn reject_small_data_offset() {
        let mut pkt = make_tcp_syn();
        pkt[12] = 0x40; // data offset = 4
        let frame = Frame::new(&pkt, pkt.len() as u32);
        assert!(matches!(
            decode(&frame, 0),
            Err(DecodeError::MalformedHeader(_))
        ));
    }

    #[test]
    fn declared_header_longer_than_capture() {
        let mut pkt = make_tcp_syn();
        pkt[12] = 0xF0; // data offset = 15 -> 60-byte header declared
        let frame = Frame::new(&pkt, pkt.len() as u32);
        assert_eq!(
            decode(&frame, 0),
            Err(DecodeError::Truncated {
                needed: 60,
                have: 20
            })
        );
    }

    #[test]
    fn options_region_exposed() {
        let mut pkt = make_tcp_syn();
        pkt[12] = 0x60; // data offset = 6 -> 24-byte header
        pkt.extend_from_slice(&[0x01, 0x01, 0x01, 0x00]);
        let frame = Frame::new(&pkt, pkt.len() as u32);
        let (hdr, offset) = decode(&frame, 0).unwrap();
        assert_eq!(offset, 24);
        assert_eq!(hdr.header_len(), 24);
        assert_eq!(hdr.options(), &[0x01, 0x01, 0x01, 0x00]);
    }
}
