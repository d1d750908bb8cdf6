//! Ethernet header decoding.
//!
//! An Ethernet II frame has the following layout:
//!   - Destination MAC: 6 bytes
//!   - Source MAC:      6 bytes
//!   - EtherType:       2 bytes
//!   - Payload:         variable
//!
//! Total header size: 14 bytes. VLAN tags are not handled.

use super::frame::Frame;
use super::{DecodeError, EtherType};

/// Ethernet header length (no VLAN tags).
pub const ETH_HEADER_LEN: usize = 14;

/// Zero-copy Ethernet header that borrows the header bytes of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader<'a> {
    data: &'a [u8],
}

/// Decode the Ethernet header at the start of `frame`.
///
/// Returns the header view and the offset where the next layer begins.
pub fn decode<'a>(frame: &Frame<'a>) -> Result<(EthernetHeader<'a>, usize), DecodeError> {
    let bytes = frame.bytes();
    if bytes.len() < ETH_HEADER_LEN {
        return Err(DecodeError::Truncated {
            needed: ETH_HEADER_LEN,
            have: bytes.len(),
        });
    }
    let header = EthernetHeader {
        data: &bytes[..ETH_HEADER_LEN],
    };
    Ok((header, ETH_HEADER_LEN))
}

impl<'a> EthernetHeader<'a> {
    /// Destination MAC address, in display order as transmitted.
    #[inline]
    pub fn dst_mac(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.data[0..6]);
        mac
    }

    /// Source MAC address, in display order as transmitted.
    #[inline]
    pub fn src_mac(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.data[6..12]);
        mac
    }

    /// EtherType field.
    #[inline]
    pub fn ether_type(&self) -> EtherType {
        EtherType::from(self.ether_type_raw())
    }

    /// Raw EtherType as u16, converted from network byte order.
    #[inline]
    pub fn ether_type_raw(&self) -> u16 {
        u16::from_be_bytes([self.data[12], self.data[13]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_valid_ethernet_frame() {
        // Destination MAC: ff:ff:ff:ff:ff:ff (broadcast)
        // Source MAC: 00:11:22:33:44:55
        // EtherType: 0x0800 (IPv4)
        // Payload: 4 zero bytes
        let data = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // dst
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
            0x08, 0x00, // EtherType = IPv4
            0x00, 0x00, 0x00, 0x00, // payload
        ];
        let frame = Frame::new(&data, data.len() as u32);

        let (eth, offset) = decode(&frame).unwrap();
        assert_eq!(offset, ETH_HEADER_LEN);
        assert_eq!(eth.dst_mac(), [0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(eth.src_mac(), [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(eth.ether_type(), EtherType::Ipv4);
        assert_eq!(eth.ether_type_raw(), 0x0800);
    }

    #[test]
    fn reject_too_short_frame() {
        let data = [0u8; 13]; // one byte too short
        let frame = Frame::new(&data, 13);
        assert_eq!(
            decode(&frame),
            Err(DecodeError::Truncated {
                needed: 14,
                have: 13
            })
        );
    }

    #[test]
    fn snap_length_wins_over_buffer_length() {
        // 20 bytes in the buffer, but only 10 were captured.
        let data = [0u8; 20];
        let frame = Frame::with_captured_len(&data, 10, 20);
        assert_eq!(
            decode(&frame),
            Err(DecodeError::Truncated {
                needed: 14,
                have: 10
            })
        );
    }

    #[test]
    fn decode_arp_ethertype() {
        let mut data = [0u8; 14];
        data[12] = 0x08;
        data[13] = 0x06;
        let frame = Frame::new(&data, 14);
        let (eth, _) = decode(&frame).unwrap();
        assert_eq!(eth.ether_type(), EtherType::Arp);
    }
}
