//! Layered frame decoding.
//!
//! Decoding is staged: Ethernet, then (for ethertype 0x0800) IPv4, then (for
//! protocol 6) TCP, then the application payload. Every stage is a pure
//! function over an immutable [`Frame`]; every offset and every declared
//! length is validated against the captured bytes before it is trusted.
//! A malformed or truncated frame stops the chain at the last complete
//! layer; it never aborts the caller's loop and never reads past
//! `captured_len`.

pub mod ethernet;
pub mod frame;
pub mod ipv4;
pub mod payload;
pub mod tcp;

pub use frame::Frame;
pub use payload::Payload;

use std::fmt;

/// EtherType constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    Ipv4,
    Ipv6,
    Arp,
    Unknown(u16),
}

impl From<u16> for EtherType {
    fn from(value: u16) -> Self {
        match value {
            0x0800 => EtherType::Ipv4,
            0x86DD => EtherType::Ipv6,
            0x0806 => EtherType::Arp,
            other => EtherType::Unknown(other),
        }
    }
}

impl EtherType {
    pub fn as_u16(&self) -> u16 {
        match self {
            EtherType::Ipv4 => 0x0800,
            EtherType::Ipv6 => 0x86DD,
            EtherType::Arp => 0x0806,
            EtherType::Unknown(v) => *v,
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::Ipv4 => write!(f, "IPv4"),
            EtherType::Ipv6 => write!(f, "IPv6"),
            EtherType::Arp => write!(f, "ARP"),
            EtherType::Unknown(v) => write!(f, "Unknown(0x{:04x})", v),
        }
    }
}

/// IP protocol numbers (subset relevant to our use case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    Icmp,
    Tcp,
    Udp,
    Unknown(u8),
}

impl From<u8> for IpProtocol {
    fn from(value: u8) -> Self {
        match value {
            1 => IpProtocol::Icmp,
            6 => IpProtocol::Tcp,
            17 => IpProtocol::Udp,
            other => IpProtocol::Unknown(other),
        }
    }
}

impl fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpProtocol::Icmp => write!(f, "ICMP"),
            IpProtocol::Tcp => write!(f, "TCP"),
            IpProtocol::Udp => write!(f, "UDP"),
            IpProtocol::Unknown(v) => write!(f, "Proto({})", v),
        }
    }
}

/// Errors from a single decode step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A declared or minimum header size exceeds the bytes captured from the
    /// current layer's start.
    Truncated { needed: usize, have: usize },
    /// A length-bearing field is below its protocol-mandated minimum.
    MalformedHeader(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { needed, have } => {
                write!(f, "frame truncated: need {} bytes, have {}", needed, have)
            }
            DecodeError::MalformedHeader(msg) => write!(f, "malformed header: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

/// The result of decoding one frame.
///
/// Later-layer fields are `None` unless every preceding layer decoded and
/// the protocol chain matched (IPv4 ethertype, TCP protocol). A frame that
/// stops early on an unsupported ethertype or protocol is a normal outcome,
/// not an error; `truncated`/`malformed` record the abnormal ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedPacket<'a> {
    pub ethernet: Option<ethernet::EthernetHeader<'a>>,
    pub ipv4: Option<ipv4::Ipv4Header<'a>>,
    pub tcp: Option<tcp::TcpHeader<'a>>,
    pub payload: Option<Payload<'a>>,
    /// The capture ended before a declared header or payload did.
    pub truncated: bool,
    /// A header carried a length field below its protocol minimum.
    pub malformed: bool,
    /// The error that stopped decoding, if any.
    pub error: Option<DecodeError>,
}

impl<'a> DecodedPacket<'a> {
    fn stopped_by(mut self, error: DecodeError) -> Self {
        match &error {
            DecodeError::Truncated { .. } => self.truncated = true,
            DecodeError::MalformedHeader(_) => self.malformed = true,
        }
        self.error = Some(error);
        self
    }
}

/// Decode one captured frame through all layers it carries.
///
/// Never panics and never reads past the frame's captured length; errors
/// from individual layers are recovered into the returned packet's flags.
pub fn decode<'a>(frame: &Frame<'a>) -> DecodedPacket<'a> {
    let mut packet = DecodedPacket::default();

    let (eth, offset) = match ethernet::decode(frame) {
        Ok(done) => done,
        Err(e) => return packet.stopped_by(e),
    };
    let ether_type = eth.ether_type();
    packet.ethernet = Some(eth);
    if ether_type != EtherType::Ipv4 {
        return packet;
    }

    let (ip, offset) = match ipv4::decode(frame, offset) {
        Ok(done) => done,
        Err(e) => return packet.stopped_by(e),
    };
    let protocol = ip.protocol();
    packet.ipv4 = Some(ip);
    if protocol != IpProtocol::Tcp {
        return packet;
    }

    let (tcp, offset) = match tcp::decode(frame, offset) {
        Ok(done) => done,
        Err(e) => return packet.stopped_by(e),
    };

    let payload = payload::extract(frame, &ip, &tcp, offset);
    packet.truncated |= payload.is_clipped();
    packet.tcp = Some(tcp);
    packet.payload = Some(payload);
    packet
}
