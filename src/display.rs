//! Packet display / pretty-printing for the CLI.
//!
//! All byte-to-text conversion lives here: MAC addresses as colon-separated
//! lowercase hex pairs, IPv4 addresses as dotted decimal, ports as decimal,
//! payload bytes as spaced hex pairs capped for readability. The decoder
//! hands over raw views; nothing upstream formats anything.

use crate::protocol::{DecodedPacket, Frame};

/// Payload bytes shown per packet unless configured otherwise.
pub const PAYLOAD_DISPLAY_BYTES: usize = 8;

/// Format a MAC address as xx:xx:xx:xx:xx:xx.
pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

/// Format payload bytes as space-separated lowercase hex pairs, showing at
/// most `cap` bytes (0 = no cap).
pub fn format_payload(data: &[u8], cap: usize) -> String {
    let shown = if cap > 0 { data.len().min(cap) } else { data.len() };
    let mut out = String::with_capacity(shown * 3);
    for (i, byte) in data[..shown].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02x}", byte));
    }
    if shown < data.len() {
        out.push_str(&format!(" .. ({} more)", data.len() - shown));
    }
    out
}

/// Build the one-line summary for a decoded frame.
pub fn summary_line(index: u64, frame: &Frame<'_>, packet: &DecodedPacket<'_>) -> String {
    let mut summary = format!(
        "#{:<6} {}B captured (wire {})",
        index,
        frame.captured_len(),
        frame.wire_len()
    );

    if let Some(eth) = &packet.ethernet {
        summary.push_str(&format!(
            " | {} -> {} [{}]",
            format_mac(&eth.src_mac()),
            format_mac(&eth.dst_mac()),
            eth.ether_type()
        ));
    }

    if let Some(ip) = &packet.ipv4 {
        summary.push_str(&format!(
            " | {} -> {} {} ttl={}",
            ip.src_addr(),
            ip.dst_addr(),
            ip.protocol(),
            ip.ttl()
        ));
    }

    if let Some(tcp) = &packet.tcp {
        summary.push_str(&format!(
            " | :{} -> :{} {} seq={} ack={}",
            tcp.src_port(),
            tcp.dst_port(),
            tcp.flags_string(),
            tcp.sequence_number(),
            tcp.ack_number()
        ));
    }

    if let Some(payload) = &packet.payload {
        if !payload.is_empty() {
            summary.push_str(&format!(" | payload: {} bytes", payload.len()));
        }
    }

    if packet.truncated {
        summary.push_str(" [truncated]");
    }
    if let Some(error) = &packet.error {
        summary.push_str(&format!(" ({})", error));
    }

    summary
}

/// Print a one-line summary of a decoded frame.
pub fn print_packet_summary(index: u64, frame: &Frame<'_>, packet: &DecodedPacket<'_>) {
    println!("{}", summary_line(index, frame, packet));
}

/// Print a detailed multi-line view of a decoded frame.
pub fn print_packet_detail(
    index: u64,
    frame: &Frame<'_>,
    packet: &DecodedPacket<'_>,
    payload_bytes: usize,
) {
    println!("{}", "=".repeat(80));
    println!(
        "#{:<6} {} bytes captured (wire: {})",
        index,
        frame.captured_len(),
        frame.wire_len()
    );
    println!("{}", "-".repeat(80));

    if let Some(eth) = &packet.ethernet {
        println!("  Ethernet:");
        println!("    Source:      {}", format_mac(&eth.src_mac()));
        println!("    Destination: {}", format_mac(&eth.dst_mac()));
        println!(
            "    EtherType:   {} (0x{:04x})",
            eth.ether_type(),
            eth.ether_type_raw()
        );
    }

    if let Some(ip) = &packet.ipv4 {
        println!("  IPv4:");
        println!("    Source:       {}", ip.src_addr());
        println!("    Destination:  {}", ip.dst_addr());
        println!("    Protocol:     {} ({})", ip.protocol(), ip.protocol_raw());
        println!("    TTL:          {}", ip.ttl());
        println!("    Total Length: {}", ip.total_length());
        println!("    Header Len:   {} ({} words)", ip.header_len(), ip.ihl());
        println!("    ID:           0x{:04x}", ip.identification());
    }

    if let Some(tcp) = &packet.tcp {
        println!("  TCP:");
        println!("    Source Port:  {}", tcp.src_port());
        println!("    Dest Port:    {}", tcp.dst_port());
        println!("    Seq:          {}", tcp.sequence_number());
        println!("    Ack:          {}", tcp.ack_number());
        println!("    Flags:        {}", tcp.flags_string());
        println!("    Window:       {}", tcp.window_size());
        println!(
            "    Data Offset:  {} ({} bytes)",
            tcp.data_offset(),
            tcp.header_len()
        );
    }

    if let Some(payload) = &packet.payload {
        if payload.is_empty() {
            println!("  Data: (none)");
        } else {
            println!(
                "  Data (max {} bytes): {}",
                payload_bytes,
                format_payload(payload.bytes(), payload_bytes)
            );
        }
    }

    if let Some(error) = &packet.error {
        println!("  [decode stopped: {}]", error);
    }
    println!();
}

/// Print the end-of-run counters.
pub fn print_run_summary(frames: u64, tcp_frames: u64, truncated: u64, malformed: u64) {
    println!();
    println!("{}", "=".repeat(50));
    println!("Decode complete.");
    println!("  Frames read:     {}", frames);
    println!("  TCP frames:      {}", tcp_frames);
    println!("  Truncated:       {}", truncated);
    println!("  Malformed:       {}", malformed);
    println!("{}", "=".repeat(50));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol;

    #[test]
    fn mac_formatting() {
        assert_eq!(
            format_mac(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            "aa:bb:cc:dd:ee:ff"
        );
        assert_eq!(
            format_mac(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]),
            "00:01:02:03:04:05"
        );
    }

    #[test]
    fn payload_formatting_caps_at_eight() {
        let data: Vec<u8> = (0..12).collect();
        let text = format_payload(&data, PAYLOAD_DISPLAY_BYTES);
        assert_eq!(text, "00 01 02 03 04 05 06 07 .. (4 more)");
    }

    #[test]
    fn payload_formatting_uncapped() {
        assert_eq!(format_payload(&[0xde, 0xad], 0), "de ad");
        assert_eq!(format_payload(&[], 8), "");
    }

    #[test]
    fn summary_includes_decoded_layers() {
        // Minimal TCP/IPv4 frame (the decoder tests cover field values; this
        // checks what the printer surfaces).
        let mut pkt = vec![0u8; 54];
        pkt[0..6].copy_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        pkt[6..12].copy_from_slice(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        pkt[12] = 0x08;
        pkt[14] = 0x45;
        pkt[16..18].copy_from_slice(&40u16.to_be_bytes());
        pkt[22] = 64;
        pkt[23] = 6;
        pkt[26..30].copy_from_slice(&[192, 168, 0, 1]);
        pkt[30..34].copy_from_slice(&[192, 168, 0, 2]);
        pkt[34..36].copy_from_slice(&443u16.to_be_bytes());
        pkt[36..38].copy_from_slice(&51000u16.to_be_bytes());
        pkt[46] = 0x50;

        let frame = protocol::Frame::new(&pkt, 54);
        let packet = protocol::decode(&frame);
        let line = summary_line(1, &frame, &packet);

        assert!(line.contains("11:22:33:44:55:66 -> aa:bb:cc:dd:ee:ff"));
        assert!(line.contains("192.168.0.1 -> 192.168.0.2"));
        assert!(line.contains(":443 -> :51000"));
        assert!(!line.contains("[truncated]"));
    }

    #[test]
    fn summary_marks_truncated_frames() {
        let pkt = [0u8; 10];
        let frame = protocol::Frame::new(&pkt, 10);
        let packet = protocol::decode(&frame);
        let line = summary_line(7, &frame, &packet);
        assert!(line.contains("[truncated]"));
        assert!(line.contains("need 14 bytes, have 10"));
    }
}
