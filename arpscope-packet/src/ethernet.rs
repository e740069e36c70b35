//! Ethernet frame parsing
//!
//! This module decodes Ethernet II frames as delivered by a capture layer:
//! the preamble, start-of-frame delimiter, and frame check sequence have
//! already been stripped, so a frame is the 14-byte header (18 bytes when an
//! 802.1Q tag is present) followed by the payload.

use bytes::Bytes;
use std::fmt;

use arpscope_core::{Anomaly, Error, MacAddr, Result};

/// 802.1Q Tag Protocol Identifier, found where EtherType normally sits
pub const DOT1Q_TPID: u16 = 0x8100;

/// Ethernet header size (dst + src + type/length)
pub const HEADER_SIZE: usize = 14;

/// Ethernet header size with an 802.1Q tag inserted
pub const TAGGED_HEADER_SIZE: usize = 18;

/// Minimum decodable frame: a full header plus at least one payload byte
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + 1;

/// Minimum decodable 802.1Q-tagged frame
pub const MIN_TAGGED_FRAME_SIZE: usize = TAGGED_HEADER_SIZE + 1;

/// EtherType values understood by the decoder
///
/// Values at or below 1500 are IEEE 802.3 length fields rather than protocol
/// identifiers; they are preserved as [`EtherType::Length`] so the declared
/// length can be checked against the actual payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    IPv4,
    /// ARP (0x0806)
    ARP,
    /// IPX (0x8137)
    IPX,
    /// IPv6 (0x86DD)
    IPv6,
    /// VLAN tag marker (0x8100)
    VLAN,
    /// IEEE 802.3 payload length field (value <= 1500)
    Length(u16),
    /// Any other EtherType
    Custom(u16),
}

impl EtherType {
    /// Create EtherType from the raw wire value
    pub fn from_u16(value: u16) -> Self {
        match value {
            v if v <= 1500 => EtherType::Length(v),
            0x0800 => EtherType::IPv4,
            0x0806 => EtherType::ARP,
            0x8100 => EtherType::VLAN,
            0x8137 => EtherType::IPX,
            0x86DD => EtherType::IPv6,
            v => EtherType::Custom(v),
        }
    }

    /// Convert EtherType back to the raw wire value
    pub fn to_u16(self) -> u16 {
        match self {
            EtherType::IPv4 => 0x0800,
            EtherType::ARP => 0x0806,
            EtherType::VLAN => 0x8100,
            EtherType::IPX => 0x8137,
            EtherType::IPv6 => 0x86DD,
            EtherType::Length(v) => v,
            EtherType::Custom(v) => v,
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::IPv4 => write!(f, "IPv4"),
            EtherType::ARP => write!(f, "ARP"),
            EtherType::VLAN => write!(f, "VLAN"),
            EtherType::IPX => write!(f, "IPX"),
            EtherType::IPv6 => write!(f, "IPv6"),
            EtherType::Length(v) => write!(f, "length {}", v),
            EtherType::Custom(v) => write!(f, "0x{:04x}", v),
        }
    }
}

/// A decoded Ethernet II frame
///
/// The input buffer is only borrowed for the duration of [`decode`]; the
/// frame owns its payload afterwards.
///
/// [`decode`]: EthernetFrame::decode
#[derive(Debug, Clone)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// Raw 802.1Q tag (TPID + TCI as one big-endian value), when present
    pub vlan_tag: Option<u32>,
    /// EtherType or length field
    pub ethertype: EtherType,
    /// Payload bytes following the header
    pub payload: Bytes,
    /// Soft diagnostics raised while decoding
    pub anomalies: Vec<Anomaly>,
}

impl EthernetFrame {
    /// Decode an Ethernet II frame from raw bytes
    ///
    /// Fails hard only when the buffer cannot hold the header plus one
    /// payload byte. An 802.1Q tag is detected by the reserved value 0x8100
    /// at offset 12 and kept as an opaque 32-bit field; the EtherType then
    /// moves to offset 16 and the payload to offset 18.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_FRAME_SIZE {
            return Err(Error::TooShort {
                len: data.len(),
                min: MIN_FRAME_SIZE,
            });
        }

        let mut destination = [0u8; 6];
        destination.copy_from_slice(&data[0..6]);
        let mut source = [0u8; 6];
        source.copy_from_slice(&data[6..12]);

        let marker = u16::from_be_bytes([data[12], data[13]]);

        let (vlan_tag, ethertype_raw, header_size) = if marker == DOT1Q_TPID {
            if data.len() < MIN_TAGGED_FRAME_SIZE {
                return Err(Error::TooShort {
                    len: data.len(),
                    min: MIN_TAGGED_FRAME_SIZE,
                });
            }
            let tag = u32::from_be_bytes([data[12], data[13], data[14], data[15]]);
            let ethertype = u16::from_be_bytes([data[16], data[17]]);
            (Some(tag), ethertype, TAGGED_HEADER_SIZE)
        } else {
            (None, marker, HEADER_SIZE)
        };

        let ethertype = EtherType::from_u16(ethertype_raw);
        let payload = Bytes::copy_from_slice(&data[header_size..]);

        let mut anomalies = Vec::new();
        if let EtherType::Length(declared) = ethertype {
            // The capture layer tends to leave 802.3 padding in place, so
            // the declared length and the delivered bytes can disagree.
            if declared as usize != payload.len() {
                anomalies.push(Anomaly::PayloadLengthMismatch {
                    declared,
                    actual: payload.len(),
                });
            }
        }

        Ok(Self {
            destination: MacAddr::new(destination),
            source: MacAddr::new(source),
            vlan_tag,
            ethertype,
            payload,
            anomalies,
        })
    }

    /// Header length in bytes: 14, or 18 when an 802.1Q tag is present
    pub fn header_size(&self) -> usize {
        if self.vlan_tag.is_some() {
            TAGGED_HEADER_SIZE
        } else {
            HEADER_SIZE
        }
    }

    /// Whether this frame carried an 802.1Q tag
    pub fn is_vlan_tagged(&self) -> bool {
        self.vlan_tag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_bytes(ethertype: u16, payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEADER_SIZE + payload.len());
        data.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]); // dst
        data.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]); // src
        data.extend_from_slice(&ethertype.to_be_bytes());
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_too_short_is_hard_error() {
        for len in 0..MIN_FRAME_SIZE {
            let data = vec![0u8; len];
            match EthernetFrame::decode(&data) {
                Err(Error::TooShort { min, .. }) => assert_eq!(min, MIN_FRAME_SIZE),
                other => panic!("expected TooShort for {} bytes, got {:?}", len, other),
            }
        }
        // One payload byte is enough
        assert!(EthernetFrame::decode(&vec![0u8; MIN_FRAME_SIZE]).is_ok());
    }

    #[test]
    fn test_decode_untagged() {
        let data = frame_bytes(0x0806, &[0x01, 0x02, 0x03, 0x04]);
        let frame = EthernetFrame::decode(&data).unwrap();

        assert_eq!(frame.destination.octets(), [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(frame.source.octets(), [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(frame.ethertype, EtherType::ARP);
        assert_eq!(frame.vlan_tag, None);
        assert_eq!(frame.header_size(), HEADER_SIZE);
        assert_eq!(&frame.payload[..], &[0x01, 0x02, 0x03, 0x04]);
        assert!(frame.anomalies.is_empty());
    }

    #[test]
    fn test_decode_vlan_tagged() {
        let mut data = Vec::new();
        data.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        data.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        data.extend_from_slice(&[0x81, 0x00, 0x00, 0x64]); // TPID + TCI (VLAN 100)
        data.extend_from_slice(&0x0806u16.to_be_bytes());
        data.extend_from_slice(&[0xde, 0xad]);

        let frame = EthernetFrame::decode(&data).unwrap();
        assert!(frame.is_vlan_tagged());
        assert_eq!(frame.vlan_tag, Some(0x8100_0064));
        assert_eq!(frame.ethertype, EtherType::ARP);
        assert_eq!(frame.header_size(), TAGGED_HEADER_SIZE);
        assert_eq!(&frame.payload[..], &[0xde, 0xad]);
    }

    #[test]
    fn test_tagged_frame_too_short() {
        // 0x8100 marker but not enough bytes for the 18-byte header + payload
        let mut data = frame_bytes(DOT1Q_TPID, &[0x00, 0x64]);
        data.truncate(16);
        match EthernetFrame::decode(&data) {
            Err(Error::TooShort { min, .. }) => assert_eq!(min, MIN_TAGGED_FRAME_SIZE),
            other => panic!("expected TooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_length_field_mismatch_is_soft() {
        // Declared 802.3 length 46 but only 4 payload bytes present
        let data = frame_bytes(46, &[0x01, 0x02, 0x03, 0x04]);
        let frame = EthernetFrame::decode(&data).unwrap();

        assert_eq!(frame.ethertype, EtherType::Length(46));
        assert_eq!(
            frame.anomalies,
            vec![Anomaly::PayloadLengthMismatch {
                declared: 46,
                actual: 4
            }]
        );
    }

    #[test]
    fn test_length_field_match_is_clean() {
        let data = frame_bytes(4, &[0x01, 0x02, 0x03, 0x04]);
        let frame = EthernetFrame::decode(&data).unwrap();
        assert!(frame.anomalies.is_empty());
    }

    #[test]
    fn test_unknown_ethertype_passes_payload_through() {
        let data = frame_bytes(0x88b5, &[0x10, 0x20, 0x30]);
        let frame = EthernetFrame::decode(&data).unwrap();

        assert_eq!(frame.ethertype, EtherType::Custom(0x88b5));
        assert_eq!(&frame.payload[..], &[0x10, 0x20, 0x30]);
        assert!(frame.anomalies.is_empty());
    }

    #[test]
    fn test_ethertype_conversion() {
        assert_eq!(EtherType::from_u16(0x0800), EtherType::IPv4);
        assert_eq!(EtherType::from_u16(0x0806), EtherType::ARP);
        assert_eq!(EtherType::from_u16(0x8100), EtherType::VLAN);
        assert_eq!(EtherType::from_u16(1500), EtherType::Length(1500));
        assert_eq!(EtherType::from_u16(0x88b5), EtherType::Custom(0x88b5));
        assert_eq!(EtherType::ARP.to_u16(), 0x0806);
        assert_eq!(EtherType::Length(64).to_u16(), 64);
    }
}
