//! ARP Packet Structure and Parsing

use bytes::Bytes;
use std::fmt;
use std::net::Ipv4Addr;

use arpscope_core::{Anomaly, Error, MacAddr, Result};
use arpscope_packet::EtherType;

/// Hardware types
pub const HTYPE_ETHERNET: u16 = 1;

/// Protocol types
pub const PTYPE_IPV4: u16 = 0x0800;

/// Operation codes
pub const OP_REQUEST: u16 = 1;
pub const OP_REPLY: u16 = 2;

/// Fixed ARP header size (htype, ptype, lengths, operation)
pub const ARP_FIXED_SIZE: usize = 8;

/// Canonical size of an Ethernet/IPv4 ARP packet
pub const ARP_ETHERNET_IPV4_SIZE: usize = 28;

/// Hardware type as a name or a raw passthrough value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareType {
    /// Ethernet (1)
    Ethernet,
    /// Any other hardware type
    Other(u16),
}

impl HardwareType {
    pub fn from_u16(value: u16) -> Self {
        if value == HTYPE_ETHERNET {
            Self::Ethernet
        } else {
            Self::Other(value)
        }
    }
}

impl fmt::Display for HardwareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareType::Ethernet => write!(f, "Ethernet"),
            HardwareType::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Semantic category of an ARP packet
///
/// Derived from the address fields as well as the raw operation code; see
/// [`ArpPacket::operation_class`] for the precedence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOperationClass {
    /// Sender and target describe the same host in both address spaces
    Announcement,
    /// Sender announces its own protocol address with a zeroed target MAC
    Gratuitous,
    /// Request for a zero target protocol address (address conflict detection)
    Probe,
    /// Plain request (operation 1)
    Request,
    /// Plain reply (operation 2)
    Reply,
    /// Operation code outside the known range
    Invalid,
}

impl fmt::Display for ArpOperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArpOperationClass::Announcement => "announcement",
            ArpOperationClass::Gratuitous => "gratuitous",
            ArpOperationClass::Probe => "probe",
            ArpOperationClass::Request => "request",
            ArpOperationClass::Reply => "reply",
            ArpOperationClass::Invalid => "invalid",
        };
        write!(f, "{}", name)
    }
}

/// A hardware address rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareAddr {
    /// Six bytes under hardware type 1, shown as a colon-separated MAC
    Mac(MacAddr),
    /// Anything else, kept as raw bytes
    Raw(Bytes),
}

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareAddr::Mac(mac) => write!(f, "{}", mac),
            HardwareAddr::Raw(bytes) => write_hex(f, bytes),
        }
    }
}

/// A protocol address rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolAddr {
    /// Four bytes under protocol type 0x0800, shown dotted-decimal
    Ipv4(Ipv4Addr),
    /// Anything else, kept as raw bytes
    Raw(Bytes),
}

impl fmt::Display for ProtocolAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolAddr::Ipv4(addr) => write!(f, "{}", addr),
            ProtocolAddr::Raw(bytes) => write_hex(f, bytes),
        }
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            write!(f, ":")?;
        }
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

/// ARP Packet
///
/// Address fields hold exactly as many bytes as the packet's own
/// `hardware_len` / `protocol_len` declare (clamped to the bytes actually
/// present). Semantic views are recomputed from these raw fields on every
/// call and are never cached.
#[derive(Debug, Clone)]
pub struct ArpPacket {
    /// Hardware type (1 for Ethernet)
    pub hardware_type: u16,
    /// Protocol type, in EtherType space (0x0800 for IPv4)
    pub protocol_type: u16,
    /// Hardware address length in bytes
    pub hardware_len: u8,
    /// Protocol address length in bytes
    pub protocol_len: u8,
    /// Raw operation code (1 request, 2 reply)
    pub operation: u16,
    /// Sender hardware address (`hardware_len` bytes)
    pub sender_hw_addr: Bytes,
    /// Sender protocol address (`protocol_len` bytes)
    pub sender_proto_addr: Bytes,
    /// Target hardware address (`hardware_len` bytes)
    pub target_hw_addr: Bytes,
    /// Target protocol address (`protocol_len` bytes)
    pub target_proto_addr: Bytes,
    /// Soft diagnostics raised while parsing
    pub anomalies: Vec<Anomaly>,
}

impl ArpPacket {
    /// Parse an ARP packet from an Ethernet payload
    ///
    /// Fails hard only when the 8 fixed header bytes are missing. A payload
    /// shorter than the canonical 28 bytes is recorded as an anomaly and
    /// parsed best-effort: the declared length fields decide how many bytes
    /// each address field wants, and truncated fields keep whatever bytes
    /// are present.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < ARP_FIXED_SIZE {
            return Err(Error::TooShort {
                len: data.len(),
                min: ARP_FIXED_SIZE,
            });
        }

        let mut anomalies = Vec::new();
        if data.len() < ARP_ETHERNET_IPV4_SIZE {
            anomalies.push(Anomaly::UndersizedArp { len: data.len() });
        }

        let hardware_type = u16::from_be_bytes([data[0], data[1]]);
        let protocol_type = u16::from_be_bytes([data[2], data[3]]);
        let hardware_len = data[4];
        let protocol_len = data[5];
        let operation = u16::from_be_bytes([data[6], data[7]]);

        // Each field's position depends on the lengths read above, so this
        // is a strictly forward cursor over the payload.
        let mut offset = ARP_FIXED_SIZE;
        let sender_hw_addr = take_field(data, &mut offset, hardware_len as usize);
        let sender_proto_addr = take_field(data, &mut offset, protocol_len as usize);
        let target_hw_addr = take_field(data, &mut offset, hardware_len as usize);
        let target_proto_addr = take_field(data, &mut offset, protocol_len as usize);

        // All-zero trailing bytes are link-layer padding; anything else is
        // data the packet did not declare.
        if offset < data.len() {
            let trailing = &data[offset..];
            if trailing.iter().any(|b| *b != 0) {
                anomalies.push(Anomaly::TrailingData {
                    data: trailing.to_vec(),
                });
            }
        }

        Ok(Self {
            hardware_type,
            protocol_type,
            hardware_len,
            protocol_len,
            operation,
            sender_hw_addr,
            sender_proto_addr,
            target_hw_addr,
            target_proto_addr,
            anomalies,
        })
    }

    /// Hardware type as a name or raw passthrough value
    pub fn hardware_type_name(&self) -> HardwareType {
        HardwareType::from_u16(self.hardware_type)
    }

    /// Protocol type resolved through the EtherType table, falling back to
    /// the raw value for unmapped types
    pub fn protocol_type_name(&self) -> EtherType {
        EtherType::from_u16(self.protocol_type)
    }

    /// Sender hardware address, as a MAC when this is an Ethernet packet
    pub fn sender_hw(&self) -> HardwareAddr {
        self.render_hw(&self.sender_hw_addr)
    }

    /// Target hardware address, as a MAC when this is an Ethernet packet
    pub fn target_hw(&self) -> HardwareAddr {
        self.render_hw(&self.target_hw_addr)
    }

    /// Sender protocol address, as an IPv4 address when the protocol type says so
    pub fn sender_proto(&self) -> ProtocolAddr {
        self.render_proto(&self.sender_proto_addr)
    }

    /// Target protocol address, as an IPv4 address when the protocol type says so
    pub fn target_proto(&self) -> ProtocolAddr {
        self.render_proto(&self.target_proto_addr)
    }

    fn render_hw(&self, raw: &Bytes) -> HardwareAddr {
        if self.hardware_type_name() == HardwareType::Ethernet {
            if let Some(mac) = MacAddr::from_slice(raw) {
                return HardwareAddr::Mac(mac);
            }
        }
        HardwareAddr::Raw(raw.clone())
    }

    fn render_proto(&self, raw: &Bytes) -> ProtocolAddr {
        if self.protocol_type_name() == EtherType::IPv4 && raw.len() == 4 {
            return ProtocolAddr::Ipv4(Ipv4Addr::new(raw[0], raw[1], raw[2], raw[3]));
        }
        ProtocolAddr::Raw(raw.clone())
    }

    /// Check if the raw operation code says request
    pub fn is_request(&self) -> bool {
        self.operation == OP_REQUEST
    }

    /// Check if the raw operation code says reply
    pub fn is_reply(&self) -> bool {
        self.operation == OP_REPLY
    }

    /// Classify the packet semantically
    ///
    /// The address-based rules come first and can override what the raw
    /// operation code would indicate, so the order here matters:
    ///
    /// 1. sender and target agree in both address spaces: announcement
    /// 2. target protocol address repeats the sender's and the target MAC
    ///    is all-zero: gratuitous
    /// 3. request for the zero protocol address: probe
    /// 4. plain request
    /// 5. plain reply
    /// 6. anything else: invalid
    pub fn operation_class(&self) -> ArpOperationClass {
        if self.target_proto_addr == self.sender_proto_addr
            && self.target_hw_addr == self.sender_hw_addr
        {
            return ArpOperationClass::Announcement;
        }

        if self.target_proto_addr == self.sender_proto_addr && is_zero(&self.target_hw_addr) {
            return ArpOperationClass::Gratuitous;
        }

        if self.operation == OP_REQUEST {
            if is_zero(&self.target_proto_addr) {
                return ArpOperationClass::Probe;
            }
            return ArpOperationClass::Request;
        }

        if self.operation == OP_REPLY {
            return ArpOperationClass::Reply;
        }

        ArpOperationClass::Invalid
    }
}

fn is_zero(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|b| *b == 0)
}

/// Slice `len` bytes at `*offset`, clamped to what the buffer holds, and
/// advance the cursor by the declared length either way.
fn take_field(data: &[u8], offset: &mut usize, len: usize) -> Bytes {
    let start = (*offset).min(data.len());
    let end = (*offset + len).min(data.len());
    *offset += len;
    Bytes::copy_from_slice(&data[start..end])
}
