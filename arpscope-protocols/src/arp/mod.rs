//! ARP (Address Resolution Protocol) decoding and observation
//!
//! This module parses ARP packets out of Ethernet payloads, classifies the
//! operation semantically (request, reply, probe, announcement, gratuitous),
//! and tracks decoded traffic for watch rules and statistics.
//!
//! ## ARP Packet Format
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      Hardware Type (HTYPE)    |       Protocol Type (PTYPE)   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  HW Addr Len  |Proto Addr Len |         Operation (OPER)      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Sender Hardware Address (HW Addr Len bytes)          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |        Sender Protocol Address (Proto Addr Len bytes)         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Target Hardware Address (HW Addr Len bytes)          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |        Target Protocol Address (Proto Addr Len bytes)         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The four address fields are variable-length: their widths come from the
//! HW Addr Len and Proto Addr Len bytes in the same packet, not from any
//! fixed constant.

pub mod monitor;
pub mod packet;

pub use monitor::{ArpCacheEntry, ArpMonitor, ArpStats, WatchEvent, WatchRule};
pub use packet::{ArpOperationClass, ArpPacket, HardwareAddr, HardwareType, ProtocolAddr};
