//! Link-layer decoding for arpscope
//!
//! This crate turns one captured link-layer frame into a structured
//! [`EthernetFrame`]: destination and source hardware addresses, an optional
//! 802.1Q VLAN tag, the resolved [`EtherType`], and the remaining payload
//! bytes. Payload protocols other than ARP are left as opaque byte
//! sequences for the caller.

pub mod ethernet;

// Re-export commonly used types for convenience
pub use ethernet::{EtherType, EthernetFrame, DOT1Q_TPID, HEADER_SIZE, TAGGED_HEADER_SIZE};
