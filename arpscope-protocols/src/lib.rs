//! Protocol modules for arpscope
//!
//! Currently this is ARP only; payloads of any other EtherType pass
//! through the frame decoder untouched.

pub mod arp;

pub use arp::{ArpMonitor, ArpOperationClass, ArpPacket, WatchEvent, WatchRule};
