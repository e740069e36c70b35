//! ARP traffic observation
//!
//! [`ArpMonitor`] sits between an external capture loop and an external
//! notification sink: it is handed one raw frame at a time, runs the
//! Ethernet and ARP decoders, keeps statistics and a sender cache, and
//! evaluates watch rules. It never performs I/O itself; a matched rule is
//! returned as a [`WatchEvent`] for the caller to deliver.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use arpscope_core::{MacAddr, Result};
use arpscope_packet::{EtherType, EthernetFrame};

use super::packet::{ArpOperationClass, ArpPacket, HardwareAddr, ProtocolAddr};

/// ARP traffic statistics
#[derive(Debug, Clone, Default)]
pub struct ArpStats {
    /// Frames handed to the monitor, whether or not they decoded
    pub frames_received: u64,
    /// Frames whose payload parsed as ARP
    pub packets_parsed: u64,
    /// Hard decode or parse failures
    pub parse_errors: u64,
    /// Soft anomalies reported by either decoder
    pub anomalies_seen: u64,
    pub requests_seen: u64,
    pub replies_seen: u64,
    pub probes_seen: u64,
    pub announcements_seen: u64,
    pub gratuitous_seen: u64,
    pub invalid_seen: u64,
}

/// Cache entry mapping a sender's IPv4 address to its MAC
#[derive(Debug, Clone)]
pub struct ArpCacheEntry {
    pub mac_addr: MacAddr,
    pub last_seen: DateTime<Utc>,
}

/// A hardware address pair to watch for
///
/// Matches on the packet's raw sender and target hardware addresses; a
/// match produces the rule's event identifier.
#[derive(Debug, Clone)]
pub struct WatchRule {
    pub sender: MacAddr,
    pub target: MacAddr,
    pub event: String,
}

impl WatchRule {
    pub fn new(sender: MacAddr, target: MacAddr, event: impl Into<String>) -> Self {
        Self {
            sender,
            target,
            event: event.into(),
        }
    }

    fn matches(&self, packet: &ArpPacket) -> bool {
        packet.sender_hw_addr.as_ref() == self.sender.as_bytes()
            && packet.target_hw_addr.as_ref() == self.target.as_bytes()
    }
}

/// An event produced by a matched watch rule, for an external consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub event: String,
    pub timestamp: DateTime<Utc>,
}

/// Synchronous ARP traffic monitor
///
/// Owns no I/O and holds no locks; the external capture loop drives it one
/// frame at a time through [`handle_frame`].
///
/// [`handle_frame`]: ArpMonitor::handle_frame
#[derive(Debug, Default)]
pub struct ArpMonitor {
    stats: ArpStats,
    cache: HashMap<Ipv4Addr, ArpCacheEntry>,
    rules: Vec<WatchRule>,
}

impl ArpMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a watch rule; rules are evaluated in insertion order
    pub fn watch(&mut self, rule: WatchRule) {
        self.rules.push(rule);
    }

    /// Decode one captured frame and run it through stats, cache, and rules
    ///
    /// Returns the first matching watch event, `Ok(None)` for everything
    /// else that decodes, and a hard error only when the frame is too short
    /// to carry an Ethernet header. ARP payloads that fail to parse are
    /// counted and logged, not propagated.
    pub fn handle_frame(&mut self, data: &[u8]) -> Result<Option<WatchEvent>> {
        self.stats.frames_received += 1;

        let frame = match EthernetFrame::decode(data) {
            Ok(frame) => frame,
            Err(err) => {
                self.stats.parse_errors += 1;
                return Err(err);
            }
        };

        for anomaly in &frame.anomalies {
            self.stats.anomalies_seen += 1;
            warn!("{}", anomaly);
        }

        if frame.ethertype != EtherType::ARP {
            debug!("ignoring {} frame", frame.ethertype);
            return Ok(None);
        }

        let packet = match ArpPacket::parse(&frame.payload) {
            Ok(packet) => packet,
            Err(err) => {
                self.stats.parse_errors += 1;
                warn!("unparseable ARP payload from {}: {}", frame.source, err);
                return Ok(None);
            }
        };
        self.stats.packets_parsed += 1;

        for anomaly in &packet.anomalies {
            self.stats.anomalies_seen += 1;
            warn!("{}", anomaly);
        }

        match packet.operation_class() {
            ArpOperationClass::Announcement => self.stats.announcements_seen += 1,
            ArpOperationClass::Gratuitous => self.stats.gratuitous_seen += 1,
            ArpOperationClass::Probe => self.stats.probes_seen += 1,
            ArpOperationClass::Request => self.stats.requests_seen += 1,
            ArpOperationClass::Reply => self.stats.replies_seen += 1,
            ArpOperationClass::Invalid => self.stats.invalid_seen += 1,
        }

        if let (HardwareAddr::Mac(mac), ProtocolAddr::Ipv4(ip)) =
            (packet.sender_hw(), packet.sender_proto())
        {
            self.cache.insert(
                ip,
                ArpCacheEntry {
                    mac_addr: mac,
                    last_seen: Utc::now(),
                },
            );
        }

        for rule in &self.rules {
            if rule.matches(&packet) {
                debug!("watch rule matched: {}", rule.event);
                return Ok(Some(WatchEvent {
                    event: rule.event.clone(),
                    timestamp: Utc::now(),
                }));
            }
        }

        Ok(None)
    }

    pub fn stats(&self) -> &ArpStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ArpStats::default();
    }

    /// Look up the cached MAC for an IPv4 address seen as an ARP sender
    pub fn lookup(&self, addr: &Ipv4Addr) -> Option<&ArpCacheEntry> {
        self.cache.get(addr)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
