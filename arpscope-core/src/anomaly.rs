//! Soft decode anomalies
//!
//! Anomalies are warning-level diagnostics: decoding still completes and
//! returns a best-effort record that carries them. Hard failures use
//! [`crate::Error`] instead.

use std::fmt;

/// A non-fatal irregularity observed while decoding a frame or packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// EtherType declared a payload length that differs from the bytes present
    PayloadLengthMismatch { declared: u16, actual: usize },
    /// ARP payload shorter than the canonical Ethernet/IPv4 size
    UndersizedArp { len: usize },
    /// Non-zero bytes found after the last ARP address field
    TrailingData { data: Vec<u8> },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::PayloadLengthMismatch { declared, actual } => write!(
                f,
                "Ethernet frame payload length mismatch ({}/{})",
                declared, actual
            ),
            Anomaly::UndersizedArp { len } => {
                write!(f, "Incorrect byte length ({}) for an ARP packet", len)
            }
            Anomaly::TrailingData { data } => {
                write!(f, "Additional non-zero data after ARP address fields:")?;
                for byte in data {
                    write!(f, " {:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_mismatch_display() {
        let anomaly = Anomaly::PayloadLengthMismatch {
            declared: 46,
            actual: 28,
        };
        assert_eq!(
            format!("{}", anomaly),
            "Ethernet frame payload length mismatch (46/28)"
        );
    }

    #[test]
    fn test_trailing_data_display() {
        let anomaly = Anomaly::TrailingData {
            data: vec![0x00, 0xde, 0xad],
        };
        let display = format!("{}", anomaly);
        assert!(display.ends_with("00 de ad"));
    }
}
