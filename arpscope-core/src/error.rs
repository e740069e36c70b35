//! Error types for arpscope

use thiserror::Error;

/// Result type alias for arpscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for arpscope
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer too short to contain the minimum fixed-size header
    #[error("Buffer too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    /// Packet parsing error
    #[error("Packet parsing error: {0}")]
    PacketParsing(String),
}

impl Error {
    /// Create a packet parsing error with a custom message
    pub fn packet_parsing<S: Into<String>>(msg: S) -> Self {
        Error::PacketParsing(msg.into())
    }
}
