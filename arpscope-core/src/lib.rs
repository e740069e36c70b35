//! arpscope Core Library
//!
//! This crate provides the error handling, soft-anomaly diagnostics, and
//! address types shared by the arpscope decoding crates.

pub mod anomaly;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use anomaly::Anomaly;
pub use error::{Error, Result};
pub use types::MacAddr;
