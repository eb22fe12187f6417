//! # swarm-path network
//!
//! Gossip transport for swarm-path.
//!
//! This crate provides:
//! - [`protocol`]: the postcard-encoded wire format for improved-solution
//!   broadcasts
//! - [`local`]: an in-process broadcast fabric over unbounded channels,
//!   implementing the core [`swarm_path_core::traits::Gossip`] seam
//!
//! Delivery is best-effort by design: frames to absent peers are dropped,
//! undecodable frames are skipped, nothing is retried or acknowledged.

pub mod local;
pub mod protocol;

pub use local::{GossipEndpoint, GossipHub};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::local::*;
    pub use crate::protocol::*;
}

/// Result type for network operations
pub type Result<T> = core::result::Result<T, Error>;

/// Network error types
#[derive(Debug)]
pub enum Error {
    /// Frame could not be encoded
    Encode(postcard::Error),
    /// Frame could not be decoded
    Decode(postcard::Error),
    /// Frame carries an unsupported protocol version
    VersionMismatch { got: u8 },
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Encode(e) => write!(f, "frame encoding failed: {}", e),
            Error::Decode(e) => write!(f, "frame decoding failed: {}", e),
            Error::VersionMismatch { got } => {
                write!(f, "unsupported protocol version {}", got)
            }
        }
    }
}
