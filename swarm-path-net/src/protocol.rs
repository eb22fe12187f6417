//! Wire format for improved-solution broadcasts.
//!
//! A frame carries the priority vector that produced an improved path
//! plus its weight. Receivers re-decode the priorities against their own
//! copy of the graph, so the vertex sequence itself never travels.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One improved-solution broadcast frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPathMessage {
    /// Protocol version; frames from other versions are dropped
    pub version: u8,
    /// Sender's peer rank
    pub sender: u32,
    /// Priority vector that produced the improved path
    pub priorities: Vec<f64>,
    /// Advertised path weight (receivers recompute the literal sum)
    pub weight: u64,
}

impl BestPathMessage {
    /// Current protocol version
    pub const CURRENT_VERSION: u8 = 1;

    pub fn new(sender: u32, priorities: Vec<f64>, weight: u64) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            sender,
            priorities,
            weight,
        }
    }

    /// Serialize the frame to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(Error::Encode)
    }

    /// Deserialize a frame, rejecting foreign protocol versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let message: Self = postcard::from_bytes(bytes).map_err(Error::Decode)?;
        if message.version != Self::CURRENT_VERSION {
            return Err(Error::VersionMismatch {
                got: message.version,
            });
        }
        Ok(message)
    }
}
