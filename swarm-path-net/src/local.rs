//! In-process gossip fabric over unbounded channels.
//!
//! Stands in for an inter-process transport: every peer gets an endpoint
//! with one inbox and a sender handle per peer. Publishing fans the frame
//! out to everyone except the local rank; a peer whose inbox is gone just
//! misses the frame.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use swarm_path_core::traits::Gossip;

use crate::protocol::BestPathMessage;

/// Namespace for building sets of interconnected [`GossipEndpoint`]s.
#[derive(Debug)]
pub struct GossipHub;

impl GossipHub {
    /// Create a fully-connected fabric of `peer_count` endpoints.
    pub fn fabric(peer_count: usize) -> Vec<GossipEndpoint> {
        let mut senders = Vec::with_capacity(peer_count);
        let mut inboxes = Vec::with_capacity(peer_count);
        for _ in 0..peer_count {
            let (tx, rx) = unbounded_channel();
            senders.push(tx);
            inboxes.push(rx);
        }

        inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| GossipEndpoint {
                rank: rank as u32,
                peers: senders.clone(),
                inbox,
            })
            .collect()
    }
}

/// One peer's handle on the fabric.
#[derive(Debug)]
pub struct GossipEndpoint {
    rank: u32,
    peers: Vec<UnboundedSender<Vec<u8>>>,
    inbox: UnboundedReceiver<Vec<u8>>,
}

impl GossipEndpoint {
    /// This endpoint's rank on the fabric
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Number of peers on the fabric, the local rank included
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }
}

impl Gossip for GossipEndpoint {
    fn publish(&mut self, priorities: &[f64], weight: u64) {
        let message = BestPathMessage::new(self.rank, priorities.to_vec(), weight);
        let Ok(bytes) = message.to_bytes() else {
            // Equivalent to message loss on a real transport.
            return;
        };

        for (rank, peer) in self.peers.iter().enumerate() {
            if rank as u32 == self.rank {
                continue;
            }
            // A closed inbox means the peer is gone; not our problem.
            let _ = peer.send(bytes.clone());
        }
        trace!(sender = self.rank, weight, "published best path frame");
    }

    fn try_next(&mut self) -> Option<(Vec<f64>, u64)> {
        loop {
            let bytes = match self.inbox.try_recv() {
                Ok(bytes) => bytes,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            };
            match BestPathMessage::from_bytes(&bytes) {
                Ok(message) => {
                    trace!(
                        receiver = self.rank,
                        sender = message.sender,
                        weight = message.weight,
                        "received best path frame"
                    );
                    return Some((message.priorities, message.weight));
                }
                Err(error) => {
                    // Skip the bad frame, keep draining.
                    trace!(receiver = self.rank, %error, "dropping malformed frame");
                }
            }
        }
    }
}
