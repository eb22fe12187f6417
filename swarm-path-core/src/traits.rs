//! Seams between the algorithm core and its collaborators.

/// Best-effort propagation of improved solutions to peer processes.
///
/// A payload is the priority vector that produced an improved path plus
/// its weight. Delivery is fire-and-forget: sends are not acknowledged,
/// nothing is retried, ordering across senders is not guaranteed. The
/// receiver compensates by adopting only strictly better weights.
pub trait Gossip {
    /// Publish an improvement to every peer except the local one.
    ///
    /// Must not block the caller; failures are equivalent to message loss.
    fn publish(&mut self, priorities: &[f64], weight: u64);

    /// Take the next already-arrived payload, if any.
    ///
    /// Non-blocking poll: returns `None` immediately when the inbox is
    /// empty or the fabric is gone.
    fn try_next(&mut self) -> Option<(Vec<f64>, u64)>;
}

/// Null transport for single-process runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGossip;

impl Gossip for NoGossip {
    fn publish(&mut self, _priorities: &[f64], _weight: u64) {}

    fn try_next(&mut self) -> Option<(Vec<f64>, u64)> {
        None
    }
}
