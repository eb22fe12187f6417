//! Plain-text run report: per-group improvement history plus the winner.
//!
//! Intentionally offline-first: renders from an already-finished
//! [`RunOutcome`], no live hooks into the workers.

use std::fmt::Write as _;
use std::io;

use swarm_path_core::graph::Graph;
use swarm_path_core::runner::RunOutcome;

/// Report over a finished run.
#[derive(Debug)]
pub struct HistoryReport<'a> {
    outcome: &'a RunOutcome,
    graph: &'a Graph,
}

impl<'a> HistoryReport<'a> {
    pub fn new(outcome: &'a RunOutcome, graph: &'a Graph) -> Self {
        Self { outcome, graph }
    }

    /// Render the report as text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        match &self.outcome.best {
            Some(best) => {
                let _ = writeln!(out, "best path: {}", best.dump(self.graph));
            }
            None => {
                let _ = writeln!(out, "best path: none found");
            }
        }

        for (group_id, history) in self.outcome.histories.iter().enumerate() {
            let _ = writeln!(out, "group {} ({} improvements):", group_id, history.len());
            for entry in history {
                let _ = writeln!(
                    out,
                    "  +{:>8.3}ms  iteration {:>4}  weight {}",
                    entry.elapsed.as_secs_f64() * 1e3,
                    entry.iteration,
                    entry.weight
                );
            }
        }

        out
    }

    /// Write the rendered report to any writer.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }
}
