//! Demo: generate a Waxman random graph and search a corner-to-corner
//! low-weight path with the swarm.
//!
//! Set `RUST_LOG=swarm_path_core=debug` to watch the groups iterate.

use rand::rngs::StdRng;
use rand::SeedableRng;

use swarm_path::prelude::*;

const SIDE: usize = 10;
const ALPHA: f64 = 1.0;
const BETA: f64 = 0.2;
const WEIGHT_MIN: u8 = 10;
const WEIGHT_MAX: u8 = 100;
const GRAPH_SEED: u64 = 42;
const SEARCH_SEED: u64 = 1;

fn main() -> Result<(), SearchError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut rng = StdRng::seed_from_u64(GRAPH_SEED);
    let graph = Graph::waxman(&mut rng, SIDE, ALPHA, BETA, WEIGHT_MIN, WEIGHT_MAX)?;

    // Corner to corner across the grid.
    let task = Task::new(&graph, 0, graph.vertex_count() - 1)?;

    eprintln!("{}", graph.graphviz());

    let outcome = PathSearch::new()
        .groups(0)
        .total_particles(512)
        .iterations(200)
        .stagnation_limit(20)
        .seed(SEARCH_SEED)
        .run(&task)?;

    let mut stdout = std::io::stdout().lock();
    HistoryReport::new(&outcome, &graph).write_to(&mut stdout)?;

    Ok(())
}
