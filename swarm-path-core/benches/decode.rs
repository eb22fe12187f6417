use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use swarm_path_core::graph::Graph;
use swarm_path_core::path::decode;
use swarm_path_core::task::Task;

fn bench_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let graph = Graph::waxman(&mut rng, 10, 1.0, 0.3, 10, 100).expect("valid waxman parameters");
    let task = Task::new(&graph, 0, graph.vertex_count() - 1).expect("valid endpoints");
    let priorities: Vec<f64> = (0..graph.vertex_count()).map(|_| rng.gen()).collect();

    c.bench_function("decode_waxman_10x10", |b| {
        b.iter(|| decode(black_box(&task), black_box(&priorities)))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
