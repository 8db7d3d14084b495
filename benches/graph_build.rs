//! Benchmarks for graph construction and rendering.
//!
//! These benchmarks measure the performance of:
//! - Graph building (admission plus reciprocal edge wiring)
//! - Label-dedup admission (the linear label scan)
//! - Note and edge iteration
//! - Document rendering to strings

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use notegraph::graph::NoteGraph;
use notegraph::types::NoteId;

/// Build a chain: note_0 - note_1 - ... - note_n
fn build_linear_graph(note_count: usize) -> NoteGraph {
    let mut graph = NoteGraph::new("bench-vault");

    let ids: Vec<NoteId> = (0..note_count)
        .map(|i| graph.create_node(format!("note_{i}"), ""))
        .collect();

    for pair in ids.windows(2) {
        graph.connect(pair[0], pair[1]).expect("ids are live");
    }

    graph
}

/// Build a hub with `width` spokes, the shape feed ingestion produces.
fn build_star_graph(width: usize) -> NoteGraph {
    let mut graph = NoteGraph::new("bench-vault");
    let hub = graph.create_node("hub", "");

    for i in 0..width {
        let spoke = graph.create_node(format!("spoke_{i}"), "spokes");
        graph.connect(hub, spoke).expect("ids are live");
    }

    graph
}

/// Build a dense actor/technique cluster where every actor links every
/// technique; readmissions hit the dedup path and the idempotent-edge check.
fn build_clustered_graph(actors: usize, techniques: usize) -> NoteGraph {
    let mut graph = NoteGraph::new("bench-vault");

    for a in 0..actors {
        let actor = graph.create_node(format!("actor_{a}"), "");
        for t in 0..techniques {
            let technique = graph.create_node(format!("technique_{t}"), "techniques");
            graph.connect(actor, technique).expect("ids are live");
        }
    }

    graph
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [10, 50, 100, 200] {
        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, &size| {
            b.iter(|| build_linear_graph(size));
        });
    }

    for width in [10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("star", width), &width, |b, &width| {
            b.iter(|| build_star_graph(width));
        });
    }

    for (actors, techniques) in [(10, 5), (50, 5), (10, 20)] {
        group.bench_with_input(
            BenchmarkId::new("clustered", format!("{actors}x{techniques}")),
            &(actors, techniques),
            |b, &(actors, techniques)| {
                b.iter(|| build_clustered_graph(actors, techniques));
            },
        );
    }

    group.finish();
}

fn bench_dedup_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup_admission");

    // Readmit every label of an existing graph; each call is a miss-free
    // linear scan ending in a dedup hit.
    for size in [10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("readmit", size), &size, |b, &size| {
            let mut graph = build_linear_graph(size);
            b.iter(|| {
                for i in 0..size {
                    graph.create_node(format!("note_{i}"), "");
                }
                graph.len()
            });
        });
    }

    group.finish();
}

fn bench_iterators(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_iterators");

    for size in [10, 50, 100] {
        let graph = build_linear_graph(size);

        group.bench_with_input(BenchmarkId::new("notes_iter", size), &graph, |b, graph| {
            b.iter(|| graph.notes().count());
        });

        group.bench_with_input(BenchmarkId::new("edges_iter", size), &graph, |b, graph| {
            b.iter(|| graph.edges().count());
        });
    }

    for width in [10, 100] {
        let graph = build_star_graph(width);
        let hub = graph.find_node("hub").expect("hub exists");

        group.bench_with_input(
            BenchmarkId::new("siblings_of_hub", width),
            &graph,
            |b, graph| {
                b.iter(|| graph.siblings(hub).count());
            },
        );
    }

    group.finish();
}

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("documents");

    for size in [10, 50, 100] {
        let graph = build_star_graph(size);

        group.bench_with_input(
            BenchmarkId::new("render_all_to_strings", size),
            &graph,
            |b, graph| {
                b.iter(|| {
                    graph
                        .notes()
                        .filter_map(|(id, _)| graph.document(id))
                        .map(|document| document.len())
                        .sum::<usize>()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_graph_build,
    bench_dedup_admission,
    bench_iterators,
    bench_documents,
);

criterion_main!(benches);
