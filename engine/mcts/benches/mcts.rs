//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying iteration counts
//! - Search from different game phases (opening, midgame, near-terminal)
//! - Tree operations (selection, backpropagation, re-rooting)
//! - Engine turns with and without tree reuse

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{GameState, PlayerId};
use games_tictactoe::State;
use mcts::{Engine, MctsConfig, MctsSearch, SearchBudget, SearchTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Tree rooted at `state` with `iterations` of search already done.
fn searched_tree(state: State, iterations: u32) -> SearchTree<State> {
    let mut tree = SearchTree::new(state, state.to_move().opponent());
    let config = MctsConfig::for_testing();
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    MctsSearch::new(&mut tree, &config, &mut rng)
        .unwrap()
        .run(SearchBudget::Iterations(iterations))
        .unwrap();
    tree
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_iterations");
    let config = MctsConfig::for_testing();

    for iters in [100u32, 400, 1_600, 6_400] {
        group.throughput(Throughput::Elements(iters as u64));
        group.bench_with_input(BenchmarkId::new("tictactoe", iters), &iters, |b, &iters| {
            b.iter(|| {
                let mut tree = SearchTree::new(State::new(), PlayerId::SECOND);
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&mut tree, &config, &mut rng).unwrap();
                black_box(search.run(SearchBudget::Iterations(iters)).unwrap().iterations)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Game Phase Benchmarks
// =============================================================================

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_phases");
    let config = MctsConfig::for_testing();
    let iters = 800u32;

    let phases: [(&str, &[u8]); 3] = [
        ("opening", &[]),
        ("midgame", &[4, 0, 8]),
        ("near_terminal", &[4, 0, 8, 2, 1, 7]),
    ];

    for (name, moves) in phases {
        let state = State::from_moves(moves);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut tree = SearchTree::new(state, state.to_move().opponent());
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&mut tree, &config, &mut rng).unwrap();
                black_box(search.run(SearchBudget::Iterations(iters)).unwrap().iterations)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_operations");
    let config = MctsConfig::for_testing();

    let tree = searched_tree(State::new(), 2_000);
    let root = tree.root();

    group.bench_function("select_child", |b| {
        b.iter(|| black_box(tree.select_child(root, config.exploration_constant)))
    });

    group.bench_function("backpropagate_deepest", |b| {
        let mut tree = tree.clone();
        let leaf = (0..tree.len() as u32)
            .map(mcts::NodeId)
            .max_by_key(|&id| {
                let mut depth = 0;
                let mut current = tree.get(id).parent;
                while current.is_some() {
                    depth += 1;
                    current = tree.get(current).parent;
                }
                depth
            })
            .unwrap();

        b.iter(|| tree.backpropagate(black_box(leaf), Some(PlayerId::FIRST), &config.rewards));
    });

    group.bench_function("reroot", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            let child = tree.get(tree.root()).children[0];
            tree.reroot(child);
            black_box(tree.len())
        })
    });

    group.finish();
}

// =============================================================================
// Engine Turn Benchmarks
// =============================================================================

fn bench_engine_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_turns");

    for persistent in [true, false] {
        let label = if persistent { "persistent" } else { "fresh" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let config = MctsConfig::for_testing()
                    .with_iterations(400)
                    .with_persistent(persistent);
                let mut x = Engine::with_seed(PlayerId::FIRST, config.clone(), 1);
                let mut o = Engine::with_seed(PlayerId::SECOND, config, 2);
                let mut state = State::new();

                while !state.is_over() {
                    let engine = if state.to_move() == PlayerId::FIRST {
                        &mut x
                    } else {
                        &mut o
                    };
                    let action = engine.choose_move(&state, None).unwrap();
                    state.apply(&action);
                }
                black_box(state.winner())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_game_phases,
    bench_tree_operations,
    bench_engine_turns,
);

criterion_main!(benches);
