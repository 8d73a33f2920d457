// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use wayfinder_model::fixtures::{BinaryTree, Slide, SlidingPuzzle};
use wayfinder_search::monitor::no_op::NoOperationMonitor;
use wayfinder_solver::{SolverBuilder, SolverKind};

fn scrambled_puzzle() -> SlidingPuzzle {
    let slides = [
        Slide::Up,
        Slide::Left,
        Slide::Up,
        Slide::Left,
        Slide::Down,
        Slide::Right,
        Slide::Down,
        Slide::Left,
        Slide::Up,
        Slide::Right,
        Slide::Up,
        Slide::Left,
    ];
    SlidingPuzzle::scrambled(3, 3, &slides)
}

fn bench_sliding_puzzle(c: &mut Criterion) {
    let puzzle = scrambled_puzzle();
    let mut group = c.benchmark_group("sliding_puzzle_3x3");
    group.sample_size(20);

    for kind in SolverKind::ALL {
        let mut engine = SolverBuilder::new(kind)
            .build()
            .expect("default configuration is valid");

        group.bench_with_input(BenchmarkId::from_parameter(kind), &puzzle, |b, puzzle| {
            b.iter(|| {
                let mut monitor = NoOperationMonitor::new();
                let outcome = engine.solve_weighted(black_box(puzzle), &mut monitor);
                if !outcome.is_solved() {
                    panic!("Benchmark configuration error: {} found no solution.", kind);
                }
                outcome
            })
        });
    }
    group.finish();
}

fn bench_depth_breadth_factor(c: &mut Criterion) {
    // The goal is the last leaf a depth-first search reaches.
    let tree = BinaryTree::new(16, (1 << 16) - 1);
    let mut group = c.benchmark_group("binary_tree_16_depth_breadth");
    group.sample_size(20);
    group.throughput(Throughput::Elements(tree.num_nodes()));

    for factor in [0.0, 0.1, 0.4, 0.7, 1.0] {
        let mut engine = SolverBuilder::new(SolverKind::Concurrent)
            .with_depth_breadth_factor(factor)
            .with_queue_capacity(1 << 18)
            .build()
            .expect("factor is within [0, 1]");

        group.bench_with_input(BenchmarkId::from_parameter(factor), &tree, |b, tree| {
            b.iter(|| engine.solve(black_box(tree), &mut NoOperationMonitor::new()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sliding_puzzle, bench_depth_breadth_factor);
criterion_main!(benches);
