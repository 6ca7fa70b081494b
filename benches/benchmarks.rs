//! Performance benchmarks for bfind

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bfind::test_utils::TestTree;
use bfind::{FilterSet, WalkConfig, WalkEvent, Walker};

/// Build a tree with `dirs` directories of `files_per_dir` files each.
fn build_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    for d in 0..dirs {
        for f in 0..files_per_dir {
            tree.add_file(&format!("dir{d}/file_{f:04}.txt"), "");
        }
    }
    tree
}

fn bench_walker(c: &mut Criterion) {
    let small = build_tree(10, 10);
    let large = build_tree(50, 100);

    c.bench_function("walk_100_entries", |b| {
        b.iter(|| {
            let walker = Walker::new(small.path(), WalkConfig::default()).unwrap();
            black_box(walker.count())
        })
    });

    c.bench_function("walk_5000_entries", |b| {
        b.iter(|| {
            let walker = Walker::new(large.path(), WalkConfig::default()).unwrap();
            black_box(walker.count())
        })
    });

    c.bench_function("walk_5000_entries_depth_capped", |b| {
        b.iter(|| {
            let config = WalkConfig {
                max_depth: Some(1),
                ..Default::default()
            };
            let walker = Walker::new(large.path(), config).unwrap();
            black_box(walker.count())
        })
    });
}

fn bench_filter(c: &mut Criterion) {
    let set = FilterSet::new(
        &["ab".to_string(), "cd".to_string()],
        &["tmp".to_string()],
        false,
    )
    .unwrap();
    let basenames: Vec<String> = (0..1000)
        .map(|i| format!("0aB{i}cD_file_{i}.txt"))
        .collect();

    c.bench_function("filter_accept_1000", |b| {
        b.iter(|| {
            for name in &basenames {
                black_box(set.accept(name));
            }
        })
    });

    c.bench_function("filter_accept_with_spans_1000", |b| {
        b.iter(|| {
            for name in &basenames {
                black_box(set.accept_with_spans(name));
            }
        })
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let tree = build_tree(20, 50);
    let set = FilterSet::new(&["file".to_string()], &[], false).unwrap();

    c.bench_function("walk_and_filter_1000", |b| {
        b.iter(|| {
            let walker = Walker::new(tree.path(), WalkConfig::default()).unwrap();
            let accepted = walker
                .filter_map(|event| match event {
                    WalkEvent::Entry(e) => Some(e),
                    WalkEvent::Error(_) => None,
                })
                .filter(|e| set.accept(&e.basename()))
                .count();
            black_box(accepted)
        })
    });
}

criterion_group!(benches, bench_walker, bench_filter, bench_end_to_end);
criterion_main!(benches);
