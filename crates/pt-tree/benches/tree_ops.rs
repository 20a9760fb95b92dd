//! Benchmarks for path tree operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pt_tree::PathTree;

/// Build a path of `depth` directories ending in `page.html`.
fn deep_path(depth: usize) -> String {
    let mut path = String::new();
    for i in 0..depth {
        path.push_str(&format!("/section-{i}"));
    }
    path.push_str("/page.html");
    path
}

/// Populate a tree with `breadth` children per level down to `depth`.
fn populate(tree: &mut PathTree<usize>, prefix: &str, depth: usize, breadth: usize) {
    if depth == 0 {
        return;
    }
    for i in 0..breadth {
        let dir = format!("{prefix}/section-{i}");
        tree.add(&format!("{dir}.html"), depth);
        populate(tree, &dir, depth - 1, breadth);
    }
}

fn bench_repeated_add(c: &mut Criterion) {
    c.bench_function("add_same_path_x1000", |b| {
        b.iter(|| {
            let mut tree = PathTree::new();
            for i in 0..1000 {
                tree.add("/blog/posts/hello.html", i);
            }
            tree
        });
    });
}

fn bench_deep_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_deep");

    for depth in [1, 4, 16, 64] {
        let path = deep_path(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &path, |b, path| {
            b.iter(|| {
                let mut tree = PathTree::new();
                tree.add(path, ());
                tree
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut tree = PathTree::new();
    populate(&mut tree, "", 4, 5);

    let mut group = c.benchmark_group("lookup");

    group.bench_function("get_resource_hit", |b| {
        b.iter(|| tree.get_resource("/section-1/section-2/section-3.html"));
    });

    group.bench_function("get_resource_miss", |b| {
        b.iter(|| tree.get_resource("/section-1/missing/page.html"));
    });

    group.bench_function("get_hit", |b| {
        b.iter(|| tree.get("/section-4/section-4/section-4/section-4"));
    });

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for (depth, breadth) in [(2, 5), (3, 4), (4, 3)] {
        let mut tree = PathTree::new();
        populate(&mut tree, "", depth, breadth);

        group.bench_with_input(
            BenchmarkId::new("resources", format!("d{depth}_b{breadth}")),
            &tree,
            |b, tree| b.iter(|| tree.root().resources().count()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_repeated_add,
    bench_deep_add,
    bench_lookup,
    bench_traversal
);
criterion_main!(benches);
