use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridtree::{GridTree, LevelMap, RefinePolicy, TreeConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EXTENT: usize = 128;
const MAX_LEVEL: i32 = 8;

fn hotspot_levels() -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(1);
    let mut levels = vec![0; EXTENT * EXTENT];
    for _ in 0..32 {
        let x = rng.gen_range(0..EXTENT);
        let y = rng.gen_range(0..EXTENT);
        levels[x + EXTENT * y] = rng.gen_range(1..=MAX_LEVEL);
    }
    levels
}

fn tree_pass_benchmark(c: &mut Criterion) {
    let levels = hotspot_levels();
    let mut group = c.benchmark_group("tree_passes");

    for (name, policy) in [
        ("full", RefinePolicy::Full),
        ("partial", RefinePolicy::Partial),
    ] {
        let map = LevelMap::new(&levels, EXTENT, EXTENT).unwrap();

        group.bench_function(format!("refine_{}", name), |b| {
            b.iter(|| {
                let mut tree = GridTree::new(TreeConfig {
                    policy,
                    max_level: MAX_LEVEL,
                })
                .unwrap();
                black_box(tree.refine(black_box(&map)));
                tree
            })
        });

        group.bench_function(format!("balance_to_fixed_point_{}", name), |b| {
            b.iter(|| {
                let mut tree = GridTree::new(TreeConfig {
                    policy,
                    max_level: MAX_LEVEL,
                })
                .unwrap();
                tree.refine(&map);
                while tree.balance_pass() {}
                black_box(tree.num_nodes())
            })
        });

        group.bench_function(format!("optimize_to_fixed_point_{}", name), |b| {
            b.iter(|| {
                let mut tree = GridTree::new(TreeConfig {
                    policy,
                    max_level: MAX_LEVEL,
                })
                .unwrap();
                tree.refine(&map);
                while tree.balance_pass() {}
                while tree.optimize_pass() {}
                black_box(tree.num_nodes())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, tree_pass_benchmark);
criterion_main!(benches);
