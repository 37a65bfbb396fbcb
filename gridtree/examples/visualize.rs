//! Build a tree over a procedural target map, smooth and compact it, and
//! print the rasterized resolution structure as ASCII shades.
//!
//! Run with `RUST_LOG=debug` to see per-pass diagnostics.

use gridtree::{GridTree, ImageView, LevelMap, Region, RefinePolicy, TreeConfig};

const EXTENT: usize = 64;
const MAX_LEVEL: i32 = 6;
const SHADES: &[u8] = b" .:-=+*#%@";

fn main() {
    env_logger::init();

    // demand resolution along a diagonal band
    let mut levels = vec![0; EXTENT * EXTENT];
    for i in 0..EXTENT {
        levels[i + EXTENT * i] = MAX_LEVEL;
        if i + 1 < EXTENT {
            levels[i + 1 + EXTENT * i] = MAX_LEVEL / 2;
        }
    }
    let map = LevelMap::new(&levels, EXTENT, EXTENT).expect("map extent matches buffer");

    let mut tree = GridTree::new(TreeConfig {
        policy: RefinePolicy::Partial,
        max_level: MAX_LEVEL,
    })
    .expect("valid config");

    let depth = tree.refine(&map);
    println!("refined to depth {} ({} nodes)", depth, tree.num_nodes());

    let mut passes = 0;
    while tree.balance_pass() {
        passes += 1;
    }
    println!("balanced in {} passes ({} nodes)", passes, tree.num_nodes());

    while tree.optimize_pass() {}
    println!("compacted to {} nodes", tree.num_nodes());

    let mut pixels = vec![0.0f32; EXTENT * EXTENT];
    let mut image = ImageView::new(&mut pixels, EXTENT, EXTENT).expect("image extent matches");
    tree.fill_image(&mut image, Region::new(0, EXTENT, 0, EXTENT), 0, MAX_LEVEL, 1);

    for y in (0..EXTENT).rev() {
        let row: String = (0..EXTENT)
            .map(|x| {
                let value = pixels[x + EXTENT * y].max(0.0) as usize;
                SHADES[value.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{}", row);
    }
}
