//! Adaptive 4x4 spatial refinement tree with O(1) neighbor queries.
//!
//! This crate provides a recursive spatial subdivision tree representing a
//! multi-resolution map over a 2D index domain. Every node owns a 4x4 grid
//! of children and keeps symmetric links to its four face-adjacent
//! neighbors, so adjacency queries cross subtree boundaries in constant
//! time at any depth. Construction is driven by a caller-supplied
//! target-level map ([`GridTree::refine`]); the tree is then smoothed to a
//! 2:1 inter-leaf level constraint ([`GridTree::balance_pass`]), optionally
//! compacted by collapsing uniformly refined subtrees
//! ([`GridTree::optimize_pass`]), and rasterized for inspection
//! ([`GridTree::fill_image`]).
//!
//! Nodes live in a compact id-addressed arena: child links own their
//! subtrees, neighbor and parent links are non-owning ids, and every
//! structural mutation repairs both sides of every affected link.

mod arena;
mod balance;
mod construction;
mod error;
#[cfg(test)]
mod macros;
mod node;
mod optimize;
mod raster;
mod refine;
mod teardown;
mod types;
mod validation;

pub use arena::{ArenaStats, NodeArena};
pub use construction::DEFAULT_MAX_LEVEL;
pub use error::{GridTreeError, InitResult};
pub use raster::ImageView;
pub use refine::LevelMap;
pub use types::{
    Face, GridTree, Node, NodeId, RefinePolicy, Region, TreeConfig, GRID, NULL_NODE, NUM_CHILDREN,
};

impl GridTree {
    // ========================================================================
    // TREE-WIDE QUERIES
    // ========================================================================

    /// Number of live nodes, straight from the arena bookkeeping.
    pub fn num_nodes(&self) -> usize {
        self.arena.allocated_count()
    }

    /// Number of nodes reachable from the root by traversal. Agrees with
    /// [`num_nodes`](GridTree::num_nodes) on a consistent tree; validation
    /// cross-checks the two.
    pub fn node_count(&self) -> usize {
        self.count_nodes_recursive(self.root)
    }

    fn count_nodes_recursive(&self, id: NodeId) -> usize {
        let mut count = 1;
        if let Some(node) = self.arena.get(id) {
            for &child in node.children.iter() {
                if child != NULL_NODE {
                    count += self.count_nodes_recursive(child);
                }
            }
        }
        count
    }

    /// Depth of the tree below the root, in tree levels. 0 for a lone root.
    pub fn depth(&self) -> i32 {
        self.depth_recursive(self.root)
    }

    fn depth_recursive(&self, id: NodeId) -> i32 {
        let mut deepest = 0;
        if let Some(node) = self.arena.get(id) {
            for &child in node.children.iter() {
                if child != NULL_NODE {
                    deepest = deepest.max(1 + self.depth_recursive(child));
                }
            }
        }
        deepest
    }

    /// Arena occupancy statistics.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }
}
