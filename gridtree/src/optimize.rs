//! Compaction pass collapsing uniformly refined subtrees.
//!
//! A node whose sixteen children all exist, are all leaves, and carry one
//! shared resolution offset holds no resolution variation: the whole
//! generation can be folded into the parent's `level_adjust` and the
//! children destroyed. Iterating the pass to a fixed point shrinks the tree
//! to a size proportional to resolution variation rather than raw depth.

use log::debug;

use crate::types::{GridTree, NodeId, GRID, LEVELS_PER_GENERATION, NULL_NODE};

impl GridTree {
    /// One bottom-up compaction sweep. Returns true if any subtree
    /// collapsed; callers iterate to a fixed point, the same way as
    /// [`balance_pass`](GridTree::balance_pass).
    pub fn optimize_pass(&mut self) -> bool {
        let before = self.arena.allocated_count();
        let mut changed = false;
        self.optimize_node(self.root, &mut changed);
        debug!(
            "optimize_pass: changed {}, removed {} nodes",
            changed,
            before - self.arena.allocated_count()
        );
        changed
    }

    fn optimize_node(&mut self, id: NodeId, changed: &mut bool) {
        if let Some(shared_adjust) = self.uniform_leaf_generation(id) {
            // fold the children's shared offset into this node, plus the
            // generation their removal erases
            if let Some(node) = self.arena.get_mut(id) {
                node.level_adjust += LEVELS_PER_GENERATION + shared_adjust;
            }

            for iy in 0..GRID {
                for ix in 0..GRID {
                    let child = self.child_raw(id, ix, iy);
                    if child != NULL_NODE {
                        self.destroy_subtree(child);
                    }
                }
            }

            *changed = true;
            return;
        }

        for iy in 0..GRID {
            for ix in 0..GRID {
                let child = self.child_raw(id, ix, iy);
                if child != NULL_NODE {
                    self.optimize_node(child, changed);
                }
            }
        }
    }

    /// The shared `level_adjust` of this node's children, provided all
    /// sixteen exist, all are leaves, and all agree on it.
    fn uniform_leaf_generation(&self, id: NodeId) -> Option<i32> {
        let mut shared = None;
        for iy in 0..GRID {
            for ix in 0..GRID {
                let child = self.child_raw(id, ix, iy);
                if child == NULL_NODE || self.has_children(child) {
                    return None;
                }
                let adjust = self.level_adjust(child);
                if *shared.get_or_insert(adjust) != adjust {
                    return None;
                }
            }
        }
        shared
    }
}
