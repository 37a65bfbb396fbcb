//! Smoothing pass enforcing the 2:1 level constraint.
//!
//! After refinement, a leaf may sit next to a cousin subtree refined two or
//! more tree levels deeper, an abrupt resolution jump adaptive grids do not
//! tolerate. One pass walks the tree and refines every leaf that detects a
//! once-refined cousin across any face; callers loop until a pass reports
//! no change, which is the smoothness fixed point.
//!
//! Under the full policy an offending leaf gains its whole 16-child
//! complement. Under the partial policy only the individual missing child
//! slots whose logical neighbor is refined are created, which reaches the
//! same guarantee at a fraction of the node cost.

use log::debug;

use crate::types::{Face, GridTree, NodeId, RefinePolicy, GRID, NULL_NODE, NUM_CHILDREN};

impl GridTree {
    /// One smoothing sweep over the whole tree. Returns true if any node
    /// was refined; callers iterate to a fixed point:
    ///
    /// ```
    /// # use gridtree::{GridTree, LevelMap, RefinePolicy, TreeConfig};
    /// # let levels = vec![0; 16];
    /// # let map = LevelMap::new(&levels, 4, 4).unwrap();
    /// # let mut tree = GridTree::with_policy(RefinePolicy::Full).unwrap();
    /// # tree.refine(&map);
    /// while tree.balance_pass() {}
    /// ```
    pub fn balance_pass(&mut self) -> bool {
        let before = self.arena.allocated_count();
        let mut changed = false;
        self.balance_node(self.root, &mut changed);
        debug!(
            "balance_pass: changed {}, created {} nodes",
            changed,
            self.arena.allocated_count() - before
        );
        changed
    }

    fn balance_node(&mut self, id: NodeId, changed: &mut bool) {
        match self.config.policy {
            RefinePolicy::Full => self.balance_full(id, changed),
            RefinePolicy::Partial => self.balance_partial(id, changed),
        }

        // smoothing applies throughout the tree, newly created children
        // included
        for iy in 0..GRID {
            for ix in 0..GRID {
                let child = self.child_raw(id, ix, iy);
                if child != NULL_NODE {
                    self.balance_node(child, changed);
                }
            }
        }
    }

    /// Full policy: a leaf refines completely when any cousin along any
    /// face is itself refined.
    fn balance_full(&mut self, id: NodeId, changed: &mut bool) {
        if self.has_children(id) {
            return;
        }

        let mut refine_node = false;
        for face in Face::ALL {
            for k in 0..GRID {
                let (ix, iy) = face.facing_cell(k);
                let cousin = self.cousin_raw(id, face, ix, iy);
                if cousin != NULL_NODE && self.has_children(cousin) {
                    refine_node = true;
                }
            }
        }

        if refine_node {
            *changed = true;
            self.create_children(id);
            self.update_children(id);
        }
    }

    /// Partial policy: each absent child slot is created individually when
    /// its logical neighbor on some face carries children of its own.
    fn balance_partial(&mut self, id: NodeId, changed: &mut bool) {
        if self.all_children(id) {
            return;
        }

        // decide from the pre-pass state before creating anything
        let mut refine_child = [false; NUM_CHILDREN];
        for iy in 0..GRID {
            for ix in 0..GRID {
                if self.child_raw(id, ix, iy) != NULL_NODE {
                    continue;
                }
                refine_child[ix + GRID * iy] = self.slot_needs_child(id, ix, iy);
            }
        }

        for iy in 0..GRID {
            for ix in 0..GRID {
                if refine_child[ix + GRID * iy] {
                    *changed = true;
                    self.create_child(id, ix, iy);
                    self.update_child(id, ix, iy);
                }
            }
        }
    }

    /// True if the absent slot `(ix, iy)` of `id` faces a refined node: an
    /// existing sibling, or at a grid boundary the parent's cousin's
    /// matching child, carrying children along the shared edge.
    fn slot_needs_child(&self, id: NodeId, ix: usize, iy: usize) -> bool {
        for face in Face::ALL {
            let neighbor = self.logical_neighbor(id, ix, iy, face);
            if neighbor == NULL_NODE {
                continue;
            }
            for k in 0..GRID {
                let (cx, cy) = face.facing_cell(k);
                if self.child_raw(neighbor, cx, cy) != NULL_NODE {
                    return true;
                }
            }
        }
        false
    }
}
