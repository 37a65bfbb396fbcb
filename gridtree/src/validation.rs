//! Validation and debugging utilities for GridTree.
//!
//! The relational invariants (neighbor symmetry, parent/child consistency,
//! policy completeness, arena/tree agreement) must hold after every public
//! operation; tests lean on these checks after each pass.

use crate::error::{GridTreeError, TreeResult};
use crate::types::{Face, GridTree, NodeId, RefinePolicy, GRID, NULL_NODE, NUM_CHILDREN};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl GridTree {
    /// Check if the tree maintains its structural invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        if self.parent(self.root).is_some() {
            return Err("root has a parent".to_string());
        }

        let mut visited = Vec::new();
        self.check_node_invariants(self.root, &mut visited)
            .map_err(|e| e.to_string())?;

        self.check_arena_tree_consistency(visited.len())
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    /// Recursively check invariants for a node and its children.
    fn check_node_invariants(&self, id: NodeId, visited: &mut Vec<NodeId>) -> TreeResult<()> {
        visited.push(id);

        let node = self.arena.get(id).ok_or_else(|| {
            GridTreeError::corrupted_tree("node links", &format!("dangling node id {}", id))
        })?;

        // neighbor links are symmetric, never one-sided
        for face in Face::ALL {
            let neighbor = node.neighbors[face as usize];
            if neighbor == NULL_NODE {
                continue;
            }
            let back = self.neighbor_raw(neighbor, face.opposite());
            if back != id {
                return Err(GridTreeError::corrupted_tree(
                    "neighbor links",
                    &format!(
                        "{} -> {} across {:?} is not mirrored (back link {})",
                        id, neighbor, face, back
                    ),
                ));
            }
        }

        // every child points back to this node, from exactly one slot
        let mut child_count = 0;
        for slot_index in 0..NUM_CHILDREN {
            let child = node.children[slot_index];
            if child == NULL_NODE {
                continue;
            }
            child_count += 1;
            let parent = self
                .arena
                .get(child)
                .map(|c| c.parent)
                .unwrap_or(NULL_NODE);
            if parent != id {
                return Err(GridTreeError::corrupted_tree(
                    "parent links",
                    &format!("child {} of {} claims parent {}", child, id, parent),
                ));
            }
            if node.children[..slot_index].contains(&child) {
                return Err(GridTreeError::corrupted_tree(
                    "parent links",
                    &format!("child {} appears in two slots of {}", child, id),
                ));
            }
        }

        if self.config.policy == RefinePolicy::Full
            && child_count != 0
            && child_count != NUM_CHILDREN
        {
            return Err(GridTreeError::corrupted_tree(
                "child complement",
                &format!(
                    "node {} has {} children under the full-nodes policy",
                    id, child_count
                ),
            ));
        }

        for &child in node.children.iter() {
            if child != NULL_NODE {
                self.check_node_invariants(child, visited)?;
            }
        }

        Ok(())
    }

    /// Check that arena allocation matches the reachable tree structure.
    fn check_arena_tree_consistency(&self, reachable: usize) -> TreeResult<()> {
        let allocated = self.arena.allocated_count();
        if reachable != allocated {
            return Err(GridTreeError::arena_error(
                "node count check",
                &format!("{} reachable vs {} allocated", reachable, allocated),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// DEBUGGING UTILITIES
// ============================================================================

impl GridTree {
    /// Render the tree structure as an indented listing, one node per line.
    pub fn dump_structure(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        use std::fmt::Write;

        let children = self
            .arena
            .get(id)
            .map(|n| n.children.iter().filter(|&&c| c != NULL_NODE).count())
            .unwrap_or(0);
        let _ = writeln!(
            out,
            "{}node[id={}, adjust={}]: {} children",
            "  ".repeat(depth),
            id,
            self.level_adjust(id),
            children
        );

        for iy in 0..GRID {
            for ix in 0..GRID {
                let child = self.child_raw(id, ix, iy);
                if child != NULL_NODE {
                    self.dump_node(child, depth + 1, out);
                }
            }
        }
    }
}
