//! Cascading subtree destruction.
//!
//! Deleting a node deletes all of its descendants and repairs the link
//! state of every surviving neighbor and parent that referenced a deleted
//! node. The traversal is an explicit stack-driven walk rather than
//! call-stack recursion, so arbitrarily deep trees cannot exhaust the
//! stack. Destruction order is children strictly before parents, and each
//! node's four neighbor corrections plus one parent correction happen as
//! one step before its slot is freed, so no traversal ever observes a
//! partial link state.

use log::trace;

use crate::types::{Face, GridTree, Node, NodeId, NULL_NODE};

impl GridTree {
    /// Destroy `id` and every descendant, returning the number of nodes
    /// removed. Unknown ids remove nothing.
    ///
    /// Destroying the root leaves the tree holding a fresh unrefined root,
    /// since a tree always has one.
    pub fn destroy_subtree(&mut self, id: NodeId) -> usize {
        if !self.arena.contains(id) {
            return 0;
        }

        // discovery order pushes parents before children...
        let mut discovered = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            discovered.push(current);
            if let Some(node) = self.arena.get(current) {
                for &child in node.children.iter() {
                    if child != NULL_NODE {
                        stack.push(child);
                    }
                }
            }
        }

        // ...so the reverse frees children strictly before parents
        for &current in discovered.iter().rev() {
            self.unlink(current);
            self.arena.deallocate(current);
        }

        trace!("destroy_subtree: removed {} nodes", discovered.len());

        if id == self.root {
            self.root = self.arena.allocate(Node::new(0));
        }

        discovered.len()
    }

    /// Reset the tree to a single unrefined root node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self.arena.allocate(Node::new(0));
    }

    /// Detach `id` from the link graph: null the back-reference of each of
    /// its four neighbors, its own outgoing links, and the parent slot that
    /// owns it.
    fn unlink(&mut self, id: NodeId) {
        let (neighbors, parent) = match self.arena.get(id) {
            Some(node) => (node.neighbors, node.parent),
            None => return,
        };

        for face in Face::ALL {
            let neighbor = neighbors[face as usize];
            if let Some(node) = self.arena.get_mut(neighbor) {
                node.neighbors[face.opposite() as usize] = NULL_NODE;
            }
        }

        if let Some(node) = self.arena.get_mut(parent) {
            for child_slot in node.children.iter_mut() {
                if *child_slot == id {
                    *child_slot = NULL_NODE;
                }
            }
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.neighbors = [NULL_NODE; 4];
            node.parent = NULL_NODE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRID;

    fn refined_tree(depth: usize) -> GridTree {
        // partial policy: deletions legitimately leave partial complements
        let mut tree = GridTree::with_policy(crate::types::RefinePolicy::Partial).unwrap();
        let mut frontier = vec![tree.root()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for id in frontier {
                tree.create_children(id);
                tree.update_children(id);
                for iy in 0..GRID {
                    for ix in 0..GRID {
                        next.push(tree.child(id, ix, iy).unwrap());
                    }
                }
            }
            frontier = next;
        }
        tree
    }

    #[test]
    fn test_destroy_removes_exact_count() {
        let mut tree = refined_tree(2);
        assert_eq!(tree.num_nodes(), 1 + 16 + 256);

        // a depth-1 child owns 16 grandchildren
        let victim = tree.child(tree.root(), 1, 1).unwrap();
        let removed = tree.destroy_subtree(victim);
        assert_eq!(removed, 17);
        assert_eq!(tree.num_nodes(), 1 + 16 + 256 - 17);
    }

    #[test]
    fn test_destroy_repairs_surviving_links() {
        let mut tree = refined_tree(1);
        let root = tree.root();
        let victim = tree.child(root, 1, 1).unwrap();
        let right = tree.child(root, 2, 1).unwrap();
        let up = tree.child(root, 1, 2).unwrap();

        assert_eq!(tree.neighbor(right, Face::Left), Some(victim));
        assert_eq!(tree.neighbor(up, Face::Down), Some(victim));

        tree.destroy_subtree(victim);

        assert_eq!(tree.neighbor(right, Face::Left), None);
        assert_eq!(tree.neighbor(up, Face::Down), None);
        assert_eq!(tree.child(root, 1, 1), None);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_destroy_unknown_id_is_noop() {
        let mut tree = refined_tree(1);
        let before = tree.num_nodes();
        assert_eq!(tree.destroy_subtree(NULL_NODE), 0);
        assert_eq!(tree.destroy_subtree(9999), 0);
        assert_eq!(tree.num_nodes(), before);
    }

    #[test]
    fn test_destroy_root_resets_tree() {
        let mut tree = refined_tree(1);
        let removed = tree.destroy_subtree(tree.root());
        assert_eq!(removed, 17);
        assert_eq!(tree.num_nodes(), 1);
        assert!(!tree.has_children(tree.root()));
    }

    #[test]
    fn test_clear() {
        let mut tree = refined_tree(2);
        tree.clear();
        assert_eq!(tree.num_nodes(), 1);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_deep_teardown_runs_without_recursion() {
        // a narrow but deep chain of refined corners
        let mut tree = GridTree::default();
        let mut id = tree.root();
        for _ in 0..64 {
            tree.create_children(id);
            tree.update_children(id);
            id = tree.child(id, 0, 0).unwrap();
        }
        let total = tree.num_nodes();
        assert_eq!(tree.destroy_subtree(tree.root()), total);
        assert_eq!(tree.num_nodes(), 1);
    }
}
