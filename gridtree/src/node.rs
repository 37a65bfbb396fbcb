//! Navigation and link maintenance for tree nodes.
//!
//! Navigation (`child`, `neighbor`, `cousin`, `parent`) is O(1): adjacency
//! queries cross node boundaries through the neighbor links instead of
//! walking up and back down the tree. Link maintenance stitches each newly
//! created generation into the existing neighbor graph using only the
//! parent's links, so neighbor correctness at depth N follows inductively
//! from correctness at depth N-1.

use crate::types::{slot, Face, GridTree, Node, NodeId, GRID, NULL_NODE};

// ============================================================================
// NAVIGATION
// ============================================================================

impl GridTree {
    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The child of `id` at grid position `(ix, iy)`, if present.
    pub fn child(&self, id: NodeId, ix: usize, iy: usize) -> Option<NodeId> {
        present(self.child_raw(id, ix, iy))
    }

    /// The neighbor of `id` on `face`, if present.
    pub fn neighbor(&self, id: NodeId, face: Face) -> Option<NodeId> {
        present(self.neighbor_raw(id, face))
    }

    /// The child at `(ix, iy)` of the neighbor of `id` on `face`. Absent if
    /// either the neighbor or that child does not exist.
    pub fn cousin(&self, id: NodeId, face: Face, ix: usize, iy: usize) -> Option<NodeId> {
        present(self.cousin_raw(id, face, ix, iy))
    }

    /// The parent of `id`, absent at the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        present(
            self.arena
                .get(id)
                .map(|node| node.parent)
                .unwrap_or(NULL_NODE),
        )
    }

    /// True if `id` has at least one child.
    pub fn has_children(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .map(|node| node.children.iter().any(|&c| c != NULL_NODE))
            .unwrap_or(false)
    }

    /// True if `id` carries its full 16-child complement.
    pub fn all_children(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .map(|node| node.children.iter().all(|&c| c != NULL_NODE))
            .unwrap_or(false)
    }

    /// The effective-resolution offset of `id` (0 for unknown ids).
    pub fn level_adjust(&self, id: NodeId) -> i32 {
        self.arena.get(id).map(|node| node.level_adjust).unwrap_or(0)
    }

    #[inline]
    pub(crate) fn child_raw(&self, id: NodeId, ix: usize, iy: usize) -> NodeId {
        self.arena
            .get(id)
            .map(|node| node.children[slot(ix, iy)])
            .unwrap_or(NULL_NODE)
    }

    #[inline]
    pub(crate) fn neighbor_raw(&self, id: NodeId, face: Face) -> NodeId {
        self.arena
            .get(id)
            .map(|node| node.neighbors[face as usize])
            .unwrap_or(NULL_NODE)
    }

    #[inline]
    pub(crate) fn cousin_raw(&self, id: NodeId, face: Face, ix: usize, iy: usize) -> NodeId {
        self.child_raw(self.neighbor_raw(id, face), ix, iy)
    }

    /// The node adjacent to child slot `(ix, iy)` of `id` across `face`:
    /// an interior sibling, or at a grid boundary the matching cousin. This
    /// is both the wiring target for new children and the probe target for
    /// smoothing.
    pub(crate) fn logical_neighbor(&self, id: NodeId, ix: usize, iy: usize, face: Face) -> NodeId {
        match face {
            Face::Right if ix < GRID - 1 => self.child_raw(id, ix + 1, iy),
            Face::Right => self.cousin_raw(id, Face::Right, 0, iy),
            Face::Left if ix > 0 => self.child_raw(id, ix - 1, iy),
            Face::Left => self.cousin_raw(id, Face::Left, GRID - 1, iy),
            Face::Up if iy < GRID - 1 => self.child_raw(id, ix, iy + 1),
            Face::Up => self.cousin_raw(id, Face::Up, ix, 0),
            Face::Down if iy > 0 => self.child_raw(id, ix, iy - 1),
            Face::Down => self.cousin_raw(id, Face::Down, ix, GRID - 1),
        }
    }
}

#[inline]
fn present(id: NodeId) -> Option<NodeId> {
    if id == NULL_NODE {
        None
    } else {
        Some(id)
    }
}

// ============================================================================
// LINK MAINTENANCE
// ============================================================================

impl GridTree {
    /// Symmetrically link two nodes across `face` of `a`. Either side may be
    /// absent; the present side still records the link.
    pub(crate) fn make_neighbors(&mut self, a: NodeId, face: Face, b: NodeId) {
        if let Some(node) = self.arena.get_mut(a) {
            node.neighbors[face as usize] = b;
        }
        if let Some(node) = self.arena.get_mut(b) {
            node.neighbors[face.opposite() as usize] = a;
        }
    }

    /// Allocate an empty child at `(ix, iy)`. Occupied slots are left alone.
    pub(crate) fn create_child(&mut self, id: NodeId, ix: usize, iy: usize) {
        if self.child_raw(id, ix, iy) != NULL_NODE {
            return;
        }
        let child = self.arena.allocate(Node::new(0));
        if let Some(node) = self.arena.get_mut(id) {
            node.children[slot(ix, iy)] = child;
        }
    }

    /// Allocate the full 16-child complement of `id`.
    pub(crate) fn create_children(&mut self, id: NodeId) {
        for iy in 0..GRID {
            for ix in 0..GRID {
                self.create_child(id, ix, iy);
            }
        }
    }

    /// Wire the child at `(ix, iy)` into the neighbor graph: set its parent
    /// link, then connect each face to the interior sibling or, at a grid
    /// boundary, to the cousin across the parent's own neighbor.
    pub(crate) fn update_child(&mut self, id: NodeId, ix: usize, iy: usize) {
        let child = self.child_raw(id, ix, iy);
        if child == NULL_NODE {
            return;
        }

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = id;
        }

        for face in Face::ALL {
            let target = self.logical_neighbor(id, ix, iy, face);
            self.make_neighbors(child, face, target);
        }
    }

    /// Wire every present child of `id`.
    pub(crate) fn update_children(&mut self, id: NodeId) {
        for iy in 0..GRID {
            for ix in 0..GRID {
                self.update_child(id, ix, iy);
            }
        }
    }
}
