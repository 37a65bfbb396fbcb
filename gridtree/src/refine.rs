//! Target-driven recursive construction.
//!
//! Refinement descends from the root, subdividing every region that still
//! contains a cell whose desired resolution exceeds the node's current grid
//! level. The caller supplies the desired resolution as a flat per-cell
//! [`LevelMap`]; the tree only reads it.

use log::debug;

use crate::error::{GridTreeError, InitResult};
use crate::types::{GridTree, NodeId, RefinePolicy, Region, GRID, LEVELS_PER_GENERATION};

// ============================================================================
// TARGET-LEVEL MAP
// ============================================================================

/// Caller-owned map of desired refinement levels over `[0, width) x
/// [0, height)`, stored flat with linear index `x + width * y`.
#[derive(Debug, Clone, Copy)]
pub struct LevelMap<'a> {
    levels: &'a [i32],
    width: usize,
    height: usize,
}

impl<'a> LevelMap<'a> {
    /// Wrap a flat buffer, checking it matches the declared extent.
    pub fn new(levels: &'a [i32], width: usize, height: usize) -> InitResult<Self> {
        if width == 0 || height == 0 || levels.len() != width * height {
            return Err(GridTreeError::invalid_dimensions(
                "level map",
                levels.len(),
                width,
                height,
            ));
        }
        Ok(Self {
            levels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Desired refinement level of cell `(x, y)`.
    pub fn level(&self, x: usize, y: usize) -> i32 {
        self.levels[x + self.width * y]
    }

    /// The domain region this map covers.
    pub fn domain(&self) -> Region {
        Region::new(0, self.width, 0, self.height)
    }

    /// True if any cell of `region` wants resolution at or beyond `level`.
    fn any_at_least(&self, region: &Region, level: i32) -> bool {
        for y in region.low_y..region.high_y.min(self.height) {
            for x in region.low_x..region.high_x.min(self.width) {
                if self.level(x, y) >= level {
                    return true;
                }
            }
        }
        false
    }
}

// ============================================================================
// REFINEMENT
// ============================================================================

impl GridTree {
    /// Refine the tree against a target-level map, starting from the root
    /// over the map's whole domain at grid level 0.
    ///
    /// Returns the number of tree levels actually produced below the root:
    /// 0 if the root stayed a leaf, otherwise one more than the deepest
    /// child result. Depth limits and unsplittable regions end recursion
    /// quietly; they are not errors.
    pub fn refine(&mut self, levels: &LevelMap<'_>) -> i32 {
        let before = self.arena.allocated_count();
        let depth = self.refine_node(self.root, levels, levels.domain(), 0);
        debug!(
            "refine: reached depth {}, created {} nodes ({:?} policy, max_level {})",
            depth,
            self.arena.allocated_count() - before,
            self.config.policy,
            self.config.max_level
        );
        depth
    }

    fn refine_node(
        &mut self,
        id: NodeId,
        levels: &LevelMap<'_>,
        region: Region,
        level: i32,
    ) -> i32 {
        if level >= self.config.max_level || !region.splittable() {
            return 0;
        }

        let mut depth = 0;

        match self.config.policy {
            RefinePolicy::Full => {
                // one qualifying cell anywhere refines the whole node
                if levels.any_at_least(&region, level) {
                    self.create_children(id);
                    self.update_children(id);

                    for iy in 0..GRID {
                        for ix in 0..GRID {
                            let child = self.child_raw(id, ix, iy);
                            let child_depth = self.refine_node(
                                child,
                                levels,
                                region.subregion(ix, iy),
                                level + LEVELS_PER_GENERATION,
                            );
                            depth = depth.max(1 + child_depth);
                        }
                    }
                }
            }
            RefinePolicy::Partial => {
                // each sub-region qualifies independently
                for iy in 0..GRID {
                    for ix in 0..GRID {
                        let sub = region.subregion(ix, iy);
                        if !levels.any_at_least(&sub, level) {
                            continue;
                        }
                        self.create_child(id, ix, iy);
                        self.update_child(id, ix, iy);
                        let child = self.child_raw(id, ix, iy);
                        let child_depth =
                            self.refine_node(child, levels, sub, level + LEVELS_PER_GENERATION);
                        depth = depth.max(1 + child_depth);
                    }
                }
            }
        }

        depth
    }
}
