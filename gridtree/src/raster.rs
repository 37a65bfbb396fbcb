//! Rasterization of the tree's resolution structure.
//!
//! Each node paints its whole region with a shade derived from its
//! effective level, draws a border along the region edges, and only then
//! lets its children overpaint their quarters. The final value of any
//! pixel is therefore the fill of the deepest node still covering it.

use crate::error::{GridTreeError, InitResult};
use crate::types::{GridTree, NodeId, Region, GRID, NULL_NODE};

/// Shade used for region borders.
const BORDER: f32 = 0.0;

/// Mutable view over a caller-owned flat image buffer, stored row-major
/// with linear index `x + width * y`.
#[derive(Debug)]
pub struct ImageView<'a> {
    pixels: &'a mut [f32],
    width: usize,
    height: usize,
}

impl<'a> ImageView<'a> {
    /// Wrap a flat buffer, checking it matches the declared extent.
    pub fn new(pixels: &'a mut [f32], width: usize, height: usize) -> InitResult<Self> {
        if pixels.len() != width * height {
            return Err(GridTreeError::invalid_dimensions(
                "image",
                pixels.len(),
                width,
                height,
            ));
        }
        Ok(Self {
            pixels,
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

    /// Write one pixel; coordinates outside the buffer are ignored.
    #[inline]
    fn set(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            self.pixels[x + self.width * y] = value;
        }
    }
}

impl GridTree {
    /// Paint the tree's resolution structure into `image` over `region`,
    /// starting from the root at paint level `level` (0 for a whole-domain
    /// render). Interior cells of a node at effective level `l` receive
    /// `2 * num_levels - l`; region edges are overdrawn with a
    /// `line_width`-thick 0.0 border; children then repaint their quarters
    /// one level deeper.
    pub fn fill_image(
        &self,
        image: &mut ImageView<'_>,
        region: Region,
        level: i32,
        num_levels: i32,
        line_width: usize,
    ) {
        self.fill_node(self.root, image, region, level, num_levels, line_width);
    }

    fn fill_node(
        &self,
        id: NodeId,
        image: &mut ImageView<'_>,
        region: Region,
        level: i32,
        num_levels: i32,
        line_width: usize,
    ) {
        let level = level + self.level_adjust(id);
        let shade = (2 * num_levels - level) as f32;

        // interior
        for y in region.low_y..region.high_y {
            for x in region.low_x..region.high_x {
                image.set(x, y, shade);
            }
        }

        // border
        for k in 0..line_width.min(region.height()) {
            let bottom = region.low_y + k;
            let top = region.high_y - 1 - k;
            for x in region.low_x..region.high_x {
                image.set(x, bottom, BORDER);
                image.set(x, top, BORDER);
            }
        }
        for k in 0..line_width.min(region.width()) {
            let left = region.low_x + k;
            let right = region.high_x - 1 - k;
            for y in region.low_y..region.high_y {
                image.set(left, y, BORDER);
                image.set(right, y, BORDER);
            }
        }

        // children overpaint their quarters
        for iy in 0..GRID {
            for ix in 0..GRID {
                let child = self.child_raw(id, ix, iy);
                if child != NULL_NODE {
                    self.fill_node(
                        child,
                        image,
                        region.subregion(ix, iy),
                        level + 1,
                        num_levels,
                        line_width,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridTree;

    fn paint(tree: &GridTree, extent: usize, num_levels: i32, line_width: usize) -> Vec<f32> {
        let mut pixels = vec![-1.0; extent * extent];
        let mut image = ImageView::new(&mut pixels, extent, extent).unwrap();
        tree.fill_image(
            &mut image,
            Region::new(0, extent, 0, extent),
            0,
            num_levels,
            line_width,
        );
        pixels
    }

    #[test]
    fn test_image_view_rejects_bad_extent() {
        let mut pixels = vec![0.0; 12];
        assert!(ImageView::new(&mut pixels, 4, 4).is_err());
        assert!(ImageView::new(&mut pixels, 4, 3).is_ok());
    }

    #[test]
    fn test_leaf_paints_uniform_interior_with_border() {
        let tree = GridTree::default();
        let pixels = paint(&tree, 8, 3, 1);

        for y in 0..8 {
            for x in 0..8 {
                let expected = if x == 0 || x == 7 || y == 0 || y == 7 {
                    0.0
                } else {
                    6.0
                };
                assert_eq!(pixels[x + 8 * y], expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_children_overpaint_parent() {
        let mut tree = GridTree::default();
        let root = tree.root();
        tree.create_children(root);
        tree.update_children(root);

        let pixels = paint(&tree, 16, 2, 0);
        // with no border, every pixel carries the child shade
        assert!(pixels.iter().all(|&p| p == 3.0));
    }

    #[test]
    fn test_level_adjust_shifts_shade() {
        let mut tree = GridTree::default();
        let root = tree.root();
        tree.create_children(root);
        tree.update_children(root);
        // collapse folds the generation into the annotation
        assert!(tree.optimize_pass());

        let pixels = paint(&tree, 16, 2, 0);
        assert!(pixels.iter().all(|&p| p == 2.0));
    }

    #[test]
    fn test_zero_line_width_draws_no_border() {
        let tree = GridTree::default();
        let pixels = paint(&tree, 4, 1, 0);
        assert!(pixels.iter().all(|&p| p == 2.0));
    }

    #[test]
    fn test_wide_border_covers_small_region() {
        let tree = GridTree::default();
        // line width exceeding the region paints everything as border
        let pixels = paint(&tree, 3, 1, 4);
        assert!(pixels.iter().all(|&p| p == 0.0));
    }
}
