//! Construction and initialization logic for GridTree.
//!
//! Configuration is validated once here; after that every tree operation is
//! infallible. A tree always has a root node, allocated at construction.

use crate::arena::NodeArena;
use crate::error::{GridTreeError, InitResult};
use crate::types::{GridTree, Node, RefinePolicy, TreeConfig, MAX_LEVEL_LIMIT};

/// Default grid-level ceiling for refinement.
pub const DEFAULT_MAX_LEVEL: i32 = 8;

impl TreeConfig {
    /// Check that the depth limit is usable.
    pub(crate) fn validate(&self) -> InitResult<()> {
        if self.max_level < 0 {
            return Err(GridTreeError::invalid_config(&format!(
                "max_level {} is negative",
                self.max_level
            )));
        }
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(GridTreeError::invalid_config(&format!(
                "max_level {} exceeds limit {}",
                self.max_level, MAX_LEVEL_LIMIT
            )));
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            policy: RefinePolicy::default(),
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl GridTree {
    /// Create a tree holding a single unrefined root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridtree::{GridTree, TreeConfig};
    ///
    /// let tree = GridTree::new(TreeConfig::default()).unwrap();
    /// assert_eq!(tree.num_nodes(), 1);
    /// ```
    pub fn new(config: TreeConfig) -> InitResult<Self> {
        config.validate()?;

        let mut arena = NodeArena::new();
        let root = arena.allocate(Node::new(0));

        Ok(Self {
            config,
            root,
            arena,
        })
    }

    /// Create a tree with the given policy and the default depth limit.
    pub fn with_policy(policy: RefinePolicy) -> InitResult<Self> {
        Self::new(TreeConfig {
            policy,
            ..TreeConfig::default()
        })
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Child-complement policy in effect.
    pub fn policy(&self) -> RefinePolicy {
        self.config.policy
    }

    /// Grid level beyond which refinement never descends.
    pub fn max_level(&self) -> i32 {
        self.config.max_level
    }
}

impl Default for GridTree {
    /// Create a tree with the default configuration.
    fn default() -> Self {
        Self::new(TreeConfig::default()).unwrap()
    }
}
