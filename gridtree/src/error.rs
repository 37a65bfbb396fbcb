//! Error handling and result types for GridTree operations.
//!
//! Tree algorithms themselves are infallible: depth limits, unsplittable
//! regions, and absent probes are normal recursion floors, not failures.
//! Errors exist only at the construction and validation boundaries, where
//! caller-supplied dimensions and configuration are checked.

/// Error type for tree construction and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridTreeError {
    /// Invalid tree configuration.
    InvalidConfig(String),
    /// A caller-supplied buffer does not match its declared dimensions.
    InvalidDimensions(String),
    /// Arena bookkeeping disagrees with the tree structure.
    ArenaError(String),
    /// A structural invariant does not hold.
    CorruptedTree(String),
}

impl GridTreeError {
    /// Create an InvalidConfig error with context.
    pub fn invalid_config(details: &str) -> Self {
        Self::InvalidConfig(details.to_string())
    }

    /// Create an InvalidDimensions error for a flat buffer of the wrong size.
    pub fn invalid_dimensions(what: &str, len: usize, width: usize, height: usize) -> Self {
        Self::InvalidDimensions(format!(
            "{} has {} elements for declared {}x{} extent",
            what, len, width, height
        ))
    }

    /// Create an ArenaError with context.
    pub fn arena_error(check: &str, details: &str) -> Self {
        Self::ArenaError(format!("{}: {}", check, details))
    }

    /// Create a CorruptedTree error with context.
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }
}

impl std::fmt::Display for GridTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridTreeError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            GridTreeError::InvalidDimensions(msg) => write!(f, "Invalid dimensions: {}", msg),
            GridTreeError::ArenaError(msg) => write!(f, "Arena error: {}", msg),
            GridTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for GridTreeError {}

/// Internal result type for validation checks.
pub(crate) type TreeResult<T> = Result<T, GridTreeError>;

/// Public result type for construction and validation.
pub type InitResult<T> = Result<T, GridTreeError>;
