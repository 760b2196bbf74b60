//! Error types for universe generation

use thiserror::Error;

/// Errors that can occur while configuring or generating a universe
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UniverseError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A race color could not be parsed as `#rrggbb`
    #[error("invalid race color: {0}")]
    InvalidColor(String),

    /// Generation reached a state its own bookkeeping rules out
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Attempted to claim a sector that already belongs to a cluster
    #[error("sector ({x}, {y}) is already claimed")]
    SectorAlreadyClaimed {
        /// Column of the sector
        x: u8,
        /// Row of the sector
        y: u8,
    },

    /// Sector coordinates outside the grid
    #[error("sector ({x}, {y}) is outside the universe")]
    SectorOutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
    },

    /// Requested sector handle does not exist
    #[error("sector not found: {0}")]
    SectorNotFound(usize),

    /// Requested cluster handle does not exist
    #[error("cluster not found: {0}")]
    ClusterNotFound(usize),
}

/// Result type alias for universe operations
pub type Result<T> = std::result::Result<T, UniverseError>;
