//! Error types for the lattice crate.

use thiserror::Error;

/// Errors produced while constructing the heavy-hex layout.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// Code distance must be an odd integer of at least 3.
    #[error("code distance must be an odd integer >= 3, got {0}")]
    InvalidDistance(u32),
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
