//! Error types for the memory-experiment compiler.

use thiserror::Error;

/// Errors produced while configuring or generating a memory circuit.
///
/// Every error is fatal: generation aborts and no partial circuit text is
/// returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// Lattice construction failed.
    #[error("lattice error: {0}")]
    Lattice(#[from] hexweave_lattice::LatticeError),

    /// Stim emission failed.
    #[error("stim emission error: {0}")]
    Stim(#[from] hexweave_stim::StimError),

    /// A noise probability fell outside [0, 1].
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability {
        /// The offending configuration field.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The number of syndrome-extraction rounds must be at least 1.
    #[error("num_rounds must be at least 1, got {0}")]
    InvalidRounds(u32),

    /// A parity factor other than 1 or 2 was requested.
    #[error("parity factor must be 1 or 2, got {0}")]
    InvalidParityFactor(u8),
}

/// Result type for memory-circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
