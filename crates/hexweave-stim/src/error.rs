//! Error types for the Stim emission crate.

use hexweave_lattice::QubitId;
use thiserror::Error;

/// Errors produced while emitting Stim circuit text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StimError {
    /// Basis was neither "X" nor "Z".
    #[error("invalid basis {0:?}, expected \"X\" or \"Z\"")]
    InvalidBasis(String),

    /// A back-reference reached past the recorded history of a qubit.
    #[error("qubit {qubit} has {available} recorded measurements, reference reached {back} back")]
    MissingRecord {
        /// The referenced qubit.
        qubit: QubitId,
        /// How far back the reference reached (1 = latest).
        back: usize,
        /// How many measurements the qubit actually has.
        available: usize,
    },

    /// A `REPEAT` block was closed without being opened.
    #[error("REPEAT block closed without being opened")]
    UnbalancedRepeat,
}

/// Result type for Stim emission operations.
pub type StimResult<T> = Result<T, StimError>;
