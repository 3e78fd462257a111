//! Qubit identifiers on the heavy-hex grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear index of a qubit on the (2d−1)×(2d−1) grid: `q = row·side + col`.
///
/// Displays as the bare index, which is exactly how Stim statements list
/// their qubit operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
