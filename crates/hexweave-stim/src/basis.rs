//! Preparation and measurement bases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StimError;

/// Pauli eigenbasis used for state preparation and readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// The |+⟩/|−⟩ eigenbasis.
    X,
    /// The |0⟩/|1⟩ eigenbasis.
    Z,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::X => write!(f, "X"),
            Basis::Z => write!(f, "Z"),
        }
    }
}

impl TryFrom<char> for Basis {
    type Error = StimError;

    fn try_from(value: char) -> Result<Self, StimError> {
        match value {
            'X' => Ok(Basis::X),
            'Z' => Ok(Basis::Z),
            other => Err(StimError::InvalidBasis(other.to_string())),
        }
    }
}

impl FromStr for Basis {
    type Err = StimError;

    fn from_str(value: &str) -> Result<Self, StimError> {
        match value {
            "X" => Ok(Basis::X),
            "Z" => Ok(Basis::Z),
            other => Err(StimError::InvalidBasis(other.to_string())),
        }
    }
}
