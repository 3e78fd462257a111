//! Memory-experiment configuration.

use serde::{Deserialize, Serialize};

use hexweave_stim::Basis;

use crate::error::{CircuitError, CircuitResult};

/// Noise-injection probabilities for the four channel families.
///
/// A probability of exactly zero suppresses the corresponding channel
/// lines entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Depolarization after every Clifford gate (single- or two-qubit to
    /// match the gate).
    #[serde(default)]
    pub after_clifford_depolarization: f64,
    /// Flip in the reset basis after every reset.
    #[serde(default)]
    pub after_reset_flip_probability: f64,
    /// Flip immediately before every measurement.
    #[serde(default)]
    pub before_measure_flip_probability: f64,
    /// Single-qubit depolarization of the data qubits before each round.
    #[serde(default)]
    pub before_round_data_depolarization: f64,
}

impl NoiseParams {
    /// The same probability on all four channel families.
    pub fn uniform(p: f64) -> Self {
        Self {
            after_clifford_depolarization: p,
            after_reset_flip_probability: p,
            before_measure_flip_probability: p,
            before_round_data_depolarization: p,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            (
                "after_clifford_depolarization",
                self.after_clifford_depolarization,
            ),
            (
                "after_reset_flip_probability",
                self.after_reset_flip_probability,
            ),
            (
                "before_measure_flip_probability",
                self.before_measure_flip_probability,
            ),
            (
                "before_round_data_depolarization",
                self.before_round_data_depolarization,
            ),
        ]
    }
}

/// Full description of one memory experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Code distance (odd, at least 3).
    pub distance: u32,
    /// Syndrome-extraction rounds after initialization.
    pub rounds: u32,
    /// Preparation and readout basis.
    pub basis: Basis,
    /// Channel probabilities.
    #[serde(default)]
    pub noise: NoiseParams,
}

impl MemoryConfig {
    /// A configuration with no noise injection; attach channel
    /// probabilities with [`with_noise`](Self::with_noise).
    pub fn new(distance: u32, rounds: u32, basis: Basis) -> Self {
        Self {
            distance,
            rounds,
            basis,
            noise: NoiseParams::default(),
        }
    }

    /// Replace the noise parameters.
    #[must_use]
    pub fn with_noise(mut self, noise: NoiseParams) -> Self {
        self.noise = noise;
        self
    }

    /// Check the rounds and probability domains.
    ///
    /// The distance domain is owned by the lattice constructor and
    /// surfaces through [`CircuitError::Lattice`].
    pub fn validate(&self) -> CircuitResult<()> {
        if self.rounds == 0 {
            return Err(CircuitError::InvalidRounds(0));
        }
        for (name, value) in self.noise.fields() {
            if !(0.0..=1.0).contains(&value) {
                return Err(CircuitError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}
