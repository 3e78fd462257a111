//! Heavy-hex memory-experiment compiler.
//!
//! Compiles a distance-d heavy-hex subsystem-code memory experiment
//! (Chamberland et al., arXiv:1907.09528) into a complete Stim program:
//! qubit placement, per-round flagged gauge extraction, noise channels,
//! detector declarations, and the logical observable. The emitted
//! detectors are all deterministic parities in the noiseless circuit, so
//! the text can be handed straight to a stabilizer sampler and a decoder.
//!
//! # Example
//!
//! ```rust
//! use hexweave_circuit::{Basis, MemoryConfig, generate_memory_circuit};
//!
//! let config = MemoryConfig::new(3, 1, Basis::Z);
//! let circuit = generate_memory_circuit(&config).unwrap();
//! assert!(circuit.starts_with("QUBIT_COORDS(0, 0) 0\n"));
//! assert_eq!(circuit.matches("OBSERVABLE_INCLUDE").count(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod detectors;
pub mod error;

pub use builder::MemoryCircuit;
pub use config::{MemoryConfig, NoiseParams};
pub use detectors::ParityFactor;
pub use error::{CircuitError, CircuitResult};
pub use hexweave_stim::Basis;

/// Compile one memory experiment into Stim circuit text.
pub fn generate_memory_circuit(config: &MemoryConfig) -> CircuitResult<String> {
    MemoryCircuit::new(config.clone())?.generate()
}
