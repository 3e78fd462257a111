//! Heavy-hex lattice layout for the subsystem code of Chamberland et al.
//! (arXiv:1907.09528).
//!
//! The distance-d code lives on a square (2d−1)×(2d−1) grid in which every
//! used cell carries exactly one role: data qubit, X-gauge ancilla, or
//! Z-gauge ancilla (most of which double as flag qubits). This crate owns
//! the geometry: role classification and the tick-slot CNOT schedule that
//! extracts the weight-2 gauge operators without qubit collisions.
//!
//! # Example
//!
//! ```rust
//! use hexweave_lattice::{CnotSchedule, HeavyHexLayout};
//!
//! let layout = HeavyHexLayout::new(3).unwrap();
//! assert_eq!(layout.data_qubits().len(), 9);
//! assert_eq!(layout.x_gauge_qubits().len(), 4);
//!
//! let schedule = CnotSchedule::build(&layout);
//! assert_eq!(schedule.second.len(), 2);
//! ```

pub mod error;
pub mod layout;
pub mod qubit;
pub mod schedule;

pub use error::{LatticeError, LatticeResult};
pub use layout::{HeavyHexLayout, QubitRole};
pub use qubit::QubitId;
pub use schedule::{CnotPair, CnotSchedule};
