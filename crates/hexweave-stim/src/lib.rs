//! Stim circuit-text emission.
//!
//! A thin, line-oriented writer for the Stim instruction language:
//! one method per statement, an append-only output buffer, and the
//! measurement bookkeeping that later detector declarations rely on.
//! Measurement statements commit their qubits to a global
//! [`MeasurementRecord`] in listed order; `rec[Δ]` back-references are
//! computed lazily against the current stream head, so they stay correct
//! no matter how much text follows.
//!
//! # Example
//!
//! ```rust
//! use hexweave_lattice::QubitId;
//! use hexweave_stim::{Basis, StimWriter};
//!
//! let mut writer = StimWriter::new();
//! writer.reset(Basis::Z, &[QubitId(0), QubitId(1)]);
//! writer.measure_reset(&[QubitId(0), QubitId(1)]);
//! let rec = writer.rec(QubitId(0), 1).unwrap();
//! writer.detector(0, 0, 0, &[rec]);
//! assert_eq!(writer.finish(), "R 0 1\nMR 0 1\nDETECTOR(0, 0, 0) rec[-2]\n");
//! ```

pub mod basis;
pub mod error;
pub mod record;
pub mod writer;

pub use basis::Basis;
pub use error::{StimError, StimResult};
pub use record::{MeasurementRecord, RecOffset};
pub use writer::StimWriter;
