//! Global measurement record and relative back-references.
//!
//! Detectors reference past measurements through negative offsets into
//! the global measurement stream. The record keeps, per qubit, the
//! absolute stream index of every measurement in emission order; offsets
//! come out as `history[q][k] − counter`, computed at reference time, so
//! a reference emitted now is unaffected by anything emitted later.

use std::fmt;

use hexweave_lattice::QubitId;
use rustc_hash::FxHashMap;

use crate::error::{StimError, StimResult};

/// A negative offset into the measurement stream, printed as `rec[Δ]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecOffset(pub i64);

impl fmt::Display for RecOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec[{}]", self.0)
    }
}

/// Append-only measurement history: one global counter plus the ordered
/// absolute indices of every qubit's measurements.
#[derive(Debug, Clone, Default)]
pub struct MeasurementRecord {
    counter: usize,
    history: FxHashMap<QubitId, Vec<usize>>,
}

impl MeasurementRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of measurements committed so far.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Number of measurements recorded for one qubit.
    pub fn count_for(&self, qubit: QubitId) -> usize {
        self.history.get(&qubit).map_or(0, Vec::len)
    }

    /// Commit one measurement of `qubit` at the current stream position.
    pub fn commit(&mut self, qubit: QubitId) {
        self.history.entry(qubit).or_default().push(self.counter);
        self.counter += 1;
    }

    /// Back-reference to the `back`-th most recent measurement of `qubit`
    /// (1 = latest). Always strictly negative at emission time.
    pub fn rec(&self, qubit: QubitId, back: usize) -> StimResult<RecOffset> {
        let entries = self.history.get(&qubit).map_or(&[][..], Vec::as_slice);
        if back == 0 || back > entries.len() {
            return Err(StimError::MissingRecord {
                qubit,
                back,
                available: entries.len(),
            });
        }
        let absolute = entries[entries.len() - back];
        Ok(RecOffset(absolute as i64 - self.counter as i64))
    }
}
