//! Line-oriented Stim circuit writer.
//!
//! One method per instruction; output accumulates in a single buffer and
//! every statement is newline-terminated. Inside a `REPEAT` block each
//! line carries one leading tab. The writer owns the
//! [`MeasurementRecord`]: `MR`/`M`/`MX` commit their qubits in listed
//! order, which is what makes the relative references of later detectors
//! well defined.

use std::fmt::Write as _;

use hexweave_lattice::QubitId;

use crate::basis::Basis;
use crate::error::{StimError, StimResult};
use crate::record::{MeasurementRecord, RecOffset};

/// Stim text emitter with measurement bookkeeping.
#[derive(Debug, Default)]
pub struct StimWriter {
    output: String,
    indent: usize,
    record: MeasurementRecord,
}

impl StimWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The measurement record accumulated so far.
    pub fn record(&self) -> &MeasurementRecord {
        &self.record
    }

    /// Back-reference to the `back`-th most recent measurement of `qubit`.
    pub fn rec(&self, qubit: QubitId, back: usize) -> StimResult<RecOffset> {
        self.record.rec(qubit, back)
    }

    /// Declare the planar coordinate of a qubit.
    pub fn qubit_coords(&mut self, row: u32, col: u32, qubit: QubitId) {
        let line = format!("QUBIT_COORDS({row}, {col}) {qubit}");
        self.line(&line);
    }

    /// Reset to |0⟩ (`R`) or |+⟩ (`RX`).
    pub fn reset(&mut self, basis: Basis, qubits: &[QubitId]) {
        let op = match basis {
            Basis::Z => "R",
            Basis::X => "RX",
        };
        self.op_line(op, qubits);
    }

    /// Hadamard on each listed qubit.
    pub fn h(&mut self, qubits: &[QubitId]) {
        self.op_line("H", qubits);
    }

    /// One CNOT per (control, target) pair, all in one statement.
    pub fn cnot(&mut self, pairs: &[(QubitId, QubitId)]) {
        let mut line = String::from("CNOT");
        for &(control, target) in pairs {
            let _ = write!(line, " {control} {target}");
        }
        self.line(&line);
    }

    /// Measure-and-reset in Z; commits every qubit to the record.
    pub fn measure_reset(&mut self, qubits: &[QubitId]) {
        self.measure_line("MR", qubits);
    }

    /// Destructive measurement (`M` in Z, `MX` in X); commits every qubit.
    pub fn measure(&mut self, basis: Basis, qubits: &[QubitId]) {
        let op = match basis {
            Basis::Z => "M",
            Basis::X => "MX",
        };
        self.measure_line(op, qubits);
    }

    /// Pauli-X flip channel.
    pub fn x_error(&mut self, probability: f64, qubits: &[QubitId]) {
        self.channel_line("X_ERROR", probability, qubits);
    }

    /// Pauli-Z flip channel.
    pub fn z_error(&mut self, probability: f64, qubits: &[QubitId]) {
        self.channel_line("Z_ERROR", probability, qubits);
    }

    /// The flip that corrupts a `basis`-prepared state: X errors flip Z
    /// eigenstates and vice versa.
    pub fn flip_error(&mut self, basis: Basis, probability: f64, qubits: &[QubitId]) {
        match basis {
            Basis::Z => self.x_error(probability, qubits),
            Basis::X => self.z_error(probability, qubits),
        }
    }

    /// Single-qubit depolarizing channel.
    pub fn depolarize1(&mut self, probability: f64, qubits: &[QubitId]) {
        self.channel_line("DEPOLARIZE1", probability, qubits);
    }

    /// Two-qubit depolarizing channel on each pair.
    pub fn depolarize2(&mut self, probability: f64, pairs: &[(QubitId, QubitId)]) {
        let mut line = format!("DEPOLARIZE2({probability})");
        for &(a, b) in pairs {
            let _ = write!(line, " {a} {b}");
        }
        self.line(&line);
    }

    /// Time-step barrier.
    pub fn tick(&mut self) {
        self.line("TICK");
    }

    /// Declare a deterministic parity of past measurements at coordinate
    /// (row, col, round).
    pub fn detector(&mut self, row: u32, col: u32, round: u32, recs: &[RecOffset]) {
        let mut line = format!("DETECTOR({row}, {col}, {round})");
        for rec in recs {
            let _ = write!(line, " {rec}");
        }
        self.line(&line);
    }

    /// Add the listed measurements to a logical observable.
    pub fn observable_include(&mut self, index: u32, recs: &[RecOffset]) {
        let mut line = format!("OBSERVABLE_INCLUDE({index})");
        for rec in recs {
            let _ = write!(line, " {rec}");
        }
        self.line(&line);
    }

    /// Open a textual repetition block; inner lines gain one tab.
    pub fn begin_repeat(&mut self, count: u32) {
        let line = format!("REPEAT {count} {{");
        self.line(&line);
        self.indent += 1;
    }

    /// Close the innermost repetition block.
    pub fn end_repeat(&mut self) -> StimResult<()> {
        if self.indent == 0 {
            return Err(StimError::UnbalancedRepeat);
        }
        self.indent -= 1;
        self.line("}");
        Ok(())
    }

    /// Consume the writer and return the accumulated circuit text.
    pub fn finish(self) -> String {
        self.output
    }

    fn measure_line(&mut self, op: &str, qubits: &[QubitId]) {
        let mut line = String::from(op);
        for &q in qubits {
            let _ = write!(line, " {q}");
            self.record.commit(q);
        }
        self.line(&line);
    }

    fn op_line(&mut self, op: &str, qubits: &[QubitId]) {
        let mut line = String::from(op);
        for &q in qubits {
            let _ = write!(line, " {q}");
        }
        self.line(&line);
    }

    fn channel_line(&mut self, op: &str, probability: f64, qubits: &[QubitId]) {
        let mut line = format!("{op}({probability})");
        for &q in qubits {
            let _ = write!(line, " {q}");
        }
        self.line(&line);
    }

    fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
        self.output.push_str(line);
        self.output.push('\n');
    }
}
