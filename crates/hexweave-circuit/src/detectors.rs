//! Detector wiring for the heavy-hex memory experiment.
//!
//! Every detector is a parity of past measurements that is deterministic
//! in the noiseless circuit. Wiring dispatches on the role of the
//! measured ancilla. The subtle part is the back-reference depth: a
//! Z-gauge ancilla that doubles as a flag is measured twice per round
//! (once as flag, once as gauge), so comparing its gauge readings across
//! rounds must step past the interleaved flag reading.

use hexweave_lattice::QubitId;
use hexweave_stim::{Basis, RecOffset};

use crate::builder::MemoryCircuit;
use crate::error::{CircuitError, CircuitResult};

/// How many same-qubit readings one detector compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityFactor {
    /// The latest reading alone; its outcome is known in advance.
    Single,
    /// The latest two readings of the same gauge operator.
    Paired,
}

impl TryFrom<u8> for ParityFactor {
    type Error = CircuitError;

    fn try_from(value: u8) -> Result<Self, CircuitError> {
        match value {
            1 => Ok(ParityFactor::Single),
            2 => Ok(ParityFactor::Paired),
            other => Err(CircuitError::InvalidParityFactor(other)),
        }
    }
}

impl MemoryCircuit {
    /// One detector per flag qubit.
    ///
    /// Flags rejoin |0⟩ at every reset, so a single reading is
    /// deterministic on its own.
    pub(crate) fn emit_flag_detectors(&mut self, round: u32) -> CircuitResult<()> {
        for &q in self.layout.flag_qubits() {
            let (row, col) = self.layout.coord(q);
            let rec = self.writer.rec(q, 1)?;
            self.writer.detector(row, col, round, &[rec]);
        }
        Ok(())
    }

    /// Detectors over the Z-gauge ancilla readings.
    ///
    /// Edge ancillas carry short checks of their own; interior ancillas
    /// pair east-west into weight-4 Z stabilizers, keyed at the shifted
    /// column `col + 1` so detector coordinates stay unique. The
    /// right-edge partner of each pair emits nothing.
    pub(crate) fn emit_z_gauge_detectors(
        &mut self,
        parity: ParityFactor,
        round: u32,
    ) -> CircuitResult<()> {
        let last = self.layout.side() - 1;
        for &q in self.layout.z_gauge_qubits() {
            let (row, col) = self.layout.coord(q);
            let east_pair = QubitId(q.0 + 2);

            if (col == 0 && row % 4 == 3) || (col == last && row % 4 == 1) {
                // Boundary short check owned by a single ancilla.
                match parity {
                    ParityFactor::Single => {
                        let rec = self.writer.rec(q, 1)?;
                        self.writer.detector(row, col, round, &[rec]);
                    }
                    ParityFactor::Paired => {
                        let recs = [self.writer.rec(q, 1)?, self.previous_gauge_rec(q)?];
                        self.writer.detector(row, col, round, &recs);
                    }
                }
            } else if col == 0 && row % 4 == 1 {
                // Left-edge weight-2 stabilizer: XOR with the ancilla two
                // columns east.
                match parity {
                    ParityFactor::Single => {
                        let recs = [self.writer.rec(q, 1)?, self.writer.rec(east_pair, 1)?];
                        self.writer.detector(row, col, round, &recs);
                    }
                    ParityFactor::Paired => {
                        let recs = [
                            self.writer.rec(q, 1)?,
                            self.writer.rec(q, 2)?,
                            self.writer.rec(east_pair, 1)?,
                            self.previous_gauge_rec(east_pair)?,
                        ];
                        self.writer.detector(row, col + 1, round, &recs);
                    }
                }
            } else if col == last && row % 4 == 3 {
                // Covered by the pair detector two columns west.
            } else if !self.layout.is_x_gauge(QubitId(q.0 + 1)) {
                // Interior pair: the two ancillas between consecutive
                // X-gauge columns form one Z stabilizer.
                match parity {
                    ParityFactor::Single => {
                        let recs = [self.writer.rec(q, 1)?, self.writer.rec(east_pair, 1)?];
                        self.writer.detector(row, col + 1, round, &recs);
                    }
                    ParityFactor::Paired => {
                        let recs = [
                            self.writer.rec(q, 1)?,
                            self.writer.rec(east_pair, 1)?,
                            self.previous_gauge_rec(q)?,
                            self.previous_gauge_rec(east_pair)?,
                        ];
                        self.writer.detector(row, col + 1, round, &recs);
                    }
                }
            }
        }
        Ok(())
    }

    /// Strip detectors over the X-gauge ancilla readings.
    ///
    /// A heavy-hex X stabilizer is the product of every X-gauge reading
    /// in one vertical strip, so only the ancillas on rows 0 and 1 seed a
    /// detector; deeper rows join through the column walk.
    pub(crate) fn emit_x_gauge_detectors(
        &mut self,
        parity: ParityFactor,
        round: u32,
    ) -> CircuitResult<()> {
        let side = self.layout.side();
        for &q in self.layout.x_gauge_qubits() {
            let (row, col) = self.layout.coord(q);
            if row > 1 {
                continue;
            }
            let mut recs = Vec::new();
            let mut walk = q.0;
            while walk < side * side {
                let ancilla = QubitId(walk);
                if self.layout.is_x_gauge(ancilla) {
                    recs.push(self.writer.rec(ancilla, 1)?);
                    if parity == ParityFactor::Paired {
                        recs.push(self.writer.rec(ancilla, 2)?);
                    }
                }
                walk += side;
            }
            self.writer.detector(row, col, round, &recs);
        }
        Ok(())
    }

    /// Terminal detectors: the last gauge readings against the
    /// destructive data measurements they project onto.
    pub(crate) fn emit_data_detectors(&mut self) -> CircuitResult<()> {
        match self.config.basis {
            Basis::Z => self.emit_data_detectors_z(),
            Basis::X => self.emit_data_detectors_x(),
        }
    }

    /// Z basis: each surviving Z-gauge detector absorbs the terminal
    /// readings of its adjacent data qubits.
    fn emit_data_detectors_z(&mut self) -> CircuitResult<()> {
        let side = self.layout.side();
        let last = side - 1;
        let round = self.config.rounds;

        for &q in self.layout.z_gauge_qubits() {
            let (row, col) = self.layout.coord(q);

            if (col == 0 && row % 4 == 3) || (col == last && row % 4 == 1) {
                // Boundary short check: two vertical data neighbours.
                let mut recs = vec![self.latest_gauge_rec(q)?];
                for data in [QubitId(q.0 - side), q, QubitId(q.0 + side)] {
                    recs.push(self.writer.rec(data, 1)?);
                }
                self.writer.detector(row, col, round, &recs);
            } else if col == last && row % 4 == 3 {
                // Covered by the pair detector two columns west.
            } else if !self.layout.is_x_gauge(QubitId(q.0 + 1)) {
                // Interior weight-4 check over the paired ancillas.
                let east_pair = QubitId(q.0 + 2);
                let mut recs = vec![
                    self.latest_gauge_rec(q)?,
                    self.latest_gauge_rec(east_pair)?,
                ];
                for data in [
                    QubitId(q.0 - side),
                    QubitId(q.0 + side),
                    QubitId(q.0 - side + 2),
                    QubitId(q.0 + side + 2),
                ] {
                    recs.push(self.writer.rec(data, 1)?);
                }
                self.writer.detector(row, col, round, &recs);
            }
        }
        Ok(())
    }

    /// X basis: each strip detector absorbs every ancilla reading in the
    /// strip plus the data qubits adjacent to each ancilla (weight 2 on
    /// the top and bottom rows, weight 4 in the interior).
    fn emit_data_detectors_x(&mut self) -> CircuitResult<()> {
        let side = self.layout.side();
        let last = side - 1;
        let round = self.config.rounds;

        for &q in self.layout.x_gauge_qubits() {
            let (row, col) = self.layout.coord(q);
            if row > 1 {
                continue;
            }
            let mut recs = Vec::new();
            let mut walk = q.0;
            while walk < side * side {
                let ancilla = QubitId(walk);
                if self.layout.is_x_gauge(ancilla) {
                    recs.push(self.writer.rec(ancilla, 1)?);
                    let ancilla_row = walk / side;
                    let data: Vec<u32> = if ancilla_row == 0 || ancilla_row == last {
                        vec![walk - 1, walk + 1]
                    } else {
                        vec![
                            walk - side - 1,
                            walk - side + 1,
                            walk + side - 1,
                            walk + side + 1,
                        ]
                    };
                    for dq in data {
                        recs.push(self.writer.rec(QubitId(dq), 1)?);
                    }
                }
                walk += side;
            }
            self.writer.detector(row, col, round, &recs);
        }
        Ok(())
    }

    /// Latest gauge reading of a Z-gauge ancilla at terminal time. In the
    /// Z basis the round closes with an X-check, so a flag's newest entry
    /// is its flag reading; step past it.
    fn latest_gauge_rec(&self, q: QubitId) -> CircuitResult<RecOffset> {
        let back = if self.layout.is_flag(q) { 2 } else { 1 };
        Ok(self.writer.rec(q, back)?)
    }

    /// Gauge reading of a Z-gauge ancilla one round earlier, skipping the
    /// interleaved flag reading where the ancilla also flags.
    fn previous_gauge_rec(&self, q: QubitId) -> CircuitResult<RecOffset> {
        let back = if self.layout.is_flag(q) { 3 } else { 2 };
        Ok(self.writer.rec(q, back)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_factor_conversion() {
        assert_eq!(ParityFactor::try_from(1).unwrap(), ParityFactor::Single);
        assert_eq!(ParityFactor::try_from(2).unwrap(), ParityFactor::Paired);
        assert!(matches!(
            ParityFactor::try_from(3),
            Err(CircuitError::InvalidParityFactor(3))
        ));
        assert!(ParityFactor::try_from(0).is_err());
    }
}
