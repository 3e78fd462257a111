//! Round assembly for the heavy-hex memory experiment.
//!
//! The emitted program has four phases: qubit declaration and reset, the
//! round-0 projection (which measures both gauge types and fixes the
//! gauge frame), the steady-state rounds wrapped in a textual `REPEAT`,
//! and the destructive data measurement with its terminal detectors and
//! the logical observable. Noise channels appear only when their
//! probability is strictly positive.

use tracing::debug;

use hexweave_lattice::{CnotSchedule, HeavyHexLayout, QubitId};
use hexweave_stim::{Basis, StimWriter};

use crate::config::MemoryConfig;
use crate::detectors::ParityFactor;
use crate::error::CircuitResult;

/// One-shot compiler for a heavy-hex memory experiment.
///
/// Built from a [`MemoryConfig`]; [`generate`](Self::generate) consumes
/// the compiler, so the measurement record can never leak into a second
/// circuit.
pub struct MemoryCircuit {
    pub(crate) config: MemoryConfig,
    pub(crate) layout: HeavyHexLayout,
    pub(crate) schedule: CnotSchedule,
    pub(crate) writer: StimWriter,
    /// Flags first, then X-gauge ancillas: the joint `MR` order of every
    /// X-check.
    pub(crate) x_check_targets: Vec<QubitId>,
}

impl MemoryCircuit {
    /// Validate the configuration and derive layout and schedule.
    pub fn new(config: MemoryConfig) -> CircuitResult<Self> {
        config.validate()?;
        let layout = HeavyHexLayout::new(config.distance)?;
        let schedule = CnotSchedule::build(&layout);
        let x_check_targets = layout
            .flag_qubits()
            .iter()
            .chain(layout.x_gauge_qubits())
            .copied()
            .collect();
        Ok(Self {
            config,
            layout,
            schedule,
            writer: StimWriter::new(),
            x_check_targets,
        })
    }

    /// Emit the complete memory-experiment circuit as Stim text.
    pub fn generate(mut self) -> CircuitResult<String> {
        debug!(
            distance = self.config.distance,
            rounds = self.config.rounds,
            basis = %self.config.basis,
            "generating heavy-hex memory circuit"
        );

        self.emit_header();
        self.emit_resets();
        self.emit_round_zero()?;
        self.emit_steady_rounds()?;
        self.emit_terminal()?;

        debug!(
            measurements = self.writer.record().counter(),
            "memory circuit complete"
        );
        Ok(self.writer.finish())
    }

    /// One `QUBIT_COORDS` per qubit: data, then X-gauge, then Z-gauge.
    fn emit_header(&mut self) {
        let groups = [
            self.layout.data_qubits(),
            self.layout.x_gauge_qubits(),
            self.layout.z_gauge_qubits(),
        ];
        for group in groups {
            for &q in group {
                let (row, col) = self.layout.coord(q);
                self.writer.qubit_coords(row, col, q);
            }
        }
    }

    /// Reset data in the experiment basis and every ancilla in Z, with
    /// the matching post-reset flips.
    fn emit_resets(&mut self) {
        let arfp = self.config.noise.after_reset_flip_probability;

        self.writer.reset(self.config.basis, self.layout.data_qubits());
        if arfp > 0.0 {
            self.writer
                .flip_error(self.config.basis, arfp, self.layout.data_qubits());
        }

        self.writer.reset(Basis::Z, self.layout.x_gauge_qubits());
        if arfp > 0.0 {
            self.writer
                .flip_error(Basis::Z, arfp, self.layout.x_gauge_qubits());
        }

        self.writer.reset(Basis::Z, self.layout.z_gauge_qubits());
        if arfp > 0.0 {
            self.writer
                .flip_error(Basis::Z, arfp, self.layout.z_gauge_qubits());
        }

        self.writer.tick();
    }

    /// The Hadamard-bracketed five-tick X-gauge extraction, closed by a
    /// joint measure-reset of flags and X-gauge ancillas.
    pub(crate) fn emit_x_check(&mut self) {
        let p_acd = self.config.noise.after_clifford_depolarization;
        let bmfp = self.config.noise.before_measure_flip_probability;
        let arfp = self.config.noise.after_reset_flip_probability;

        self.writer.h(self.layout.x_gauge_qubits());
        if p_acd > 0.0 {
            self.writer.depolarize1(p_acd, self.layout.x_gauge_qubits());
        }

        for cycle in self.schedule.x_cycles() {
            self.writer.cnot(cycle);
            if p_acd > 0.0 {
                self.writer.depolarize2(p_acd, cycle);
            }
            self.writer.tick();
        }

        self.writer.h(self.layout.x_gauge_qubits());
        if p_acd > 0.0 {
            self.writer.depolarize1(p_acd, self.layout.x_gauge_qubits());
        }
        self.writer.tick();

        if bmfp > 0.0 {
            self.writer.x_error(bmfp, &self.x_check_targets);
        }
        self.writer.measure_reset(&self.x_check_targets);
        if arfp > 0.0 {
            self.writer.x_error(arfp, &self.x_check_targets);
        }
    }

    /// The three-tick Z-gauge extraction, closed by a measure-reset of
    /// all Z-gauge ancillas.
    pub(crate) fn emit_z_check(&mut self) {
        let p_acd = self.config.noise.after_clifford_depolarization;
        let bmfp = self.config.noise.before_measure_flip_probability;
        let arfp = self.config.noise.after_reset_flip_probability;

        for cycle in self.schedule.z_cycles() {
            self.writer.cnot(cycle);
            if p_acd > 0.0 {
                self.writer.depolarize2(p_acd, cycle);
            }
            self.writer.tick();
        }

        if bmfp > 0.0 {
            self.writer.x_error(bmfp, self.layout.z_gauge_qubits());
        }
        self.writer.measure_reset(self.layout.z_gauge_qubits());
        if arfp > 0.0 {
            self.writer.x_error(arfp, self.layout.z_gauge_qubits());
        }
    }

    /// Round 0: project the fresh product state onto both gauge
    /// eigenbases. The checks of the preparation basis come out
    /// deterministic immediately; the conjugate checks need a second
    /// sweep before their pairwise comparison is meaningful.
    fn emit_round_zero(&mut self) -> CircuitResult<()> {
        let brdd = self.config.noise.before_round_data_depolarization;
        if brdd > 0.0 {
            self.writer.depolarize1(brdd, self.layout.data_qubits());
        }

        match self.config.basis {
            Basis::Z => {
                self.emit_x_check();
                self.emit_flag_detectors(0)?;
                self.emit_z_check();
                self.emit_z_gauge_detectors(ParityFactor::Single, 0)?;
                self.emit_x_check();
                self.emit_x_gauge_detectors(ParityFactor::Paired, 0)?;
                self.emit_flag_detectors(0)?;
            }
            Basis::X => {
                self.emit_z_check();
                self.emit_x_check();
                self.emit_x_gauge_detectors(ParityFactor::Single, 0)?;
                self.emit_flag_detectors(0)?;
                self.emit_z_check();
                self.emit_z_gauge_detectors(ParityFactor::Paired, 0)?;
            }
        }
        Ok(())
    }

    /// Rounds 1..R as one `REPEAT (R−1)` block; nothing when R = 1.
    fn emit_steady_rounds(&mut self) -> CircuitResult<()> {
        if self.config.rounds <= 1 {
            return Ok(());
        }
        self.writer.begin_repeat(self.config.rounds - 1);
        self.writer.tick();

        let brdd = self.config.noise.before_round_data_depolarization;
        if brdd > 0.0 {
            self.writer.depolarize1(brdd, self.layout.data_qubits());
        }

        match self.config.basis {
            Basis::Z => {
                self.emit_z_check();
                self.emit_z_gauge_detectors(ParityFactor::Paired, 0)?;
                self.emit_x_check();
                self.emit_x_gauge_detectors(ParityFactor::Paired, 0)?;
                self.emit_flag_detectors(0)?;
            }
            Basis::X => {
                self.emit_x_check();
                self.emit_x_gauge_detectors(ParityFactor::Paired, 0)?;
                self.emit_flag_detectors(0)?;
                self.emit_z_check();
                self.emit_z_gauge_detectors(ParityFactor::Paired, 0)?;
            }
        }

        self.writer.end_repeat()?;
        Ok(())
    }

    /// Destructive data measurement, terminal detectors, observable.
    fn emit_terminal(&mut self) -> CircuitResult<()> {
        let bmfp = self.config.noise.before_measure_flip_probability;
        if bmfp > 0.0 {
            self.writer
                .flip_error(self.config.basis, bmfp, self.layout.data_qubits());
        }
        self.writer.measure(self.config.basis, self.layout.data_qubits());

        self.emit_data_detectors()?;
        self.emit_observable()
    }

    /// `OBSERVABLE_INCLUDE(0)` over the terminal measurements of one
    /// logical-operator support: the first data row for logical Z, the
    /// first data column for logical X.
    fn emit_observable(&mut self) -> CircuitResult<()> {
        let side = self.layout.side();
        let selected: Vec<QubitId> = self
            .layout
            .data_qubits()
            .iter()
            .filter(|q| match self.config.basis {
                Basis::X => q.0 % side == 0,
                Basis::Z => q.0 / side == 0,
            })
            .copied()
            .collect();

        let mut recs = Vec::with_capacity(selected.len());
        for q in selected {
            recs.push(self.writer.rec(q, 1)?);
        }
        self.writer.observable_include(0, &recs);
        Ok(())
    }
}
