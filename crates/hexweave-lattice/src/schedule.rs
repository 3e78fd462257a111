//! Tick-slot CNOT schedule for flagged gauge extraction.
//!
//! One syndrome round runs a five-tick X-gauge extraction (cycles 2–6,
//! with the X-gauge ancillas Hadamard-conjugated so they sit on the
//! control line) followed by a three-tick Z-gauge extraction (cycles
//! 8–10, data on the control line). The pairs follow Fig. 2 of
//! Chamberland et al. (arXiv:1907.09528): every Z-gauge ancilla couples
//! to the X-gauge ancilla beside it and to its two vertical data
//! neighbours; edge ancillas with no horizontal X-gauge neighbour bridge
//! straight to data; the top and bottom rows attach their X-gauge
//! ancillas to a single data qubit (the "bacon strip" checks).

use crate::layout::HeavyHexLayout;
use crate::qubit::QubitId;

/// An ordered (control, target) CNOT pair.
pub type CnotPair = (QubitId, QubitId);

/// The eight per-tick CNOT pair lists of one extraction round.
///
/// Within any single list no qubit appears twice, so each list can run as
/// one parallel tick on hardware. Pair order is the deterministic
/// row-major scan order of the grid.
#[derive(Debug, Clone, Default)]
pub struct CnotSchedule {
    /// X extraction, tick 2.
    pub second: Vec<CnotPair>,
    /// X extraction, tick 3.
    pub third: Vec<CnotPair>,
    /// X extraction, tick 4.
    pub fourth: Vec<CnotPair>,
    /// X extraction, tick 5.
    pub fifth: Vec<CnotPair>,
    /// X extraction, tick 6.
    pub sixth: Vec<CnotPair>,
    /// Z extraction, tick 8.
    pub eighth: Vec<CnotPair>,
    /// Z extraction, tick 9.
    pub ninth: Vec<CnotPair>,
    /// Z extraction, tick 10.
    pub tenth: Vec<CnotPair>,
}

impl CnotSchedule {
    /// Derive the schedule from a layout.
    pub fn build(layout: &HeavyHexLayout) -> Self {
        let side = layout.side();
        let last = side - 1;
        let mut schedule = Self::default();

        for row in 0..side {
            for col in 0..side {
                if row % 2 == 1 && col % 2 == 0 {
                    schedule.add_z_gauge_pairs(layout, row, col);
                } else if row == 0 && col % 4 == 2 {
                    let q = layout.index(row, col);
                    let west = layout.index(row, col - 1);
                    if layout.is_x_gauge(west) {
                        schedule.fourth.push((west, q));
                    }
                } else if row == 0 && col % 4 == 0 {
                    if col < last {
                        let q = layout.index(row, col);
                        let east = layout.index(row, col + 1);
                        if layout.is_x_gauge(east) {
                            schedule.fifth.push((east, q));
                        }
                    }
                } else if row == last && col % 4 == 2 {
                    let q = layout.index(row, col);
                    let east = layout.index(row, col + 1);
                    if layout.is_x_gauge(east) {
                        schedule.sixth.push((east, q));
                    }
                } else if row == last && col % 4 == 0 {
                    if col > 0 {
                        let q = layout.index(row, col);
                        let west = layout.index(row, col - 1);
                        if layout.is_x_gauge(west) {
                            schedule.fifth.push((west, q));
                        }
                    }
                }
            }
        }
        schedule
    }

    /// Pairs contributed by the Z-gauge ancilla at (row, col).
    ///
    /// At most one of its horizontal neighbours is an X-gauge ancilla; the
    /// side it sits on fixes which ticks carry the vertical data
    /// couplings. An ancilla with no X-gauge neighbour is an edge bridge
    /// and only joins the Z-extraction ticks.
    fn add_z_gauge_pairs(&mut self, layout: &HeavyHexLayout, row: u32, col: u32) {
        let last = layout.side() - 1;
        let q = layout.index(row, col);
        let north = layout.index(row - 1, col);
        let south = layout.index(row + 1, col);

        let west = (col > 0)
            .then(|| layout.index(row, col - 1))
            .filter(|&w| layout.is_x_gauge(w));
        let east = (col < last)
            .then(|| layout.index(row, col + 1))
            .filter(|&e| layout.is_x_gauge(e));

        if let Some(west) = west {
            self.second.push((west, q));
            self.fifth.push((west, q));
            if layout.is_data(north) {
                self.third.push((q, north));
                self.eighth.push((north, q));
            }
            if layout.is_data(south) {
                self.fourth.push((q, south));
                self.ninth.push((south, q));
            }
        }
        if let Some(east) = east {
            self.third.push((east, q));
            self.sixth.push((east, q));
            if layout.is_data(south) {
                self.fourth.push((q, south));
                self.ninth.push((south, q));
            }
            if layout.is_data(north) {
                self.fifth.push((q, north));
                self.tenth.push((north, q));
            }
        }
        if west.is_none() && east.is_none() {
            if col == 0 {
                if layout.is_data(north) {
                    self.eighth.push((north, q));
                }
                if layout.is_data(south) {
                    self.ninth.push((south, q));
                }
            } else if col == last {
                if layout.is_data(north) {
                    self.tenth.push((north, q));
                }
                if layout.is_data(south) {
                    self.ninth.push((south, q));
                }
            }
        }
    }

    /// The X-extraction tick lists in firing order.
    pub fn x_cycles(&self) -> [&[CnotPair]; 5] {
        [
            &self.second,
            &self.third,
            &self.fourth,
            &self.fifth,
            &self.sixth,
        ]
    }

    /// The Z-extraction tick lists in firing order.
    pub fn z_cycles(&self) -> [&[CnotPair]; 3] {
        [&self.eighth, &self.ninth, &self.tenth]
    }
}
