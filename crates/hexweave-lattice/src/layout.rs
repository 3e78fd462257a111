//! Qubit placement and role classification.
//!
//! Role predicates over a cell (row, col) of the (2d−1)-sided grid, in
//! priority order:
//!
//! - **Data**: row and col both even. d² of these.
//! - **X-gauge**: the heavy-hex bridge positions, odd cells on every
//!   fourth column with the top and bottom rows folded in.
//! - **Z-gauge**: odd row, even col. All of them measure Z-type gauge
//!   operators; all but the two boundary classes additionally serve as
//!   flag qubits during X-gauge extraction.
//!
//! Remaining cells are unused. Roles are disjoint (flag is a property of
//! Z-gauge, not a fourth role) and stable for a given distance.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, LatticeResult};
use crate::qubit::QubitId;

/// The role a used grid cell plays in the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitRole {
    /// Carries the encoded state.
    Data,
    /// Ancilla on the control side of X-type gauge extraction.
    XGauge,
    /// Ancilla measuring a Z-type gauge operator. `flag` marks the ones
    /// that also catch hook errors during X-gauge extraction.
    ZGauge {
        /// Whether this ancilla doubles as a flag qubit.
        flag: bool,
    },
}

/// Heavy-hex layout for one code distance.
///
/// Role lists are ascending by linear index; membership queries are O(1).
#[derive(Debug, Clone)]
pub struct HeavyHexLayout {
    distance: u32,
    side: u32,
    data_qubits: Vec<QubitId>,
    x_gauge_qubits: Vec<QubitId>,
    z_gauge_qubits: Vec<QubitId>,
    flag_qubits: Vec<QubitId>,
    data_set: FxHashSet<QubitId>,
    x_gauge_set: FxHashSet<QubitId>,
    z_gauge_set: FxHashSet<QubitId>,
    flag_set: FxHashSet<QubitId>,
}

impl HeavyHexLayout {
    /// Classify every cell of the grid for the given code distance.
    ///
    /// Fails with [`LatticeError::InvalidDistance`] unless the distance is
    /// an odd integer of at least 3; the heavy-hex construction has no
    /// even-distance member.
    pub fn new(distance: u32) -> LatticeResult<Self> {
        if distance < 3 || distance % 2 == 0 {
            return Err(LatticeError::InvalidDistance(distance));
        }
        let side = 2 * distance - 1;
        let mut layout = Self {
            distance,
            side,
            data_qubits: Vec::new(),
            x_gauge_qubits: Vec::new(),
            z_gauge_qubits: Vec::new(),
            flag_qubits: Vec::new(),
            data_set: FxHashSet::default(),
            x_gauge_set: FxHashSet::default(),
            z_gauge_set: FxHashSet::default(),
            flag_set: FxHashSet::default(),
        };
        for row in 0..side {
            for col in 0..side {
                let q = layout.index(row, col);
                match layout.classify(row, col) {
                    Some(QubitRole::Data) => {
                        layout.data_qubits.push(q);
                        layout.data_set.insert(q);
                    }
                    Some(QubitRole::XGauge) => {
                        layout.x_gauge_qubits.push(q);
                        layout.x_gauge_set.insert(q);
                    }
                    Some(QubitRole::ZGauge { flag }) => {
                        layout.z_gauge_qubits.push(q);
                        layout.z_gauge_set.insert(q);
                        if flag {
                            layout.flag_qubits.push(q);
                            layout.flag_set.insert(q);
                        }
                    }
                    None => {}
                }
            }
        }
        Ok(layout)
    }

    /// The code distance.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Grid side length, 2d − 1.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Linear index of the cell at (row, col).
    pub fn index(&self, row: u32, col: u32) -> QubitId {
        QubitId(row * self.side + col)
    }

    /// (row, col) of a linear index.
    pub fn coord(&self, qubit: QubitId) -> (u32, u32) {
        (qubit.0 / self.side, qubit.0 % self.side)
    }

    /// Role of the cell at (row, col), or `None` for an unused cell.
    pub fn classify(&self, row: u32, col: u32) -> Option<QubitRole> {
        let last = self.side - 1;
        if row % 2 == 0 && col % 2 == 0 {
            Some(QubitRole::Data)
        } else if ((row % 4 == 1 || row == last) && col % 4 == 3)
            || ((row % 4 == 3 || row == 0) && col % 4 == 1)
        {
            Some(QubitRole::XGauge)
        } else if row % 2 == 1 && col % 2 == 0 {
            // The two boundary classes carry short Z checks and never flag.
            let flag = !((col == 0 && row % 4 == 1) || (col == last && row % 4 == 3));
            Some(QubitRole::ZGauge { flag })
        } else {
            None
        }
    }

    /// Data qubits, ascending.
    pub fn data_qubits(&self) -> &[QubitId] {
        &self.data_qubits
    }

    /// X-gauge ancillas, ascending.
    pub fn x_gauge_qubits(&self) -> &[QubitId] {
        &self.x_gauge_qubits
    }

    /// Z-gauge ancillas (flags included), ascending.
    pub fn z_gauge_qubits(&self) -> &[QubitId] {
        &self.z_gauge_qubits
    }

    /// Flag qubits, ascending. A strict subset of the Z-gauge ancillas.
    pub fn flag_qubits(&self) -> &[QubitId] {
        &self.flag_qubits
    }

    /// Whether `qubit` is a data qubit.
    pub fn is_data(&self, qubit: QubitId) -> bool {
        self.data_set.contains(&qubit)
    }

    /// Whether `qubit` is an X-gauge ancilla.
    pub fn is_x_gauge(&self, qubit: QubitId) -> bool {
        self.x_gauge_set.contains(&qubit)
    }

    /// Whether `qubit` is a Z-gauge ancilla (flag or not).
    pub fn is_z_gauge(&self, qubit: QubitId) -> bool {
        self.z_gauge_set.contains(&qubit)
    }

    /// Whether `qubit` is a flag qubit.
    pub fn is_flag(&self, qubit: QubitId) -> bool {
        self.flag_set.contains(&qubit)
    }
}
