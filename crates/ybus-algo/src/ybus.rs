//! # Y-Bus (Admittance Matrix) Construction
//!
//! The Y-bus relates node voltages to injected currents, **I = Y · V**. For an
//! n-node network it is an n×n complex matrix:
//!
//! - **Diagonal** (Y_ii): sum of every admittance touching node i, including shunts
//! - **Off-diagonal** (Y_ij): negative of the series admittance between nodes i and j
//!
//! ## Branch Model (π-model)
//!
//! ```text
//!        ┌───[R + jX]───┐
//!        │              │
//!   i ───┼──┬────────┬──┼─── j
//!        │  │        │  │
//!        │ ═══      ═══ │    (jB shunt at the selected ends)
//!        │  │        │  │
//!        └──┴────────┴──┘
//!            ⏊        ⏊
//! ```
//!
//! Series admittance `y = 1/(R + jX)`. Contributions:
//!
//! ```text
//! two real nodes:     Y_ii += y   Y_jj += y   Y_ij -= y   Y_ji -= y
//! node to ground:     Y_ii += y                (ground has no row/column)
//! shunt at terminal:  Y_kk += jB
//! ```
//!
//! Which terminals receive `jB` is decided by the [`StampingPolicy`]:
//!
//! | Policy                | From-node          | To-node                         |
//! |-----------------------|--------------------|---------------------------------|
//! | `GroundCapable`       | always             | when it is a real node          |
//! | `LocationSelectable`  | `start` / `both`   | `end` / `both`                  |
//!
//! ## Zero Impedance
//!
//! A branch with `R + jX == 0` exactly would be a short circuit, which has no
//! finite admittance. It is stamped as `y = 0`: the branch contributes nothing
//! through its series element. Its shunt term is still applied.
//!
//! ## Tiny Impedances
//!
//! The reciprocal is taken with Smith's scaled division, so `|z|²` is never
//! formed and impedances down to about `1e-308` still give finite, accurate
//! admittances. Anything smaller overflows; the builder reports the first
//! non-finite entry as [`YBusError::NonFiniteAdmittance`] instead of storing it.
//!
//! ## References
//!
//! - **Grainger & Stevenson**: "Power System Analysis", Chapter 8

use num_complex::Complex64;
use tracing::{debug, trace};
use ybus_core::{Branch, StampingPolicy, YBusError, YBusResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Series admittance `1 / (R + jX)`, or zero when the impedance is exactly zero.
pub fn series_admittance(z: Complex64) -> Complex64 {
    let (r, x) = (z.re, z.im);
    if r == 0.0 && x == 0.0 {
        return ZERO;
    }
    // Scale by the larger component; r² + x² underflows below ~1e-154
    if r.abs() >= x.abs() {
        let ratio = x / r;
        let denom = r + x * ratio;
        Complex64::new(1.0 / denom, -ratio / denom)
    } else {
        let ratio = r / x;
        let denom = x + r * ratio;
        Complex64::new(ratio / denom, -1.0 / denom)
    }
}

/// Dense Y-bus matrix.
///
/// Built once by [`YBusBuilder`] and read-only afterwards. Storage is row-major:
/// element (i, j) lives at `i * n_nodes + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct YBus {
    n_nodes: usize,
    data: Vec<Complex64>,
}

impl YBus {
    /// Number of stored entries for `n_nodes`, or `None` if the dense matrix
    /// cannot be allocated on this platform.
    pub fn entry_count(n_nodes: usize) -> Option<usize> {
        let max_entries = isize::MAX as usize / std::mem::size_of::<Complex64>();
        n_nodes
            .checked_mul(n_nodes)
            .filter(|&len| len <= max_entries)
    }

    fn zeros(n_nodes: usize) -> YBusResult<Self> {
        let len = Self::entry_count(n_nodes).ok_or(YBusError::TooManyNodes { n_nodes })?;
        Ok(Self {
            n_nodes,
            data: vec![ZERO; len],
        })
    }

    /// Admittance Y_ij (0-based).
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not below [`n_nodes`](Self::n_nodes).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        assert!(
            row < self.n_nodes && col < self.n_nodes,
            "index ({}, {}) out of range for {}x{} Y-bus",
            row,
            col,
            self.n_nodes,
            self.n_nodes
        );
        self.data[row * self.n_nodes + col]
    }

    /// Admittance Y_ij, or `None` outside the matrix.
    pub fn try_get(&self, row: usize, col: usize) -> Option<Complex64> {
        (row < self.n_nodes && col < self.n_nodes).then(|| self.data[row * self.n_nodes + col])
    }

    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut Complex64 {
        &mut self.data[row * self.n_nodes + col]
    }

    /// Matrix dimension N.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Row `row` as a slice of N entries.
    pub fn row(&self, row: usize) -> &[Complex64] {
        let start = row * self.n_nodes;
        &self.data[start..start + self.n_nodes]
    }

    /// Rows in order, each a slice of N entries.
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> + '_ {
        // chunks_exact(0) panics; an empty matrix has no rows anyway
        self.data.chunks_exact(self.n_nodes.max(1))
    }

    /// Nested `Vec` copy, one inner `Vec` per row.
    pub fn to_nested(&self) -> Vec<Vec<Complex64>> {
        self.rows().map(<[Complex64]>::to_vec).collect()
    }

    /// Conductance matrix G = Re(Y), row-major.
    pub fn g_matrix(&self) -> Vec<f64> {
        self.data.iter().map(|y| y.re).collect()
    }

    /// Susceptance matrix B = Im(Y), row-major.
    pub fn b_matrix(&self) -> Vec<f64> {
        self.data.iter().map(|y| y.im).collect()
    }

    /// Whether Y_ij and Y_ji agree within `tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n_nodes).all(|i| {
            (i + 1..self.n_nodes).all(|j| (self.get(i, j) - self.get(j, i)).norm() <= tol)
        })
    }
}

/// Assembles a [`YBus`] from a branch list under one [`StampingPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct YBusBuilder {
    policy: StampingPolicy,
}

impl YBusBuilder {
    /// Builder stamping under `policy`.
    pub fn new(policy: StampingPolicy) -> Self {
        Self { policy }
    }

    /// Policy this builder stamps with.
    pub fn policy(&self) -> StampingPolicy {
        self.policy
    }

    /// Stamp every branch into a fresh `n_nodes × n_nodes` matrix.
    ///
    /// Inputs are expected to have passed [`crate::validation::validate`]. The
    /// builder does not re-run the topology checks, but any node reference it
    /// cannot place in the matrix is an error, never wrapped or clamped:
    ///
    /// * `Err(YBusError::NoNodes)` - `n_nodes == 0`
    /// * `Err(YBusError::NodeOutOfRange)` - node outside `1..=n_nodes`, or a ground from-node
    /// * `Err(YBusError::GroundNotRepresentable)` - ground to-node under `LocationSelectable`
    /// * `Err(YBusError::TooManyNodes)` - the dense matrix cannot be allocated
    /// * `Err(YBusError::NonFiniteAdmittance)` - a stamp left a NaN or infinite entry
    pub fn build(&self, n_nodes: usize, branches: &[Branch]) -> YBusResult<YBus> {
        if n_nodes == 0 {
            return Err(YBusError::NoNodes);
        }

        let mut ybus = YBus::zeros(n_nodes)?;

        for (pos, branch) in branches.iter().enumerate() {
            let (i, j) = self.terminals(pos, branch, n_nodes)?;

            let y = series_admittance(branch.impedance());
            if y == ZERO {
                debug!(
                    branch = pos + 1,
                    "zero impedance, branch contributes no series admittance"
                );
            }

            match j {
                Some(j) => {
                    *ybus.get_mut(i, i) += y;
                    *ybus.get_mut(j, j) += y;
                    *ybus.get_mut(i, j) -= y;
                    *ybus.get_mut(j, i) -= y;
                }
                None => {
                    *ybus.get_mut(i, i) += y;
                }
            }

            let (shunt_from, shunt_to) = match self.policy {
                StampingPolicy::GroundCapable => (true, true),
                StampingPolicy::LocationSelectable => (
                    branch.shunt_location.at_start(),
                    branch.shunt_location.at_end(),
                ),
            };
            let y_shunt = Complex64::new(0.0, branch.shunt_susceptance);
            if shunt_from {
                *ybus.get_mut(i, i) += y_shunt;
            }
            if let (true, Some(j)) = (shunt_to, j) {
                *ybus.get_mut(j, j) += y_shunt;
            }

            let k = j.unwrap_or(i);
            if let Some(&(row, col)) = [(i, i), (i, k), (k, i), (k, k)]
                .iter()
                .find(|&&(row, col)| !ybus.get(row, col).is_finite())
            {
                return Err(YBusError::NonFiniteAdmittance {
                    branch: pos + 1,
                    row,
                    col,
                });
            }

            trace!(branch = pos + 1, from = i, to = ?j, %y, %y_shunt, "stamped");
        }

        debug!(
            n_nodes,
            branches = branches.len(),
            policy = %self.policy,
            "assembled Y-bus"
        );
        Ok(ybus)
    }

    /// 0-based terminal indices; `None` on the far end means ground.
    fn terminals(
        &self,
        pos: usize,
        branch: &Branch,
        n_nodes: usize,
    ) -> YBusResult<(usize, Option<usize>)> {
        let out_of_range = |node| YBusError::NodeOutOfRange {
            branch: pos + 1,
            node,
            n_nodes,
        };

        if !branch.from_node.in_range(n_nodes) {
            return Err(out_of_range(branch.from_node));
        }
        let i = branch
            .from_node
            .index()
            .ok_or_else(|| out_of_range(branch.from_node))?;

        if branch.to_node.is_ground() {
            if !self.policy.allows_ground() {
                return Err(YBusError::GroundNotRepresentable { branch: pos + 1 });
            }
            return Ok((i, None));
        }
        if !branch.to_node.in_range(n_nodes) {
            return Err(out_of_range(branch.to_node));
        }
        Ok((i, branch.to_node.index()))
    }
}
