//! Structural validation ahead of Y-bus assembly.
//!
//! Every check the builder relies on lives here, so a request that passes
//! [`validate`] without errors can always be stamped. The one exception is a
//! sum of near-`f64::MAX` admittances overflowing on a shared entry, which
//! the builder reports as `NonFiniteAdmittance`. The gate inspects the whole
//! request and reports all issues at once.
//!
//! | Check                                   | Ground-capable | Location-selectable |
//! |-----------------------------------------|----------------|---------------------|
//! | at least 2 nodes, at least 1 branch     | error          | error               |
//! | dense matrix too large to allocate      | error          | error               |
//! | from node is ground                     | error          | error               |
//! | node number above `n_nodes`             | error          | error               |
//! | to node is ground                       | allowed        | error               |
//! | from == to                              | error unless ground | error          |
//! | non-finite R, X or B                    | error          | error               |
//! | 1 / (R + jX) overflows                  | error          | error               |
//! | R + jX == 0                             | warning        | warning             |

use ybus_core::{Branch, Category, Diagnostics, StampingPolicy, YBusResult};

use crate::ybus::{series_admittance, YBus};

/// Smallest network the gate accepts.
pub const MIN_NODES: usize = 2;

/// Run every structural check and collect the findings.
pub fn validate(n_nodes: usize, branches: &[Branch], policy: StampingPolicy) -> Diagnostics {
    let mut diag = Diagnostics::new();

    if n_nodes < MIN_NODES {
        diag.add_error(
            Category::Input,
            format!(
                "Network needs at least {} nodes, got {}",
                MIN_NODES, n_nodes
            ),
        );
    }
    if YBus::entry_count(n_nodes).is_none() {
        diag.add_error(
            Category::Input,
            format!("{} nodes is too many for a dense Y-bus", n_nodes),
        );
    }
    if branches.is_empty() {
        diag.add_error(Category::Input, "No branches to stamp");
    }

    for (pos, branch) in branches.iter().enumerate() {
        let label = branch.label(pos);
        check_terminals(&mut diag, &label, branch, n_nodes, policy);
        check_values(&mut diag, &label, branch);
    }

    diag
}

/// [`validate`], turning any error into `YBusError::Validation`.
pub fn ensure_valid(
    n_nodes: usize,
    branches: &[Branch],
    policy: StampingPolicy,
) -> YBusResult<Diagnostics> {
    validate(n_nodes, branches, policy).into_result()
}

fn check_terminals(
    diag: &mut Diagnostics,
    label: &str,
    branch: &Branch,
    n_nodes: usize,
    policy: StampingPolicy,
) {
    let (from, to) = (branch.from_node, branch.to_node);

    if from.is_ground() {
        diag.add_branch_error(Category::Topology, label, "From node cannot be 0 (ground)");
    } else if !from.in_range(n_nodes) {
        diag.add_branch_error(
            Category::Range,
            label,
            format!("From node {} is outside 1..={}", from.value(), n_nodes),
        );
    }

    if to.is_ground() {
        if !policy.allows_ground() {
            diag.add_branch_error(
                Category::Topology,
                label,
                format!("Ground connections are not supported by the {} policy", policy),
            );
        }
    } else if !to.in_range(n_nodes) {
        diag.add_branch_error(
            Category::Range,
            label,
            format!("To node {} is outside 1..={}", to.value(), n_nodes),
        );
    }

    let self_loop = match policy {
        StampingPolicy::GroundCapable => from == to && !to.is_ground(),
        StampingPolicy::LocationSelectable => from == to,
    };
    if self_loop {
        let message = match policy {
            StampingPolicy::GroundCapable => {
                "From and to nodes cannot be equal, except for ground connections"
            }
            StampingPolicy::LocationSelectable => "From and to nodes cannot be equal",
        };
        diag.add_branch_error(Category::Topology, label, message);
    }
}

fn check_values(diag: &mut Diagnostics, label: &str, branch: &Branch) {
    let fields = [
        ("resistance", branch.resistance),
        ("reactance", branch.reactance),
        ("shunt susceptance", branch.shunt_susceptance),
    ];
    let mut finite = true;
    for (name, value) in fields {
        if !value.is_finite() {
            finite = false;
            diag.add_branch_error(
                Category::Impedance,
                label,
                format!("{} must be a finite number, got {}", name, value),
            );
        }
    }

    if !finite {
        return;
    }
    if branch.resistance == 0.0 && branch.reactance == 0.0 {
        diag.add_branch_warning(
            Category::Impedance,
            label,
            "Zero impedance is treated as zero admittance; the series element is ignored",
        );
    } else if !series_admittance(branch.impedance()).is_finite() {
        diag.add_branch_error(
            Category::Impedance,
            label,
            format!(
                "Impedance {} + {}j is too small; its admittance is not a finite number",
                branch.resistance, branch.reactance
            ),
        );
    }
}
