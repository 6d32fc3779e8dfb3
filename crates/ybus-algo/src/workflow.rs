//! Y-bus analysis facade
//!
//! Chains the validation gate and the builder behind a builder-style API.
//! The gate always runs first; a request with errors never reaches the builder.

use tracing::{info, warn};
use ybus_core::{Branch, Case, Diagnostics, StampingPolicy, YBusResult};

use crate::format::AdmittanceTable;
use crate::validation::ensure_valid;
use crate::ybus::{YBus, YBusBuilder};

/// Result of a successful analysis
#[derive(Debug, Clone)]
pub struct YBusReport {
    pub ybus: YBus,
    pub policy: StampingPolicy,
    /// Warnings raised by the gate (never errors)
    pub diagnostics: Diagnostics,
}

impl YBusReport {
    pub fn table(&self) -> AdmittanceTable {
        AdmittanceTable::from_ybus(&self.ybus)
    }
}

/// Fluent builder for one Y-bus computation
pub struct YBusAnalysis<'a> {
    n_nodes: usize,
    branches: &'a [Branch],
    policy: StampingPolicy,
}

impl<'a> YBusAnalysis<'a> {
    pub fn new(n_nodes: usize, branches: &'a [Branch]) -> Self {
        Self {
            n_nodes,
            branches,
            policy: StampingPolicy::default(),
        }
    }

    /// Analysis of a case file, using the case's own policy when it pins one.
    pub fn from_case(case: &'a Case) -> Self {
        let analysis = Self::new(case.n_nodes, &case.branches);
        match case.policy {
            Some(policy) => analysis.with_policy(policy),
            None => analysis,
        }
    }

    pub fn with_policy(mut self, policy: StampingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run only the validation gate.
    pub fn validate(&self) -> YBusResult<Diagnostics> {
        let diagnostics = ensure_valid(self.n_nodes, self.branches, self.policy)?;
        for issue in diagnostics.warnings() {
            warn!("{}", issue);
        }
        Ok(diagnostics)
    }

    /// Validate, then assemble the matrix.
    pub fn run(self) -> YBusResult<YBusReport> {
        let diagnostics = self.validate()?;
        let ybus = YBusBuilder::new(self.policy).build(self.n_nodes, self.branches)?;
        info!(
            n_nodes = self.n_nodes,
            branches = self.branches.len(),
            policy = %self.policy,
            "Y-bus computed"
        );
        Ok(YBusReport {
            ybus,
            policy: self.policy,
            diagnostics,
        })
    }
}
