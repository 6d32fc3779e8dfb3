//! # ybus-core: Branch Data Model for Admittance Matrix Assembly
//!
//! Provides the data structures shared by the Y-bus builder and its front ends.
//!
//! ## Design Philosophy
//!
//! A network is described the way an engineer would type it into a form: a node
//! count plus an ordered list of branches. Each branch joins two real nodes, or
//! one real node to the reference (ground) node, and carries:
//! - a series impedance `R + jX`
//! - a shunt susceptance `B` (the imaginary part of the Y/2 line charging term)
//! - where that shunt is attached, for deployments that let the user choose
//!
//! There is no graph container here. The builder in `ybus-algo` consumes a
//! `&[Branch]` slice directly and produces a fresh matrix per request.
//!
//! ## Quick Start
//!
//! ```
//! use ybus_core::{Branch, NodeId, ShuntLocation};
//!
//! // Line between node 1 and node 2 with line charging at both ends
//! let line = Branch::new(NodeId::new(1), NodeId::new(2), 0.01, 0.1)
//!     .with_shunt(0.02, ShuntLocation::Both);
//!
//! // Reactor from node 2 to ground
//! let reactor = Branch::new(NodeId::new(2), NodeId::GROUND, 0.0, 0.5);
//!
//! assert!(!line.is_grounded());
//! assert!(reactor.is_grounded());
//! ```
//!
//! ## Node Numbering
//!
//! Node numbers are 1-based, as the user sees them. `NodeId(0)` is the
//! reference node and never gets a row or column in the matrix. Use
//! [`NodeId::index`] to get the 0-based matrix index.
//!
//! ## Modules
//!
//! - [`case`] - Request records loaded from TOML/JSON case files
//! - [`diagnostics`] - Issue collection used by the validation gate
//! - [`error`] - The unified [`YBusError`] type

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod case;
pub mod diagnostics;
pub mod error;

pub use case::Case;
pub use diagnostics::{Category, DiagnosticIssue, Diagnostics, Severity};
pub use error::{YBusError, YBusResult};

/// Prefix used for row/column labels (`"Node 1"`, `"Node 2"`, ...).
pub const NODE_LABEL_PREFIX: &str = "Node";

/// 1-based node number. `0` is the reference (ground) node.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// The reference node. It has no row or column in the admittance matrix.
    pub const GROUND: NodeId = NodeId(0);

    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// 0-based matrix index, or `None` for the reference node.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    /// Whether this node has a row in an `n_nodes`-sized matrix.
    #[inline]
    pub fn in_range(&self, n_nodes: usize) -> bool {
        (1..=n_nodes).contains(&self.0)
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "ground")
        } else {
            write!(f, "{} {}", NODE_LABEL_PREFIX, self.0)
        }
    }
}

/// Row/column label for a 0-based matrix index.
pub fn node_label(index: usize) -> String {
    format!("{} {}", NODE_LABEL_PREFIX, index + 1)
}

/// Which terminal(s) of a branch receive its shunt susceptance.
///
/// Only consulted under [`StampingPolicy::LocationSelectable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuntLocation {
    /// From-node only
    Start,
    /// To-node only
    End,
    /// Both terminals (π-model)
    #[default]
    Both,
    /// No shunt contribution
    None,
}

impl ShuntLocation {
    pub fn at_start(self) -> bool {
        matches!(self, ShuntLocation::Start | ShuntLocation::Both)
    }

    pub fn at_end(self) -> bool {
        matches!(self, ShuntLocation::End | ShuntLocation::Both)
    }
}

impl fmt::Display for ShuntLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShuntLocation::Start => "start",
            ShuntLocation::End => "end",
            ShuntLocation::Both => "both",
            ShuntLocation::None => "none",
        };
        f.write_str(s)
    }
}

/// How reference-node connections and shunt terms are stamped.
///
/// The two policies are mutually exclusive for a given deployment; they share
/// the series-admittance stamping and differ only at the terminals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StampingPolicy {
    /// `to_node == 0` means ground. Shunt goes to every real terminal.
    #[default]
    GroundCapable,
    /// Both ends are real nodes. Shunt placement follows [`ShuntLocation`].
    LocationSelectable,
}

impl StampingPolicy {
    /// Whether a branch may terminate on the reference node.
    pub fn allows_ground(self) -> bool {
        matches!(self, StampingPolicy::GroundCapable)
    }
}

impl fmt::Display for StampingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampingPolicy::GroundCapable => f.write_str("ground-capable"),
            StampingPolicy::LocationSelectable => f.write_str("location-selectable"),
        }
    }
}

/// One transmission element.
///
/// Field names double as case-file keys; the short forms `from`, `to` and
/// `shunt` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Optional label used in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "from")]
    pub from_node: NodeId,
    #[serde(alias = "to")]
    pub to_node: NodeId,
    /// Series resistance (ohms)
    #[serde(default)]
    pub resistance: f64,
    /// Series reactance (ohms)
    #[serde(default)]
    pub reactance: f64,
    /// Imaginary part of the shunt admittance Y/2
    #[serde(default, alias = "shunt")]
    pub shunt_susceptance: f64,
    #[serde(default, alias = "location")]
    pub shunt_location: ShuntLocation,
}

impl Branch {
    pub fn new(from_node: NodeId, to_node: NodeId, resistance: f64, reactance: f64) -> Self {
        Self {
            from_node,
            to_node,
            resistance,
            reactance,
            ..Branch::default()
        }
    }

    pub fn with_shunt(mut self, susceptance: f64, location: ShuntLocation) -> Self {
        self.shunt_susceptance = susceptance;
        self.shunt_location = location;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Series impedance `R + jX`.
    pub fn impedance(&self) -> Complex64 {
        Complex64::new(self.resistance, self.reactance)
    }

    /// True when the far end is the reference node.
    pub fn is_grounded(&self) -> bool {
        self.to_node.is_ground()
    }

    /// Display label: the branch name, or `Branch <k>` from its 0-based position.
    pub fn label(&self, position: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Branch {}", position + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_index_is_zero_based() {
        assert_eq!(NodeId::new(1).index(), Some(0));
        assert_eq!(NodeId::new(4).index(), Some(3));
        assert_eq!(NodeId::GROUND.index(), None);
    }

    #[test]
    fn node_range_excludes_ground() {
        assert!(NodeId::new(3).in_range(3));
        assert!(!NodeId::new(4).in_range(3));
        assert!(!NodeId::GROUND.in_range(3));
    }

    #[test]
    fn labels() {
        assert_eq!(NodeId::new(2).to_string(), "Node 2");
        assert_eq!(NodeId::GROUND.to_string(), "ground");
        assert_eq!(node_label(0), "Node 1");

        let unnamed = Branch::new(NodeId::new(1), NodeId::new(2), 0.0, 0.1);
        assert_eq!(unnamed.label(2), "Branch 3");
        assert_eq!(unnamed.with_name("Line A").label(2), "Line A");
    }

    #[test]
    fn shunt_location_terminals() {
        assert!(ShuntLocation::Start.at_start() && !ShuntLocation::Start.at_end());
        assert!(!ShuntLocation::End.at_start() && ShuntLocation::End.at_end());
        assert!(ShuntLocation::Both.at_start() && ShuntLocation::Both.at_end());
        assert!(!ShuntLocation::None.at_start() && !ShuntLocation::None.at_end());
    }

    #[test]
    fn branch_deserializes_short_keys() {
        let json = r#"{"from": 1, "to": 0, "reactance": 0.1, "shunt": 0.02, "location": "end"}"#;
        let branch: Branch = serde_json::from_str(json).unwrap();
        assert_eq!(branch.from_node, NodeId::new(1));
        assert!(branch.is_grounded());
        assert_eq!(branch.resistance, 0.0);
        assert_eq!(branch.shunt_susceptance, 0.02);
        assert_eq!(branch.shunt_location, ShuntLocation::End);
    }

    #[test]
    fn policy_serde_names() {
        let p: StampingPolicy = serde_json::from_str("\"location-selectable\"").unwrap();
        assert_eq!(p, StampingPolicy::LocationSelectable);
        assert_eq!(StampingPolicy::default().to_string(), "ground-capable");
        assert!(StampingPolicy::GroundCapable.allows_ground());
        assert!(!StampingPolicy::LocationSelectable.allows_ground());
    }
}
