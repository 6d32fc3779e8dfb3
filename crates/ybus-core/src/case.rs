//! Case files: one Y-bus request per file.
//!
//! A case is the node count plus the branch list, optionally pinning the
//! stamping policy. TOML and JSON are accepted, chosen by file extension:
//!
//! ```toml
//! n_nodes = 3
//! policy = "ground-capable"
//!
//! [[branches]]
//! from = 1
//! to = 2
//! resistance = 0.01
//! reactance = 0.1
//! shunt = 0.02
//!
//! [[branches]]
//! from = 2
//! to = 0
//! reactance = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{YBusError, YBusResult};
use crate::{Branch, StampingPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Number of real nodes (excluding ground)
    pub n_nodes: usize,
    /// Policy pinned by the case; `None` defers to configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<StampingPolicy>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Case {
    pub fn new(n_nodes: usize, branches: Vec<Branch>) -> Self {
        Self {
            n_nodes,
            policy: None,
            branches,
        }
    }

    pub fn with_policy(mut self, policy: StampingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn from_toml_str(s: &str) -> YBusResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> YBusResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a case, picking the parser from the file extension.
    pub fn load(path: impl AsRef<Path>) -> YBusResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(YBusError::Parse(format!(
                "unsupported case file '{}': expected .toml or .json",
                path.display()
            ))),
        }
    }
}
