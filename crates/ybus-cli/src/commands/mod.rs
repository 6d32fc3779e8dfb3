pub mod build;
pub mod completions;
pub mod config;
pub mod validate;

use ybus_cli::{PolicyArg, YbusConfig};
use ybus_core::{Case, StampingPolicy};

/// Command line first, then the case file, then the config default.
pub fn resolve_policy(flag: Option<PolicyArg>, case: &Case, config: &YbusConfig) -> StampingPolicy {
    flag.map(StampingPolicy::from)
        .or(case.policy)
        .unwrap_or(config.core.policy)
}
