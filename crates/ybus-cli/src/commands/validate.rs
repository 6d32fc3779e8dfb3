//! `ybus validate`: run the structural gate and report every issue.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ybus_algo::validate;
use ybus_cli::{PolicyArg, YbusConfig};
use ybus_core::Case;

use super::resolve_policy;

pub fn handle(case_path: &Path, policy: Option<PolicyArg>, config: &YbusConfig) -> Result<()> {
    let case = Case::load(case_path)
        .with_context(|| format!("loading case {}", case_path.display()))?;
    let policy = resolve_policy(policy, &case, config);

    let diagnostics = validate(case.n_nodes, &case.branches, policy);
    if diagnostics.has_errors() {
        eprint!("{}", diagnostics);
        bail!(
            "{} rejected: {}",
            case_path.display(),
            diagnostics.summary()
        );
    }

    for issue in diagnostics.warnings() {
        println!("  {}", issue);
    }
    println!(
        "{} is valid under the {} policy ({})",
        case_path.display(),
        policy,
        diagnostics.summary()
    );
    Ok(())
}
