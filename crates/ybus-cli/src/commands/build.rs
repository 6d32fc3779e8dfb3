//! `ybus build`: validate a case, assemble its Y-bus and print it.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use ybus_algo::YBusAnalysis;
use ybus_cli::{output, OutputFormat, PolicyArg, YbusConfig};
use ybus_core::{Case, YBusError};

use super::resolve_policy;

pub fn handle(
    case_path: &Path,
    policy: Option<PolicyArg>,
    format: Option<OutputFormat>,
    out: Option<&Path>,
    config: &YbusConfig,
) -> Result<()> {
    let case = Case::load(case_path)
        .with_context(|| format!("loading case {}", case_path.display()))?;
    let policy = resolve_policy(policy, &case, config);
    info!(
        "Building Y-bus for {} ({} nodes, {} branches, {} policy)",
        case_path.display(),
        case.n_nodes,
        case.branches.len(),
        policy
    );

    let report = match YBusAnalysis::new(case.n_nodes, &case.branches)
        .with_policy(policy)
        .run()
    {
        Ok(report) => report,
        Err(YBusError::Validation(diagnostics)) => {
            eprint!("{}", diagnostics);
            bail!(
                "{} rejected: {}",
                case_path.display(),
                diagnostics.summary()
            );
        }
        Err(err) => return Err(err.into()),
    };

    let format = format.unwrap_or(config.output.format);
    let rendered = output::render(&report, format, config.output.pretty_json)?;
    match out {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote Y-bus to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
