use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use clap_complete::{generate, generate_to, Shell};

use ybus_cli::build_cli_command;

/// Completion script for `shell` on stdout, into a file, or into an existing
/// directory under the shell's conventional name (`ybus.bash`, `_ybus`, ...).
pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    let bin = cmd.get_name().to_string();

    let Some(path) = out else {
        generate(shell, &mut cmd, bin, &mut io::stdout());
        return Ok(());
    };

    let written = if path.is_dir() {
        generate_to(shell, &mut cmd, bin, path)
            .with_context(|| format!("writing completions into {}", path.display()))?
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file =
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        generate(shell, &mut cmd, bin, &mut file);
        path.to_path_buf()
    };
    println!("Wrote {shell} completion script to {}", written.display());
    Ok(())
}
