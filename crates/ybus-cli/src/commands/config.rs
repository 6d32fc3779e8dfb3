//! `ybus config`: show or initialise the configuration file.

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use ybus_cli::{ConfigCommands, YbusConfig};

pub fn handle(command: &ConfigCommands, explicit: Option<&Path>, config: &YbusConfig) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = match explicit {
                Some(path) => path.to_path_buf(),
                None => YbusConfig::config_path()
                    .ok_or_else(|| anyhow!("could not determine config directory"))?,
            };
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            YbusConfig::default().save_to(&path)?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}
