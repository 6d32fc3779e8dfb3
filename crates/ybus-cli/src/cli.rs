use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ybus_core::StampingPolicy;

#[derive(Parser, Debug)]
#[command(name = "ybus", author, version, about = "Nodal admittance matrix (Y-bus) builder", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    /// Config file (defaults to ~/.ybus/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the admittance matrix of a case file and print it
    Build {
        /// Case file (.toml or .json)
        #[arg(value_hint = ValueHint::FilePath)]
        case: PathBuf,
        /// Stamping policy (overrides the case file and config)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Output format (defaults to the config setting)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Write output to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
    /// Check a case file without building the matrix
    Validate {
        /// Case file (.toml or .json)
        #[arg(value_hint = ValueHint::FilePath)]
        case: PathBuf,
        /// Stamping policy (overrides the case file and config)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write to this file, or into this directory under the shell's usual file name
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// Node 0 is ground; shunt at every real terminal
    GroundCapable,
    /// Two real nodes per branch; shunt placed by `location`
    LocationSelectable,
}

impl From<PolicyArg> for StampingPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::GroundCapable => StampingPolicy::GroundCapable,
            PolicyArg::LocationSelectable => StampingPolicy::LocationSelectable,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON document with raw and formatted entries
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn parses_build_flags() {
        let cli = Cli::parse_from([
            "ybus",
            "--log-level",
            "debug",
            "build",
            "case.toml",
            "--policy",
            "location-selectable",
            "--format",
            "json",
        ]);
        assert_eq!(cli.log_level, tracing::Level::DEBUG);
        match cli.command {
            Commands::Build {
                case,
                policy,
                format,
                output,
            } => {
                assert_eq!(case, PathBuf::from("case.toml"));
                assert_eq!(policy, Some(PolicyArg::LocationSelectable));
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn policy_arg_maps_to_core() {
        assert_eq!(
            StampingPolicy::from(PolicyArg::GroundCapable),
            StampingPolicy::GroundCapable
        );
        assert_eq!(
            StampingPolicy::from(PolicyArg::LocationSelectable),
            StampingPolicy::LocationSelectable
        );
    }
}
