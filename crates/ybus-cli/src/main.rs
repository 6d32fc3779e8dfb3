use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;
use ybus_cli::{Cli, Commands, ConfigCommands, YbusConfig};

mod commands;

fn run(cli: &Cli) -> Result<()> {
    // `config init` and `completions` must work before any config file exists
    let config = match &cli.command {
        Commands::Config {
            command: ConfigCommands::Init { .. },
        }
        | Commands::Completions { .. } => YbusConfig::default(),
        _ => YbusConfig::resolve(cli.config.as_deref())?,
    };
    debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::Build {
            case,
            policy,
            format,
            output,
        } => commands::build::handle(case, *policy, *format, output.as_deref(), &config),
        Commands::Validate { case, policy } => commands::validate::handle(case, *policy, &config),
        Commands::Config { command } => {
            commands::config::handle(command, cli.config.as_deref(), &config)
        }
        Commands::Completions { shell, out } => commands::completions::handle(*shell, out.as_deref()),
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the table or JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = run(&cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
