mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cachegate::config::ObservabilityConfig;
use cachegate::config_discovery::load_config_with_discovery;
use cachegate::logging;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            let config = load_config_with_discovery(args.config.as_deref())?.unwrap_or_default();
            logging::init(&config.observability);
            commands::check::run(&args, &config)
        }
        Commands::Config(args) => {
            logging::init(&ObservabilityConfig::default());
            commands::config::run(args.command)
        }
    }
}
