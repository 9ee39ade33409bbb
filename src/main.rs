//! Hierarch CLI entry point.

use clap::Parser;

use hierarch::cli::commands::config::ConfigCommands;
use hierarch::cli::{self, Cli, Commands};
use hierarch::infrastructure::logging::{LogConfig, LoggerImpl};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let validating = matches!(
        &cli.command,
        Commands::Config(args) if matches!(args.command, ConfigCommands::Validate)
    );

    let loaded = if validating {
        cli::load_config_unchecked(cli.config.as_deref())
    } else {
        cli::load_config(cli.config.as_deref())
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, json),
    };

    // An unvalidated logging section falls back to the defaults
    let log_config = match LogConfig::try_from(&config.logging) {
        Ok(log_config) => Ok(log_config),
        Err(_) if validating => Ok(LogConfig::default()),
        Err(err) => Err(anyhow::Error::from(err)),
    };

    // Held for the life of the process so file logs are flushed on exit
    let _logger = match log_config.and_then(|log_config| LoggerImpl::init(&log_config)) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(err, json),
    };

    let result = match cli.command {
        Commands::Run(args) => cli::commands::run::execute(args, config, json),
        Commands::Config(args) => cli::commands::config::execute(args, config, json),
    };

    if let Err(err) = result {
        cli::handle_error(err, json);
    }
}
