//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::config::ConfigArgs;
use super::commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "hierarch")]
#[command(about = "Hierarch - two-timescale convergence coordinator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (replaces .hierarch/config.yaml and .hierarch/local.yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the coordinator on a problem
    Run(RunArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}
