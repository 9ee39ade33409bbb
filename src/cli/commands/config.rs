//! Implementation of the `hierarch config` commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::output::{key_value_table, output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Validate the effective configuration
    Validate,
}

#[derive(Debug, serde::Serialize)]
pub struct ConfigShowOutput {
    pub config: Config,
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ConfigValidateOutput {
    pub valid: bool,
    pub message: String,
    pub strategy: String,
    pub max_global_iterations: u32,
    pub parameters_used: u64,
}

impl CommandOutput for ConfigValidateOutput {
    fn to_human(&self) -> String {
        let rows = [
            ("strategy".to_string(), self.strategy.clone()),
            (
                "max global iterations".to_string(),
                self.max_global_iterations.to_string(),
            ),
            ("parameters".to_string(), self.parameters_used.to_string()),
        ];
        format!(
            "{}\n{}",
            self.message,
            key_value_table(["Setting", "Value"], &rows)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Validate `config` and summarize it. A failed check is reported in the
/// output rather than returned as an error.
pub fn validate(config: &Config) -> ConfigValidateOutput {
    let (valid, message) = match ConfigLoader::validate(config) {
        Ok(()) => (true, "Configuration is valid.".to_string()),
        Err(err) => (false, format!("Configuration is invalid: {err}")),
    };
    ConfigValidateOutput {
        valid,
        message,
        strategy: config.strategy.kind.to_string(),
        max_global_iterations: config.coordinator.max_global_iterations,
        parameters_used: config.parameters_used(),
    }
}

pub fn execute(args: ConfigArgs, config: Config, json_mode: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => output(&ConfigShowOutput { config }, json_mode),
        ConfigCommands::Validate => {
            let report = validate(&config);
            output(&report, json_mode);
            // The report already carries the error
            if !report.valid {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_renders_yaml_sections() {
        let shown = ConfigShowOutput {
            config: Config::default(),
        };
        let human = shown.to_human();
        assert!(human.contains("planner:"));
        assert!(human.contains("architecture_label: hierarchical-27m"));
        assert_eq!(shown.to_json()["executor"]["stability_window"], 5);
    }

    #[test]
    fn test_validate_reports_summary() {
        let report = validate(&Config::default());
        assert!(report.valid);
        assert_eq!(report.strategy, "seeded");
        assert_eq!(report.parameters_used, 768_000);
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = Config::default();
        config.executor.convergence_threshold = 2.0;
        let report = validate(&config);
        assert!(!report.valid);
        assert!(report.message.contains("threshold"));
        assert_eq!(report.parameters_used, config.parameters_used());
        assert!(report.to_human().starts_with("Configuration is invalid"));
    }
}
