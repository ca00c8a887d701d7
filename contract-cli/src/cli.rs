use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use forecast_contract_core::{
    Config, Execution, Scenario, endpoint_from_config, fixture, run_suite,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-contract", version, about = "Open-Meteo forecast contract suite")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run contract scenarios against the live endpoint.
    Run {
        /// Scenario id to run; repeatable. Runs every scenario if absent.
        #[arg(long = "only", value_parser = parse_scenario)]
        only: Vec<Scenario>,

        /// Day to request (YYYY-MM-DD); defaults to today in UTC.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Run scenarios one after another instead of concurrently.
        #[arg(long)]
        sequential: bool,
    },

    /// List scenario ids and what they check.
    List,

    /// Show the effective configuration.
    Config {
        /// Write the default configuration to the config path.
        #[arg(long)]
        init: bool,
    },
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    Scenario::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }

    /// Execute the command. Returns `false` when a contract run did not pass.
    pub async fn run(self) -> anyhow::Result<bool> {
        let path = self.config_path()?;

        match self.command {
            Command::Run { only, date, json, sequential } => {
                let config = Config::load_from(&path)?;
                let params = match date {
                    Some(day) => fixture::current_day(day, &config.fixture),
                    None => fixture::today(&config.fixture),
                };
                let scenarios = if only.is_empty() { Scenario::all().to_vec() } else { only };
                let execution =
                    if sequential { Execution::Sequential } else { Execution::Parallel };

                let endpoint = endpoint_from_config(&config.endpoint)
                    .context("Failed to create forecast client")?;
                tracing::info!(
                    url = %config.endpoint.base_url,
                    day = %params.start_date,
                    scenarios = scenarios.len(),
                    "running contract suite"
                );

                let report = run_suite(endpoint, &params, &scenarios, execution).await;

                if json {
                    let out = serde_json::to_string_pretty(&report)
                        .context("Failed to serialize report")?;
                    println!("{out}");
                } else {
                    println!("{report}");
                }

                Ok(report.is_success())
            }
            Command::List => {
                for scenario in Scenario::all() {
                    println!("{:<20} {}", scenario.as_str(), scenario.description());
                }
                Ok(true)
            }
            Command::Config { init } => {
                if init {
                    if path.exists() {
                        anyhow::bail!("Config file already exists: {}", path.display());
                    }
                    Config::default().save_to(&path)?;
                    println!("Wrote default configuration to {}", path.display());
                } else {
                    let config = Config::load_from(&path)?;
                    println!("# {}", path.display());
                    print!("{}", config.to_toml()?);
                }
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_parses_repeated_only_and_date() {
        let cli = Cli::try_parse_from([
            "forecast-contract",
            "run",
            "--only",
            "status",
            "--only",
            "precipitation-range",
            "--date",
            "2024-06-01",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Run { only, date, json, sequential } => {
                assert_eq!(only, [Scenario::Status, Scenario::PrecipitationRange]);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1));
                assert!(json);
                assert!(!sequential);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let err = Cli::try_parse_from(["forecast-contract", "run", "--only", "humidity"])
            .unwrap_err();
        assert!(err.to_string().contains("Unknown scenario"));
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["forecast-contract", "list", "--config", "/tmp/fc.toml"]).unwrap();
        assert_eq!(cli.config_path().unwrap(), PathBuf::from("/tmp/fc.toml"));
    }
}
