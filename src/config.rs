use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::acb_scraper::{FetchSettings, ACB_BASE_URL};
use crate::error::{AcbError, Result};

/// Command line of the scraper binary. Flags override the config file.
#[derive(Debug, Parser)]
#[command(name = "acb-box-scraper")]
#[command(about = "Scrapes ACB box scores for a range of game IDs into CSV", long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,

    /// First game ID to scrape
    #[arg(long)]
    pub start_id: Option<u32>,

    /// Last game ID to scrape, inclusive
    #[arg(long)]
    pub end_id: Option<u32>,

    /// Maximum number of games fetched at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Console log filter, e.g. `info` or `acb_box_scraper=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Run configuration, read from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub start_id: Option<u32>,
    pub end_id: Option<u32>,
    pub base_url: String,
    /// Player statistics CSV.
    pub output_file: PathBuf,
    /// Game info CSV.
    pub output_file_game: PathBuf,
    pub user_agent: String,
    /// Seconds to wait after each successful fetch.
    pub rate_limit: f64,
    pub retry_attempts: u32,
    /// Seconds between two attempts of the same page.
    pub retry_delay: f64,
    /// Games in flight at once; unset means the whole range.
    pub concurrency: Option<usize>,
    /// Request timeout in seconds.
    pub timeout: f64,
}

impl Default for Config {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            start_id: None,
            end_id: None,
            base_url: ACB_BASE_URL.to_string(),
            output_file: PathBuf::from("estadisticas_todos_partidos.csv"),
            output_file_game: PathBuf::from("estadisticas_info_partidos.csv"),
            user_agent: fetch.user_agent,
            rate_limit: fetch.rate_limit.as_secs_f64(),
            retry_attempts: fetch.max_attempts,
            retry_delay: fetch.retry_delay.as_secs_f64(),
            concurrency: None,
            timeout: 30.0,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AcbError::Config(format!("could not read {}: {e}", path.display()))
        })?;
        Self::from_json(&json).map_err(|e| {
            AcbError::Config(format!("could not load {}: {e}", path.display()))
        })
    }

    /// Apply command line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if cli.start_id.is_some() {
            self.start_id = cli.start_id;
        }
        if cli.end_id.is_some() {
            self.end_id = cli.end_id;
        }
        if cli.concurrency.is_some() {
            self.concurrency = cli.concurrency;
        }
        self
    }

    /// Check the configuration and return the game ID range.
    pub fn validate(&self) -> Result<(u32, u32)> {
        let (start_id, end_id) = match (self.start_id, self.end_id) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AcbError::Config(
                    "start_id and end_id are required".to_string(),
                ))
            }
        };
        if start_id == 0 {
            return Err(AcbError::Config("start_id must be positive".to_string()));
        }
        if start_id > end_id {
            return Err(AcbError::Config(format!(
                "start_id {start_id} is greater than end_id {end_id}"
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(AcbError::Config("base_url is empty".to_string()));
        }
        if self.retry_attempts == 0 {
            return Err(AcbError::Config(
                "retry_attempts must be at least 1".to_string(),
            ));
        }
        if self.concurrency == Some(0) {
            return Err(AcbError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        for (name, seconds) in [
            ("rate_limit", self.rate_limit),
            ("retry_delay", self.retry_delay),
            ("timeout", self.timeout),
        ] {
            if Duration::try_from_secs_f64(seconds).is_err() {
                return Err(AcbError::Config(format!(
                    "{name} must be a non-negative number of seconds that fits a duration"
                )));
            }
        }
        Ok((start_id, end_id))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.user_agent.clone(),
            max_attempts: self.retry_attempts,
            retry_delay: Duration::from_secs_f64(self.retry_delay),
            rate_limit: Duration::from_secs_f64(self.rate_limit),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }
}
