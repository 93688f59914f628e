use super::{BrowserMode, ScraperConfig, REMOTE_ENDPOINT_ENV};
use crate::utils::error::ConfigError;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "phone-specs")]
#[command(about = "Look up a phone and print its specification sheet as JSON")]
pub struct CliArgs {
    /// Free-text query, e.g. "Xiaomi Redmi 10 2022"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Browser acquisition strategy
    #[arg(long, value_enum)]
    pub browser: Option<BrowserMode>,

    /// CDP endpoint of a remote browser service
    #[arg(long, env = REMOTE_ENDPOINT_ENV)]
    pub remote_endpoint: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, help = "Pretty-print the JSON result")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

impl CliArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    /// File (or defaults), then environment, then explicit flags.
    pub fn load_config(&self) -> Result<ScraperConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };
        config.apply_env()?;

        if let Some(mode) = self.browser {
            config.browser = mode;
        }
        if let Some(endpoint) = &self.remote_endpoint {
            config.remote_endpoint = Some(endpoint.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }
}
