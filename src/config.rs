use crate::cli::CommonArgs;
use crate::error::{Result, ScoreError};
use crate::github::{HttpJsonFetcher, PublicEventsCollector};
use reqwest::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const USER_AGENT: &str = concat!("commitscore/", env!("CARGO_PKG_VERSION"));

/// Settings resolved from the global command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub user_agent: String,
    pub show_progress: bool,
}

impl Config {
    pub fn new(api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| ScoreError::InvalidUrl(format!("{api_base}: {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(ScoreError::InvalidUrl(api_base.to_string()));
        }

        Ok(Self {
            api_base,
            user_agent: USER_AGENT.to_string(),
            show_progress: true,
        })
    }

    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        let mut config = Self::new(&common.api_base)?;
        config.show_progress = !common.no_progress;
        Ok(config)
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn collector(&self) -> Result<PublicEventsCollector> {
        let fetcher = HttpJsonFetcher::new(&self.user_agent)?;
        Ok(PublicEventsCollector::new(fetcher, self.api_base.clone()).with_progress(self.show_progress))
    }
}
