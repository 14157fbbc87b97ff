use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// RSS feed to build the newsletter from
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Number of leading feed items considered
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            max_items: default_max_items(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Newsletter JSON file, relative paths resolve against the working directory
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_feed_url() -> String {
    "https://www.paymentsdive.com/feeds/news/".to_string()
}

fn default_max_items() -> usize {
    8
}

fn default_timeout() -> u64 {
    30
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data").join("paymentsdive-newsletter.json")
}

impl AppConfig {
    /// Load configuration from an explicit file, or return defaults when none is given
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    crate::Error::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> crate::Result<()> {
        Url::parse(&self.feed.url)?;

        if self.feed.max_items == 0 {
            return Err(crate::Error::Config(
                "feed.max_items must be at least 1".to_string(),
            ));
        }
        if self.feed.timeout_secs == 0 {
            return Err(crate::Error::Config(
                "feed.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn output_path(&self) -> &Path {
        &self.output.path
    }
}
