use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Fallback search service root when nothing is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Bounds the search service accepts for `top_k`.
pub const TOP_K_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub top_k: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api: ApiConfig {
                base_url: env::var("OPENWORDS_API_BASE")
                    .or_else(|_| env::var("NEXT_PUBLIC_API_BASE"))
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                top_k: optional_var("OPENWORDS_TOP_K")?,
                timeout_secs: optional_var("OPENWORDS_TIMEOUT_SECS")?,
            },
            logging: LoggingConfig {
                dir: env::var("OPENWORDS_LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_log_dir()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, api_base: Option<String>, top_k: Option<u32>) -> Result<Self> {
        if let Some(base) = api_base {
            self.api.base_url = base;
        }
        if top_k.is_some() {
            self.api.top_k = top_k;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("API base URL must not be empty");
        }
        if let Some(k) = self.api.top_k {
            if !TOP_K_RANGE.contains(&k) {
                anyhow::bail!(
                    "top_k must be between {} and {}, got {}",
                    TOP_K_RANGE.start(),
                    TOP_K_RANGE.end(),
                    k
                );
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE.to_string(),
                top_k: None,
                timeout_secs: None,
            },
            logging: LoggingConfig {
                dir: default_log_dir(),
            },
        }
    }
}

fn optional_var<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(Some(v.trim().parse()?)),
        _ => Ok(None),
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join("openwords")
        .join("logs")
}
