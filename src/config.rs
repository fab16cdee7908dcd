//! Env-driven configuration for the service and CLI.
//!
//! Values are read from the process environment once at startup; `dotenv` is
//! loaded on demand by the binaries. The resulting [`Config`] is injected into
//! the handlers through `AppState`, nothing in request handling touches the
//! environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";
pub const DEFAULT_MODEL: &str = "cuuupid/idm-vton";

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` when unset or blank.
    pub replicate_api_token: Option<String>,
    pub replicate_api_base: String,
    pub replicate_model: String,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub stock_fetch_timeout: Duration,
    pub stock_catalog_path: Option<PathBuf>,
    pub staging_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub api_host: String,
    pub api_port: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            replicate_api_token: None,
            replicate_api_base: DEFAULT_API_BASE.to_string(),
            replicate_model: DEFAULT_MODEL.to_string(),
            poll_interval: Duration::from_millis(1000),
            poll_timeout: Duration::from_secs(300),
            stock_fetch_timeout: Duration::from_secs(30),
            stock_catalog_path: None,
            staging_dir: env::temp_dir(),
            max_upload_bytes: 10 * 1024 * 1024,
            api_host: "0.0.0.0".to_string(),
            api_port: "8000".to_string(),
        }
    }
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `new` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Config {
            replicate_api_token: non_empty("REPLICATE_API_TOKEN"),
            replicate_api_base: non_empty("REPLICATE_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.replicate_api_base),
            replicate_model: non_empty("REPLICATE_MODEL").unwrap_or(defaults.replicate_model),
            poll_interval: parse_or(
                "REPLICATE_POLL_INTERVAL_MS",
                non_empty("REPLICATE_POLL_INTERVAL_MS"),
                defaults.poll_interval,
                Duration::from_millis,
            ),
            poll_timeout: parse_or(
                "REPLICATE_POLL_TIMEOUT_SECS",
                non_empty("REPLICATE_POLL_TIMEOUT_SECS"),
                defaults.poll_timeout,
                Duration::from_secs,
            ),
            stock_fetch_timeout: parse_or(
                "STOCK_FETCH_TIMEOUT_SECS",
                non_empty("STOCK_FETCH_TIMEOUT_SECS"),
                defaults.stock_fetch_timeout,
                Duration::from_secs,
            ),
            stock_catalog_path: non_empty("STOCK_CATALOG_PATH").map(PathBuf::from),
            staging_dir: non_empty("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.staging_dir),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                non_empty("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes as u64,
                |v| v,
            ) as usize,
            api_host: non_empty("API_HOST").unwrap_or(defaults.api_host),
            api_port: non_empty("PORT").unwrap_or(defaults.api_port),
        }
    }

    pub fn has_token(&self) -> bool {
        self.replicate_api_token.is_some()
    }

    pub fn print_env_vars(&self) {
        let token = if self.has_token() { "<set>" } else { "<unset>" };
        tracing::info!("REPLICATE_API_TOKEN: {}", token);
        tracing::info!("REPLICATE_API_BASE: {}", self.replicate_api_base);
        tracing::info!("REPLICATE_MODEL: {}", self.replicate_model);
        tracing::info!(
            "STOCK_CATALOG_PATH: {}",
            self.stock_catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<built-in>".to_string())
        );
        tracing::info!("STAGING_DIR: {}", self.staging_dir.display());
        tracing::info!("API_HOST: {}  PORT: {}", self.api_host, self.api_port);
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T, wrap: impl Fn(u64) -> T) -> T {
    match raw {
        None => default,
        Some(s) => match s.parse::<u64>() {
            Ok(n) => wrap(n),
            Err(_) => {
                tracing::warn!("Invalid {} '{}', falling back to default", key, s);
                default
            }
        },
    }
}
