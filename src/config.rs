use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables consulted for the provider credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Missing keys are not an error; the request fails and falls back
    #[serde(default)]
    pub api_key: Option<String>,
    /// `None` leaves the transport default in place
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Starting values of the margin calculator on every new benchmark
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_labor_cost")]
    pub labor_cost: f64,
    #[serde(default = "default_supplies_cost")]
    pub supplies_cost: f64,
    #[serde(default = "default_overhead_percent")]
    pub overhead_percent: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            labor_cost: default_labor_cost(),
            supplies_cost: default_supplies_cost(),
            overhead_percent: default_overhead_percent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_labor_cost() -> f64 {
    20.0
}

fn default_supplies_cost() -> f64 {
    5.0
}

fn default_overhead_percent() -> f64 {
    15.0
}

/// Load configuration from an optional TOML file plus `PRICEPOINT__*` env vars
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PRICEPOINT").separator("__"))
        .build()?;

    let mut cfg: Config = config.try_deserialize()?;
    apply_env_api_key(&mut cfg, |name| std::env::var(name).ok());
    validate_config(&cfg)?;

    Ok(cfg)
}

/// Fill in the provider key from the process environment when the
/// configuration does not carry one
pub fn apply_env_api_key<F>(cfg: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if cfg.provider.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        return;
    }

    cfg.provider.api_key = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty());
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.provider.base_url.trim().is_empty() {
        anyhow::bail!("Provider base_url cannot be empty");
    }

    if cfg.provider.model.trim().is_empty() {
        anyhow::bail!("Provider model cannot be empty");
    }

    if cfg.provider.timeout_seconds == Some(0) {
        anyhow::bail!("Provider timeout_seconds must be greater than 0 when set");
    }

    match cfg.logging.format.as_str() {
        "pretty" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}', expected 'pretty' or 'json'", other),
    }

    Ok(())
}
