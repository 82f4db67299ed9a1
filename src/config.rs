use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub screening: ScreeningSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout; a hung remote call fails the address, not the run
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningSettings {
    #[serde(default = "default_max_parallelism")]
    pub max_parallelism: usize,
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

impl Default for ScreeningSettings {
    fn default() -> Self {
        Self {
            max_parallelism: default_max_parallelism(),
            rate_limit_per_minute: default_rate_limit(),
        }
    }
}

fn default_max_parallelism() -> usize { 10 }
fn default_rate_limit() -> u32 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with CHAINSCREEN_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with CHAINSCREEN_)
            // e.g., CHAINSCREEN_API__ENDPOINT -> api.endpoint
            .add_source(
                Environment::with_prefix("CHAINSCREEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CHAINSCREEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// True when a usable credential was provided
    pub fn has_credential(&self) -> bool {
        !self.api.api_key.trim().is_empty()
    }
}

/// Overlay well-known bare environment variables onto the config
///
/// The credential is usually provided as SCREENING_API_KEY rather than the
/// prefixed form, matching how deployments inject secrets.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("SCREENING_API_KEY")
        .or_else(|_| env::var("CHAINSCREEN_API__API_KEY"))
        .ok();
    let endpoint = env::var("SCREENING_API_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("api.api_key", api_key)?;
    }
    if let Some(endpoint) = endpoint {
        builder = builder.set_override("api.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_screening_settings() {
        let screening = ScreeningSettings::default();
        assert_eq!(screening.max_parallelism, 10);
        assert_eq!(screening.rate_limit_per_minute, 300);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "pretty");
    }

    #[test]
    fn test_credential_check_rejects_blank() {
        let settings = Settings {
            api: ApiSettings {
                endpoint: "https://api.test/v2".to_string(),
                api_key: "   ".to_string(),
                timeout_secs: None,
            },
            screening: ScreeningSettings::default(),
            logging: LoggingSettings::default(),
        };
        assert!(!settings.has_credential());
    }
}
