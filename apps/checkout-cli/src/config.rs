//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags are applied on top by `main`.

use tracing_subscriber::EnvFilter;

/// Default tracing filter when neither `CHECKOUT_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default upper bound on the request size (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 1024 * 1024;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// tracing filter directive (`CHECKOUT_LOG`, then `RUST_LOG`)
    pub log_filter: String,

    /// Pretty-print the JSON output (`CHECKOUT_PRETTY`)
    pub pretty: bool,

    /// Reject requests larger than this (`CHECKOUT_MAX_INPUT_BYTES`)
    pub max_input_bytes: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup("CHECKOUT_LOG")
            .map(|directive| ("CHECKOUT_LOG", directive))
            .or_else(|| lookup("RUST_LOG").map(|directive| ("RUST_LOG", directive)));

        // init_tracing trusts this directive.
        let log_filter = match log_filter {
            Some((var, directive)) => {
                EnvFilter::try_new(&directive)
                    .map_err(|_| ConfigError::InvalidValue(var.to_string()))?;
                directive
            }
            None => DEFAULT_LOG_FILTER.to_string(),
        };

        let config = CliConfig {
            log_filter,

            pretty: match lookup("CHECKOUT_PRETTY") {
                Some(value) => parse_flag(&value)
                    .ok_or_else(|| ConfigError::InvalidValue("CHECKOUT_PRETTY".to_string()))?,
                None => false,
            },

            max_input_bytes: lookup("CHECKOUT_MAX_INPUT_BYTES")
                .unwrap_or_else(|| DEFAULT_MAX_INPUT_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_MAX_INPUT_BYTES".to_string()))?,
        };

        if config.max_input_bytes == 0 {
            return Err(ConfigError::InvalidValue(
                "CHECKOUT_MAX_INPUT_BYTES".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
