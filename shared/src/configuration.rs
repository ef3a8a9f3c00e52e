use figment::error::Kind;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use tracing::level_filters::LevelFilter;

/// Raised when the environment a function was deployed with cannot be turned
/// into its configuration. This is always fatal for the function.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("required environment variable {variable} is not set")]
    Missing { variable: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigurationError {
    fn from(err: figment::Error) -> Self {
        match &err.kind {
            Kind::MissingField(field) => ConfigurationError::Missing {
                variable: field.to_uppercase(),
            },
            _ => ConfigurationError::Invalid(err.to_string()),
        }
    }
}

/// Reads `name` exactly as the platform set it. Figment's `Env` provider
/// parses and trims values, which is wrong for opaque strings.
pub fn env_var(name: &str) -> Result<Option<String>, ConfigurationError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigurationError::Invalid(format!(
            "environment variable {name} is not valid unicode"
        ))),
    }
}

pub fn required_env_var(name: &str) -> Result<String, ConfigurationError> {
    env_var(name)?.ok_or_else(|| ConfigurationError::Missing {
        variable: name.to_string(),
    })
}

// Values accepted by the Lambda advanced logging controls
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[serde(alias = "trace")]
    Trace,
    #[serde(alias = "debug")]
    Debug,
    #[default]
    #[serde(alias = "info")]
    Info,
    #[serde(alias = "warn")]
    Warn,
    #[serde(alias = "error", alias = "FATAL", alias = "fatal")]
    Error,
}

impl LogLevel {
    pub fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    #[default]
    #[serde(rename = "Text", alias = "TEXT", alias = "text")]
    Text,
    #[serde(rename = "JSON", alias = "Json", alias = "json")]
    Json,
}

/// Log threshold and output format, read once at startup.
///
/// The threshold defaults to INFO, so debug records are only written when
/// `AWS_LAMBDA_LOG_LEVEL` lowers it.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(rename = "aws_lambda_log_level")]
    pub level: LogLevel,
    #[serde(rename = "aws_lambda_log_format")]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn load() -> Result<Self, ConfigurationError> {
        let config = Figment::from(Serialized::defaults(LoggingConfig::default()))
            .merge(Env::raw().only(&["AWS_LAMBDA_LOG_LEVEL", "AWS_LAMBDA_LOG_FORMAT"]))
            .extract()?;

        Ok(config)
    }
}
