use chrono::NaiveDate;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// How analysis results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Top-level configuration for the screener.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub screening: ScreeningConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("CLEANSLATE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let as_of = match env::var("CLEANSLATE_AS_OF") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidAsOfDate { value: raw })?,
            ),
            _ => None,
        };

        let output = match env::var("CLEANSLATE_OUTPUT") {
            Ok(raw) => {
                OutputFormat::parse(&raw).ok_or(ConfigError::InvalidOutputFormat { value: raw })?
            }
            Err(_) => OutputFormat::default(),
        };

        let log_level = env::var("CLEANSLATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            screening: ScreeningConfig { as_of, output },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Defaults for screening runs. Command-line flags take precedence.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    /// Evaluation date; today when unset.
    pub as_of: Option<NaiveDate>,
    pub output: OutputFormat,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAsOfDate { value: String },
    InvalidOutputFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAsOfDate { value } => {
                write!(f, "CLEANSLATE_AS_OF must be a YYYY-MM-DD date, got '{value}'")
            }
            ConfigError::InvalidOutputFormat { value } => {
                write!(f, "CLEANSLATE_OUTPUT must be 'text' or 'json', got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
