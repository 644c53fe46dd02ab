use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::appraisal::rating::DEFAULT_DESIGNATION_PLACEHOLDER;

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub rating: RatingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rating = match env::var("APP_DESIGNATION_PLACEHOLDER") {
            Ok(raw) => RatingConfig::from_placeholder(&raw)?,
            Err(_) => RatingConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            rating,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Rating policy dials that are not fixed by the grading table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingConfig {
    /// Stand-in used when a designation is claimed but no designation rating was captured.
    pub designation_placeholder: f64,
}

impl RatingConfig {
    fn from_placeholder(raw: &str) -> Result<Self, ConfigError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidDesignationPlaceholder)?;

        if !value.is_finite() || !(1.0..=5.0).contains(&value) {
            return Err(ConfigError::InvalidDesignationPlaceholder);
        }

        Ok(Self {
            designation_placeholder: value,
        })
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            designation_placeholder: DEFAULT_DESIGNATION_PLACEHOLDER,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDesignationPlaceholder,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDesignationPlaceholder => {
                write!(f, "APP_DESIGNATION_PLACEHOLDER must be a number between 1 and 5")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidDesignationPlaceholder => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
