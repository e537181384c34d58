use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::registry::Flavor;
use crate::scoring::ScoringConfig;

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
    pub game: GameConfig,
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

        let default_flavor = match env::var("ARCHPATH_DEFAULT_FLAVOR") {
            Ok(raw) => Flavor::parse(&raw).ok_or(ConfigError::InvalidFlavor(raw))?,
            Err(_) => Flavor::default(),
        };

        let lean_bonus = match env::var("ARCHPATH_LEAN_BONUS") {
            Ok(raw) => match raw.trim().parse::<i32>() {
                Ok(0) => None,
                Ok(points) if points > 0 => Some(points),
                _ => return Err(ConfigError::InvalidLeanBonus(raw)),
            },
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            game: GameConfig {
                default_flavor,
                lean_bonus,
            },
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Presentation defaults and optional scoring modifiers.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Flavor used for display names when a caller does not ask for one.
    pub default_flavor: Flavor,
    /// Points for the lean-architecture bonus; `None` keeps it off.
    pub lean_bonus: Option<i32>,
}

impl GameConfig {
    pub fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            lean_bonus: self.lean_bonus,
            ..ScoringConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlavor(String),
    InvalidLeanBonus(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlavor(value) => write!(
                f,
                "ARCHPATH_DEFAULT_FLAVOR '{value}' must be one of generic, aws, gcp, opensource"
            ),
            ConfigError::InvalidLeanBonus(value) => write!(
                f,
                "ARCHPATH_LEAN_BONUS '{value}' must be a non-negative integer"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlavor(_)
            | ConfigError::InvalidLeanBonus(_) => None,
        }
    }
}
