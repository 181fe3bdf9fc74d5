use crate::matching::{CriteriaConfig, SuggestionPolicy};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub matching: MatchingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig::from_env()?,
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

/// Default criteria and suggestion thresholds for the matching service.
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    pub criteria: CriteriaConfig,
    pub policy: SuggestionPolicy,
}

impl MatchingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = parse_var::<u8>("MATCH_MIN_SCORE")? {
            config.policy.min_score = value;
        }
        if let Some(value) = parse_var::<u8>("MATCH_RELAXED_MIN_SCORE")? {
            config.policy.relaxed_min_score = value;
        }
        if let Some(value) = parse_var::<usize>("MATCH_MAX_SUGGESTIONS")? {
            config.policy.max_suggestions = value;
        }
        if let Some(value) = parse_var::<u32>("MATCH_MAX_CONCURRENT_MENTEES")? {
            config.criteria.workload_penalty.max_concurrent_mentees = value;
        }

        if config.policy.min_score > 100 {
            return Err(ConfigError::InvalidMatching {
                variable: "MATCH_MIN_SCORE",
            });
        }
        if config.policy.relaxed_min_score > 100 {
            return Err(ConfigError::InvalidMatching {
                variable: "MATCH_RELAXED_MIN_SCORE",
            });
        }
        if config.policy.max_suggestions == 0 {
            return Err(ConfigError::InvalidMatching {
                variable: "MATCH_MAX_SUGGESTIONS",
            });
        }
        config
            .criteria
            .normalize()
            .map_err(|_| ConfigError::InvalidMatching {
                variable: "MATCH_MAX_CONCURRENT_MENTEES",
            })?;

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidMatching { variable }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMatching { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMatching { variable } => {
                write!(f, "{variable} is not a valid matching setting")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidMatching { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
