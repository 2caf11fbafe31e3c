use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_OTEL_ENDPOINT: &str = "http://localhost:4318/v1/traces";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub otel_enabled: bool,
    pub otel_endpoint: String,
    pub sampling_rate: f64,
    pub service_name: String,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            acquire_timeout_secs: parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 3)?,
        };

        let sampling_rate: f64 = parse_or(&lookup, "OTEL_TRACE_SAMPLING_RATE", 0.01)?;
        let telemetry = TelemetryConfig {
            otel_enabled: lookup("OTEL_ENABLED").map_or(false, |v| v == "true"),
            otel_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OTEL_ENDPOINT.to_string()),
            sampling_rate: sampling_rate.clamp(0.0, 1.0),
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| "fee-calculator".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        };

        Ok(Self {
            host: parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", 3000)?,
            database,
            telemetry,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
