//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Default countdown length (five minutes).
pub const DEFAULT_DURATION_SECONDS: u32 = 300;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Countdown length for sessions that do not ask for one.
    pub default_duration_seconds: u32,
    /// Countdown tick interval.
    pub tick_interval: Duration,
    /// Simulated upload processing delay.
    pub upload_delay: Duration,
    /// Simulated invitation delivery delay.
    pub invite_delay: Duration,
    /// Optional YAML question bank; the built-in bank is used otherwise.
    pub question_bank_path: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 3000_u16)?;
        let default_duration_seconds =
            parse_or(&lookup, "QUIZ_DURATION_SECS", DEFAULT_DURATION_SECONDS)?;
        if default_duration_seconds == 0 {
            return Err(AppError::Config(
                "QUIZ_DURATION_SECS must be at least 1".to_string(),
            ));
        }
        let tick_interval_ms = parse_or(&lookup, "TICK_INTERVAL_MS", 1000_u64)?;
        if tick_interval_ms == 0 {
            return Err(AppError::Config(
                "TICK_INTERVAL_MS must be at least 1".to_string(),
            ));
        }
        let upload_delay_ms = parse_or(&lookup, "UPLOAD_DELAY_MS", 2000_u64)?;
        let invite_delay_ms = parse_or(&lookup, "INVITE_DELAY_MS", 1000_u64)?;
        let question_bank_path = lookup("QUIZ_BANK_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            default_duration_seconds,
            tick_interval: Duration::from_millis(tick_interval_ms),
            upload_delay: Duration::from_millis(upload_delay_ms),
            invite_delay: Duration::from_millis(invite_delay_ms),
            question_bank_path,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form a socket
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}
