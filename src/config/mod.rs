//! Configuration module for the dashboard backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// An API key and the display name of the principal it authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub name: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// API keys accepted by the session guard; empty means development mode
    pub api_keys: Vec<ApiKey>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let api_keys = match env::var("DASHBOARD_API_KEYS") {
            Ok(raw) => parse_api_keys(&raw)?,
            Err(_) => Vec::new(),
        };

        let db_path = env::var("DASHBOARD_DB_PATH")
            .unwrap_or_else(|_| "./data/dashboard.sqlite".to_string())
            .into();

        let bind_addr = env::var("DASHBOARD_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| format!("Invalid DASHBOARD_BIND_ADDR format: {}", e))?;

        let log_level = env::var("DASHBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("DASHBOARD_LOG_FORMAT") {
            Ok(raw) => parse_log_format(&raw)?,
            Err(_) => LogFormat::Pretty,
        };

        Ok(Self {
            api_keys,
            db_path,
            bind_addr,
            log_level,
            log_format,
        })
    }
}

/// Parse `key=Display Name` pairs separated by commas.
pub fn parse_api_keys(raw: &str) -> Result<Vec<ApiKey>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (key, name) = entry
                .split_once('=')
                .ok_or_else(|| format!("Invalid DASHBOARD_API_KEYS entry (expected key=name): {}", entry))?;
            let (key, name) = (key.trim(), name.trim());
            if key.is_empty() || name.is_empty() {
                return Err(format!(
                    "Invalid DASHBOARD_API_KEYS entry (empty key or name): {}",
                    entry
                ));
            }
            Ok(ApiKey {
                key: key.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("Invalid DASHBOARD_LOG_FORMAT: {}", other)),
    }
}
