// Configuration module
// Loads layered configuration (file, environment, defaults) and owns the
// shared per-process state.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub proxy: ProxyConfig,
    pub static_files: StaticConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Proxy endpoint configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    /// Path prefix that routes to the proxy handler
    pub prefix: String,
    /// Per-request deadline for the whole upstream fetch, body included
    pub timeout_ms: u64,
    /// How binary upstream bodies are delivered back to the caller
    pub transfer: TransferMode,
}

/// Delivery mode for binary upstream bodies
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// Buffer the full body, then inline it as a base64 data URI
    #[default]
    Buffered,
    /// Pass chunks through as they arrive (chunked transfer encoding)
    Streaming,
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Base directory all file paths must resolve under
    pub root: String,
    /// Document served for the bare `/` path
    pub index_file: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 60)?
            .set_default("performance.write_timeout", 60)?
            .set_default("proxy.prefix", "/api/proxy")?
            .set_default("proxy.timeout_ms", 25_000)?
            .set_default("proxy.transfer", "buffered")?
            .set_default("static_files.root", "public")?
            .set_default("static_files.index_file", "index.html")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

impl ProxyConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Shared application state
///
/// One instance per process. Requests share the outbound client (and its
/// connection pool); nothing here is mutated per request.
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            config: config.clone(),
            client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_mode_parsing() {
        let mode: TransferMode = serde_json::from_str("\"buffered\"").unwrap();
        assert_eq!(mode, TransferMode::Buffered);
        let mode: TransferMode = serde_json::from_str("\"streaming\"").unwrap();
        assert_eq!(mode, TransferMode::Streaming);
        assert!(serde_json::from_str::<TransferMode>("\"inline\"").is_err());
    }

    #[test]
    fn test_transfer_mode_default() {
        assert_eq!(TransferMode::default(), TransferMode::Buffered);
    }

    #[test]
    fn test_proxy_timeout_conversion() {
        let proxy = ProxyConfig {
            prefix: "/api/proxy".to_string(),
            timeout_ms: 25_000,
            transfer: TransferMode::Buffered,
        };
        assert_eq!(proxy.timeout(), Duration::from_secs(25));
    }
}
