// Configuration module
// Environment-overridable settings plus state resolved once at startup

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub spa: SpaConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Document root and fallback document for the SPA routing rule
#[derive(Debug, Deserialize, Clone)]
pub struct SpaConfig {
    pub root_dir: String,
    pub fallback: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub access_log_format: String,
}

impl Config {
    /// Load configuration from environment variables over built-in defaults.
    ///
    /// Nested keys use `__` in the environment:
    /// `SPASERVE_SERVER__PORT=9000`, `SPASERVE_SPA__ROOT_DIR=dist`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("SPASERVE").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("spa.root_dir", ".")?
            .set_default("spa.fallback", "index.html")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared per-process state: the loaded configuration plus values resolved
/// once at startup. Requests only read it; no locking is needed.
pub struct AppState {
    pub config: Config,
    /// Canonical document root; every resolved file must stay under it.
    pub root: PathBuf,

    // Cached config value for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Resolve the document root and build the shared state.
    ///
    /// A document root that does not exist or is not a directory is a
    /// startup failure; there is nothing to serve.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(&config.spa.root_dir)?;
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("document root is not a directory: {}", root.display()),
            ));
        }

        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Ok(Self {
            config,
            root,
            cached_access_log,
        })
    }

    /// Filesystem path of the configured fallback document.
    pub fn fallback_path(&self) -> PathBuf {
        self.root.join(&self.config.spa.fallback)
    }
}
