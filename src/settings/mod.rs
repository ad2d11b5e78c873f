// Settings module entry point
// Loads runtime settings from an optional file layered under environment variables

mod types;

use std::net::SocketAddr;
use std::time::Duration;

pub use types::{
    AssetSettings, LoggingSettings, PerformanceSettings, ServerSettings, Settings,
    StorageBackend, StorageSettings,
};

/// Settings file used when none is given on the command line
pub const DEFAULT_SETTINGS_PATH: &str = "benchpsu";

/// Prefix for environment overrides, e.g. `BENCHPSU_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "BENCHPSU";

impl Settings {
    /// Load settings from the given file path (extension optional).
    /// A missing file is not an error; every key has a default.
    pub fn load_from(settings_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(settings_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 80)?
            .set_default("assets.root", "data")?
            .set_default("storage.backend", "file")?
            .set_default("storage.path", "eeprom.bin")?
            .set_default("storage.offset", 0)?
            .set_default("storage.capacity", 512)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Upper bound for serving a single connection
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(std::cmp::max(
            self.performance.read_timeout,
            self.performance.write_timeout,
        ))
    }
}
