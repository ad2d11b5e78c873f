// Settings types module
// Defines the runtime settings data structures

use serde::Deserialize;

/// Main settings structure
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub assets: AssetSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub performance: PerformanceSettings,
}

/// Listening endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Location of the bundled web UI
#[derive(Debug, Deserialize, Clone)]
pub struct AssetSettings {
    /// Directory that asset identifiers are resolved against
    pub root: String,
}

/// Which storage backend holds the identity record
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Emulated EEPROM file, survives restarts
    File,
    /// RAM only, every boot is a cold start
    Memory,
}

/// Non-volatile storage settings
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub path: String,
    /// Byte offset of the record inside the storage region
    pub offset: u32,
    /// Size of the emulated storage region in bytes
    pub capacity: usize,
}

/// Logging settings
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection handling settings
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceSettings {
    pub keep_alive: bool,
    pub read_timeout: u64,
    pub write_timeout: u64,
}
