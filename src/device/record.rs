//! Versioned identity record and its fixed-width byte layout
//!
//! Layout (28 bytes, contiguous):
//!
//! | bytes  | field                                   |
//! |--------|-----------------------------------------|
//! | 0..4   | version tag, NUL-padded                 |
//! | 4..28  | device name, UTF-8, NUL-padded          |
//!
//! A name of exactly 24 bytes carries no terminator. Shorter names are always
//! written with the full padding so no bytes of an older value survive.

use std::fmt;
use thiserror::Error;

/// Width of the version tag field
pub const VERSION_TAG_LEN: usize = 4;

/// Capacity of the device name buffer (max host name length)
pub const DEVICE_NAME_SIZE: usize = 24;

/// Total encoded size of a record
pub const RECORD_SIZE: usize = VERSION_TAG_LEN + DEVICE_NAME_SIZE;

/// Schema version exposed to templates
pub const CONFIG_VERSION: &str = "V1";

/// Compiled-in tag a stored record must carry to be accepted
pub const VERSION_TAG: [u8; VERSION_TAG_LEN] = *b"V1\0\0";

/// Name written on cold start
pub const DEFAULT_DEVICE_NAME: &str = "BenchPSU";

/// Reasons a string cannot be used as a device name
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("device name is {len} bytes, maximum is 24")]
    TooLong { len: usize },

    #[error("device name must not contain NUL bytes")]
    ContainsNul,
}

/// Device name bounded to the on-storage buffer size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceName(String);

impl DeviceName {
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.len() > DEVICE_NAME_SIZE {
            return Err(NameError::TooLong { len: name.len() });
        }
        if name.contains('\0') {
            return Err(NameError::ContainsNul);
        }
        Ok(Self(name.to_string()))
    }

    /// Decode the raw name buffer: stop at the first NUL, replace invalid UTF-8.
    fn from_buffer(buf: &[u8]) -> Self {
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        let mut name = String::from_utf8_lossy(&buf[..end]).into_owned();

        // Replacement characters can push a lossy decode past the buffer size
        while name.len() > DEVICE_NAME_SIZE {
            name.pop();
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceName {
    fn default() -> Self {
        Self(DEFAULT_DEVICE_NAME.to_string())
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device identity persisted across reboots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub version: [u8; VERSION_TAG_LEN],
    pub device_name: DeviceName,
}

impl Default for ConfigurationRecord {
    fn default() -> Self {
        Self {
            version: VERSION_TAG,
            device_name: DeviceName::default(),
        }
    }
}

impl ConfigurationRecord {
    /// Record with the current version tag and the given name
    pub const fn with_name(device_name: DeviceName) -> Self {
        Self {
            version: VERSION_TAG,
            device_name,
        }
    }

    /// True when the leading bytes equal the compiled-in tag
    pub fn has_valid_tag(bytes: &[u8]) -> bool {
        bytes.len() >= VERSION_TAG_LEN && bytes[..VERSION_TAG_LEN] == VERSION_TAG
    }

    /// Version tag as text, without padding
    pub fn version_str(&self) -> String {
        let end = self
            .version
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(VERSION_TAG_LEN);
        String::from_utf8_lossy(&self.version[..end]).into_owned()
    }

    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[..VERSION_TAG_LEN].copy_from_slice(&self.version);

        let name = self.device_name.as_str().as_bytes();
        buf[VERSION_TAG_LEN..VERSION_TAG_LEN + name.len()].copy_from_slice(name);
        buf
    }

    /// Decode every field; tag validation is the caller's job.
    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Self {
        let mut version = [0u8; VERSION_TAG_LEN];
        version.copy_from_slice(&buf[..VERSION_TAG_LEN]);

        Self {
            version,
            device_name: DeviceName::from_buffer(&buf[VERSION_TAG_LEN..]),
        }
    }
}
