//! Bench PSU fan controller
//!
//! Persists the device identity in byte-addressable storage and serves the
//! bundled web UI plus a status document over HTTP, substituting template
//! tokens into text assets.

pub mod assets;
pub mod device;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod settings;
pub mod state;
pub mod template;
