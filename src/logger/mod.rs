//! Logger module
//!
//! Provides logging utilities for the controller:
//! - Boot and server lifecycle logging
//! - Access logging in several formats
//! - Error and warning logging
//! - Optional file targets
//!
//! Before `init` runs (and in tests) everything goes to stdout/stderr.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::device::ConfigurationRecord;
use crate::settings::Settings;
use std::net::SocketAddr;

/// Install the log targets from settings. Call once at startup.
pub fn init(settings: &Settings) -> std::io::Result<()> {
    writer::init(
        settings.logging.access_log_file.as_deref(),
        settings.logging.error_log_file.as_deref(),
    )
}

/// Write to the info/access target
pub fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to the error target
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_boot(identity: &ConfigurationRecord, cold_start: bool) {
    write_info("======================================");
    write_info(&format!("Device name: {}", identity.device_name));
    write_info(&format!("Config version: {}", identity.version_str()));
    if cold_start {
        write_info("Cold start: defaults persisted");
    }
}

pub fn log_server_start(addr: &SocketAddr, settings: &Settings, route_count: usize) {
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Asset root: {}", settings.assets.root));
    write_info(&format!("Routes registered: {route_count}"));
    if let Some(ref path) = settings.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = settings.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}
