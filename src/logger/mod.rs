//! Logger module
//!
//! Console logging for the development server: startup banner, access log
//! lines, and error/warning diagnostics.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use crate::config::AppState;

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    println!("Serving {} at http://{addr}", state.root.display());
    println!("Press Ctrl+C to stop");
}

pub fn log_shutdown_requested() {
    println!("\nShutting down server...");
}

pub fn log_shutdown() {
    println!("Server stopped");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log a formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}
