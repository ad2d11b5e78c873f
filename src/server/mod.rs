// Server module entry point
// Accept loop for the HTTP server

pub mod connection;
pub mod listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::logger;
use crate::state::AppState;

pub use connection::handle_connection;
pub use listener::create_listener;

/// Accept connections forever, serving each one in a local task.
///
/// Must run inside a `tokio::task::LocalSet`.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
