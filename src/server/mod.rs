// Server module entry point
// Owns the listening socket and runs the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Owned handle to the listening socket.
///
/// Binding and serving are separate operations so the caller controls the
/// lifecycle explicitly instead of relying on process-ambient state.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Bind the listening socket. A failure here is fatal to startup.
    pub fn bind(addr: SocketAddr) -> std::io::Result<Self> {
        let listener = listener::create_listener(addr)?;
        Ok(Self { listener })
    }

    /// Address the server is actually bound to (resolves port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the shutdown notification fires.
    ///
    /// Each connection is served on its own local task; the loop itself
    /// never waits on a request. On shutdown the loop declines further
    /// accepts and returns; in-flight requests are not cancelled.
    pub async fn serve(self, state: Arc<AppState>, shutdown: Arc<Notify>) -> std::io::Result<()> {
        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            connection::accept_connection(stream, peer_addr, &state);
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = shutdown.notified() => {
                    logger::log_shutdown_requested();
                    break;
                }
            }
        }
        Ok(())
    }
}
