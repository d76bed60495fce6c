use std::sync::Arc;

use spaserve::config::{AppState, Config};
use spaserve::logger;
use spaserve::server::signal::{start_signal_handler, SignalHandler};
use spaserve::server::Server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    // One listener, per-connection local tasks: a current-thread runtime is
    // all this server needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(cfg)?);

    let addr = state.config.get_socket_addr()?;
    let server = Server::bind(addr)?;

    logger::log_server_start(&server.local_addr()?, &state);

    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals));

    // LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    let shutdown = Arc::clone(&signals.shutdown);
    local.run_until(server.serve(state, shutdown)).await?;

    logger::log_shutdown();
    Ok(())
}
