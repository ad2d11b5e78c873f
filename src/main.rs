use std::sync::Arc;

use benchpsu::device;
use benchpsu::logger;
use benchpsu::server;
use benchpsu::settings::{Settings, DEFAULT_SETTINGS_PATH};
use benchpsu::state::AppState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load_from(&settings_path)?;
    logger::init(&settings)?;

    // One request at a time, handlers never run in parallel
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(settings))
}

async fn async_main(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    // Storage is only touched here: load, and persist defaults on a cold start
    let (identity, cold_start) = device::boot_identity(&settings.storage)?;
    logger::log_boot(&identity, cold_start);

    let addr = settings.socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(settings, identity));
    logger::log_server_start(&addr, &state.settings, state.registry.len());

    let local = tokio::task::LocalSet::new();
    local.run_until(server::serve(listener, state)).await;
    Ok(())
}
