//! # senna-dashboard
//!
//! Serves the Senna operations dashboard feed over HTTP. The feed is folded
//! from [`senna_core`] bus events and refreshed counters; the router exposes
//! it along with simulator controls, demo triggers and the assistant chat.

pub mod api;
pub mod config;
pub mod feed;
pub mod state;

pub use api::{ApiResponse, router};
pub use config::DashboardConfig;
pub use feed::{ChatMessage, ChatRole, DashboardFeed};
pub use state::AppState;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run the dashboard server until Ctrl-C
pub async fn serve(config: DashboardConfig) -> std::io::Result<()> {
    let addr = config.bind_addr();
    let autostart = config.autostart;
    let state = AppState::new(config);

    let token = CancellationToken::new();
    let poller = state.spawn_metrics_poller(token.clone());
    if autostart {
        state.simulator.start();
    }

    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "dashboard listening");

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    token.cancel();
    state.shutdown();
    let _ = poller.await;
    Ok(())
}

/// Print the startup banner listing every route
pub fn print_api_docs(config: &DashboardConfig) {
    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║              Senna Dashboard HTTP API                         ║");
    eprintln!("╠══════════════════════════════════════════════════════════════╣");
    eprintln!("║ Base URL: http://{:<44} ║", config.bind_addr());
    eprintln!("╠──────────────────────────────────────────────────────────────╣");
    for (method, path, desc) in api::api_routes() {
        eprintln!("║ {:5} {:22} - {:31} ║", method, path, desc);
    }
    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
}
