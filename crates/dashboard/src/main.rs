mod config;
mod render;
mod state;
mod tick;
mod web;

use anyhow::Result;
use envdash_sim::SensorSim;
use std::{env, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use state::DashboardState;

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging ─────────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── Config file ─────────────────────────────────────────────────
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "dashboard.toml".to_string());
    let cfg = config::load(&config_path)?;
    let addr = cfg.listen_addr()?;

    // ── Simulator ───────────────────────────────────────────────────
    let sim = match cfg.seed {
        Some(seed) => SensorSim::with_seed(seed),
        None => SensorSim::new(),
    };

    // The page shows the initial readings before the first tick.
    let shared = DashboardState::shared(tick::frame(&sim));
    {
        let mut st = shared.write().await;
        st.record_system("dashboard started".to_string());
    }

    // ── Tick ────────────────────────────────────────────────────────
    let shutdown = CancellationToken::new();
    let ticker = tick::spawn(
        sim,
        Arc::clone(&shared),
        cfg.tick_period(),
        shutdown.child_token(),
    );
    tracing::info!(tick_ms = cfg.tick_ms, "simulation started");

    // ── Signals ─────────────────────────────────────────────────────
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("received Ctrl-C, shutting down");
                signal_token.cancel();
            }
            Err(e) => tracing::error!("failed to listen for Ctrl-C: {e}"),
        }
    });

    // ── Web server ──────────────────────────────────────────────────
    let served = web::serve(Arc::clone(&shared), addr, shutdown.clone()).await;

    shutdown.cancel();
    ticker.shutdown().await;
    tracing::info!(ticks = shared.read().await.ticks, "dashboard stopped");

    served
}
