//! Drives the simulator on a fixed period and publishes each rendered frame
//! into the shared state.

use std::sync::Arc;
use std::time::Duration;

use envdash_sim::{spawn_repeating, SensorSim, Ticker};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::render::{render, DashboardView};
use crate::state::SharedState;

/// Render the simulator's current readings without advancing it.
pub fn frame(sim: &SensorSim) -> DashboardView {
    render(&sim.snapshot(), &sim.readings(), sim.evaluate())
}

/// Move the simulator into a repeating task: every `period` it advances one
/// step and the rendered frame replaces the shared view.
pub fn spawn(
    mut sim: SensorSim,
    shared: SharedState,
    period: Duration,
    token: CancellationToken,
) -> Ticker {
    spawn_repeating(period, token, move || {
        sim.advance();
        let view = frame(&sim);
        let values: Vec<String> = view
            .cards
            .iter()
            .map(|c| format!("{}={}", c.sensor, c.value))
            .collect();
        debug!(
            readings = %values.join(" "),
            warnings = view.warnings.len(),
            "tick"
        );

        let shared = Arc::clone(&shared);
        async move {
            shared.write().await.record_tick(view);
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================
