use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::render::DashboardView;

/// Maximum number of events retained in the ring buffer.
const MAX_EVENTS: usize = 200;

// ---------------------------------------------------------------------------
// Public type alias
// ---------------------------------------------------------------------------

pub type SharedState = Arc<RwLock<DashboardState>>;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

pub struct DashboardState {
    pub started_at: Instant,
    pub ticks: u64,
    pub last_update: OffsetDateTime,
    pub view: DashboardView,
    pub events: VecDeque<SystemEvent>,
}

#[derive(Clone, Serialize)]
pub struct SystemEvent {
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub kind: EventKind,
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Alert,
    System,
}

// ---------------------------------------------------------------------------
// JSON response (what the API returns)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StatusResponse {
    pub uptime_secs: u64,
    pub ticks: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
    pub view: DashboardView,
    pub events: Vec<SystemEvent>,
}

// ---------------------------------------------------------------------------
// Construction & mutation
// ---------------------------------------------------------------------------

impl DashboardState {
    /// Start from the view of the un-advanced simulator.
    pub fn new(initial: DashboardView) -> Self {
        Self {
            started_at: Instant::now(),
            ticks: 0,
            last_update: OffsetDateTime::now_utc(),
            view: initial,
            events: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn shared(initial: DashboardView) -> SharedState {
        Arc::new(RwLock::new(Self::new(initial)))
    }

    /// Replace the current view with the one rendered for this tick.
    ///
    /// An alert event is recorded only when the overall status flips.
    pub fn record_tick(&mut self, view: DashboardView) {
        self.ticks += 1;
        self.last_update = OffsetDateTime::now_utc();

        let was_alerting = self.view.has_alerts();
        if view.has_alerts() != was_alerting {
            let detail = if view.has_alerts() {
                let kinds: Vec<&str> = view.warnings.iter().map(|w| w.kind.as_str()).collect();
                warn!(tick = self.ticks, alerts = kinds.len(), "system alerts detected");
                format!("alerts: {}", kinds.join(", "))
            } else {
                info!(tick = self.ticks, "all systems normal");
                "all readings back in range".to_string()
            };
            self.push_event(EventKind::Alert, detail);
        }

        self.view = view;
    }

    /// Record a generic system event.
    pub fn record_system(&mut self, detail: String) {
        self.push_event(EventKind::System, detail);
    }

    /// Build the JSON-serialisable status snapshot.
    pub fn to_status(&self) -> StatusResponse {
        StatusResponse {
            uptime_secs: self.started_at.elapsed().as_secs(),
            ticks: self.ticks,
            last_update: self.last_update,
            view: self.view.clone(),
            events: self.events.iter().rev().cloned().collect(),
        }
    }

    fn push_event(&mut self, kind: EventKind, detail: String) {
        if self.events.len() >= MAX_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(SystemEvent {
            ts: OffsetDateTime::now_utc(),
            kind,
            detail,
        });
    }
}

// ===========================================================================
// Tests
// ===========================================================================
