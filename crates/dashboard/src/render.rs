//! Turns simulator output into the view the web page paints.  Pure data in,
//! pure data out: no locks, no clocks.

use envdash_sim::{Channel, Readings, Snapshot, Warning};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub sensor: Channel,
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub status: Status,
    /// Position inside the comfort band, 0-100.
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub status: Status,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub cards: Vec<Card>,
    pub system: SystemStatus,
    pub warnings: Vec<Warning>,
}

impl DashboardView {
    pub fn has_alerts(&self) -> bool {
        self.system.status == Status::Warning
    }
}

/// Build the full view for one tick.
pub fn render(snapshot: &Snapshot, readings: &Readings, warnings: Vec<Warning>) -> DashboardView {
    let cards = Channel::ALL
        .into_iter()
        .map(|channel| {
            let spec = channel.spec();
            let warned = warnings.iter().any(|w| w.sensor == channel);
            Card {
                sensor: channel,
                label: spec.label,
                value: snapshot.display(channel),
                unit: spec.unit,
                status: if warned { Status::Warning } else { Status::Normal },
                progress: progress(channel, readings.get(channel)),
            }
        })
        .collect();

    let system = if warnings.is_empty() {
        SystemStatus {
            status: Status::Normal,
            text: "All systems normal",
        }
    } else {
        SystemStatus {
            status: Status::Warning,
            text: "System alerts detected",
        }
    };

    DashboardView {
        cards,
        system,
        warnings,
    }
}

/// Progress-bar fill for `value`: its position across the comfort band.
/// Noise has no lower bound, so its bar runs from zero.
pub fn progress(channel: Channel, value: f64) -> f64 {
    let band = channel.spec().band;
    let min = band.min.unwrap_or(0.0);
    ((value - min) / (band.max - min) * 100.0).clamp(0.0, 100.0)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use envdash_sim::SensorSim;

    fn render_sim(sim: &SensorSim) -> DashboardView {
        render(&sim.snapshot(), &sim.readings(), sim.evaluate())
    }

    #[test]
    fn initial_view_is_normal() {
        let view = render_sim(&SensorSim::with_seed(1));

        assert!(!view.has_alerts());
        assert_eq!(view.system.text, "All systems normal");
        assert!(view.warnings.is_empty());
        assert!(view.cards.iter().all(|c| c.status == Status::Normal));

        let labels: Vec<&str> = view.cards.iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Temperature", "Humidity", "Light Level", "Noise Level"]);
        assert_eq!(view.cards[0].value, "22.0");
        assert_eq!(view.cards[0].unit, "°C");
        assert_eq!(view.cards[2].value, "300");
    }

    #[test]
    fn warned_card_and_system_flip() {
        let mut sim = SensorSim::with_seed(1);
        sim.set(Channel::Humidity, 80.0);
        let view = render_sim(&sim);

        assert!(view.has_alerts());
        assert_eq!(view.system.text, "System alerts detected");
        assert_eq!(view.warnings.len(), 1);

        let statuses: Vec<Status> = view.cards.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            [Status::Normal, Status::Warning, Status::Normal, Status::Normal]
        );
    }

    #[test]
    fn progress_maps_band_to_percent() {
        assert_eq!(progress(Channel::Temperature, 22.0), 50.0);
        assert_eq!(progress(Channel::Humidity, 30.0), 0.0);
        assert_eq!(progress(Channel::Light, 500.0), 50.0);
        assert_eq!(progress(Channel::Noise, 30.0), 50.0);
    }

    #[test]
    fn progress_clamps_outside_band() {
        assert_eq!(progress(Channel::Temperature, 12.0), 0.0);
        assert_eq!(progress(Channel::Light, 950.0), 100.0);
        assert_eq!(progress(Channel::Noise, 90.0), 100.0);
    }

    #[test]
    fn progress_uses_raw_reading_not_display() {
        let mut sim = SensorSim::with_seed(1);
        sim.set(Channel::Temperature, 22.04);
        let view = render_sim(&sim);

        assert_eq!(view.cards[0].value, "22.0");
        // 22.0 would give exactly 50.
        assert!((view.cards[0].progress - 50.5).abs() < 1e-9);
    }

    #[test]
    fn view_serializes_for_the_page() {
        let mut sim = SensorSim::with_seed(1);
        sim.set(Channel::Noise, 70.0);
        let json = serde_json::to_value(render_sim(&sim)).unwrap();

        assert_eq!(json["system"]["status"], "warning");
        assert_eq!(json["cards"][3]["sensor"], "noise");
        assert_eq!(json["cards"][3]["status"], "warning");
        assert_eq!(json["cards"][3]["value"], "70.0");
        assert_eq!(json["warnings"][0]["type"], "Noise Level Too High");
    }
}
