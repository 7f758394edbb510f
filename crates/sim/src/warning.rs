use serde::Serialize;

use crate::channel::Channel;

/// Which side of the comfort band a reading fell out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    High,
}

/// A single out-of-band reading.  Built fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    /// Title such as "Temperature Too Low".
    #[serde(rename = "type")]
    pub kind: String,
    pub message: &'static str,
    pub sensor: Channel,
    pub level: Level,
}

impl Warning {
    /// Build the warning for `channel` at `level`, or `None` when the catalog
    /// has no message for that combination (noise never warns low).
    pub fn new(channel: Channel, level: Level) -> Option<Self> {
        let messages = WarningCatalog::get(channel);
        let message = match level {
            Level::Low => messages.low?,
            Level::High => messages.high,
        };
        let suffix = match level {
            Level::Low => "Too Low",
            Level::High => "Too High",
        };
        Some(Self {
            kind: format!("{} {suffix}", channel.spec().label),
            message,
            sensor: channel,
            level,
        })
    }
}

/// Advice text shown for each channel.
#[derive(Debug, Clone, Copy)]
pub struct WarningCatalog {
    pub low: Option<&'static str>,
    pub high: &'static str,
}

impl WarningCatalog {
    pub fn get(channel: Channel) -> Self {
        match channel {
            Channel::Temperature => Self {
                low: Some(
                    "Temperature too low! Consider turning on heating or wearing warmer clothes.",
                ),
                high: "Temperature too high! Turn on AC or open windows for ventilation.",
            },
            Channel::Humidity => Self {
                low: Some("Humidity too low! Use a humidifier or place water containers nearby."),
                high: "Humidity too high! Use a dehumidifier or improve ventilation.",
            },
            Channel::Light => Self {
                low: Some("Light level too low! Turn on more lights to reduce eye strain."),
                high: "Light level too high! Use blinds or reduce artificial lighting.",
            },
            Channel::Noise => Self {
                low: None,
                high: "Noise level too high! Consider noise-canceling measures or move to quieter area.",
            },
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
