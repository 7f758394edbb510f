//! Static per-channel table: initial values, hard clamp bounds, comfort
//! bands and random-walk step sizes.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Channel identity
// ---------------------------------------------------------------------------

/// One monitored quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Temperature,
    Humidity,
    Light,
    Noise,
}

impl Channel {
    /// Every channel, in evaluation and display order.
    pub const ALL: [Channel; 4] = [
        Channel::Temperature,
        Channel::Humidity,
        Channel::Light,
        Channel::Noise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Noise => "noise",
        }
    }

    pub fn spec(self) -> &'static ChannelSpec {
        match self {
            Self::Temperature => &TEMPERATURE,
            Self::Humidity => &HUMIDITY,
            Self::Light => &LIGHT,
            Self::Noise => &NOISE,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Channel table
// ---------------------------------------------------------------------------

/// Comfort band used for warnings.  `min` is `None` when the channel has no
/// lower bound (noise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: Option<f64>,
    pub max: f64,
}

#[derive(Debug)]
pub struct ChannelSpec {
    /// Human label used in warning titles and cards ("Light Level").
    pub label: &'static str,
    pub unit: &'static str,
    pub initial: f64,
    /// Hard physical bounds, applied after every update.
    pub clamp_min: f64,
    pub clamp_max: f64,
    pub band: Band,
    /// Full width of the uniform perturbation; the step is
    /// `(u - 0.5) * step_scale` for `u` in `[0, 1)`.
    pub step_scale: f64,
}

impl ChannelSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.clamp_min, self.clamp_max)
    }
}

static TEMPERATURE: ChannelSpec = ChannelSpec {
    label: "Temperature",
    unit: "°C",
    initial: 22.0,
    clamp_min: 10.0,
    clamp_max: 35.0,
    band: Band {
        min: Some(18.0),
        max: 26.0,
    },
    step_scale: 2.0,
};

static HUMIDITY: ChannelSpec = ChannelSpec {
    label: "Humidity",
    unit: "%",
    initial: 45.0,
    clamp_min: 10.0,
    clamp_max: 90.0,
    band: Band {
        min: Some(30.0),
        max: 70.0,
    },
    step_scale: 5.0,
};

static LIGHT: ChannelSpec = ChannelSpec {
    label: "Light Level",
    unit: "lux",
    initial: 300.0,
    clamp_min: 0.0,
    clamp_max: 1000.0,
    band: Band {
        min: Some(200.0),
        max: 800.0,
    },
    step_scale: 50.0,
};

static NOISE: ChannelSpec = ChannelSpec {
    label: "Noise Level",
    unit: "dB",
    initial: 40.0,
    clamp_min: 20.0,
    clamp_max: 100.0,
    band: Band {
        min: None,
        max: 60.0,
    },
    step_scale: 10.0,
};

// ===========================================================================
// Tests
// ===========================================================================
