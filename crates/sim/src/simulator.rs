//! Stateful environmental sensor simulator.
//!
//! Each channel is a memoryless random walk: every tick adds a uniform step
//! centred on zero, then clamps to the channel's hard bounds.  Clamping means
//! a value can sit on a bound for several ticks in a row.

use serde::Serialize;

use crate::channel::Channel;
use crate::warning::{Level, Warning};

// ---------------------------------------------------------------------------
// Raw and formatted readings
// ---------------------------------------------------------------------------

/// Current raw value of every channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readings {
    pub temperature: f64,
    pub humidity: f64,
    pub light: f64,
    pub noise: f64,
}

impl Readings {
    fn initial() -> Self {
        Self {
            temperature: Channel::Temperature.spec().initial,
            humidity: Channel::Humidity.spec().initial,
            light: Channel::Light.spec().initial,
            noise: Channel::Noise.spec().initial,
        }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
            Channel::Light => self.light,
            Channel::Noise => self.noise,
        }
    }

    fn get_mut(&mut self, channel: Channel) -> &mut f64 {
        match channel {
            Channel::Temperature => &mut self.temperature,
            Channel::Humidity => &mut self.humidity,
            Channel::Light => &mut self.light,
            Channel::Noise => &mut self.noise,
        }
    }
}

/// Display-ready readings.  Temperature, humidity and noise always carry one
/// decimal digit; light is a whole number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub temperature: String,
    pub humidity: String,
    pub light: i64,
    pub noise: String,
}

impl Snapshot {
    /// Formatted value for `channel`, as it should appear on screen.
    pub fn display(&self, channel: Channel) -> String {
        match channel {
            Channel::Temperature => self.temperature.clone(),
            Channel::Humidity => self.humidity.clone(),
            Channel::Light => self.light.to_string(),
            Channel::Noise => self.noise.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Owns the current readings and the random source that moves them.
pub struct SensorSim {
    readings: Readings,
    rng: fastrand::Rng,
}

impl Default for SensorSim {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSim {
    /// Start from the initial readings with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Start from the initial readings with a reproducible walk.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            readings: Readings::initial(),
            rng,
        }
    }

    /// Move every channel one random-walk step and clamp it to its hard
    /// bounds.
    pub fn advance(&mut self) {
        for channel in Channel::ALL {
            let spec = channel.spec();
            let step = (self.rng.f64() - 0.5) * spec.step_scale;
            let value = self.readings.get_mut(channel);
            *value = spec.clamp(*value + step);
        }
    }

    /// Compare every channel against its comfort band.
    ///
    /// At most one warning per channel, in [`Channel::ALL`] order.  Noise is
    /// only ever checked against its upper bound.
    pub fn evaluate(&self) -> Vec<Warning> {
        Channel::ALL
            .into_iter()
            .filter_map(|channel| {
                let band = channel.spec().band;
                let value = self.readings.get(channel);
                match band.min {
                    Some(min) if value < min => Warning::new(channel, Level::Low),
                    _ if value > band.max => Warning::new(channel, Level::High),
                    _ => None,
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let r = &self.readings;
        Snapshot {
            temperature: to_fixed_1(r.temperature),
            humidity: to_fixed_1(r.humidity),
            light: r.light.round() as i64,
            noise: to_fixed_1(r.noise),
        }
    }

    pub fn readings(&self) -> Readings {
        self.readings
    }

    /// Overwrite one channel.  The value is clamped to the channel's hard
    /// bounds, so out-of-range input lands on the nearest bound.
    pub fn set(&mut self, channel: Channel, value: f64) {
        *self.readings.get_mut(channel) = channel.spec().clamp(value);
    }
}

/// One-decimal fixed-point string with ties rounded away from zero.
///
/// `{:.1}` rounds exact ties to even.  A one-decimal tie is exact only when
/// the fraction is .25 or .75, i.e. when `v * 4` is an odd integer; those
/// values scale by 10 without loss, so `round` settles them.
fn to_fixed_1(v: f64) -> String {
    let quarters = v * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (v * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", v)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
