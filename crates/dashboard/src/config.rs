//! TOML config file loading and validation.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Shortest tick the dashboard accepts.
const MIN_TICK_MS: u64 = 100;
/// Longest tick the dashboard accepts (one minute).
const MAX_TICK_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// Config file structure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Simulation period in milliseconds.
    pub tick_ms: u64,
    pub web_port: u16,
    pub bind: String,
    /// Fixes the random walk when set.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            web_port: 8080,
            bind: "0.0.0.0".to_string(),
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Config {
    /// Validate all entries.  Returns `Ok(())` or an error describing every
    /// violation found (not just the first one).
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&self.tick_ms) {
            errors.push(format!(
                "tick_ms {} out of range [{MIN_TICK_MS}, {MAX_TICK_MS}]",
                self.tick_ms
            ));
        }

        if self.web_port == 0 {
            errors.push("web_port must be non-zero".to_string());
        }

        if self.bind.parse::<IpAddr>().is_err() {
            errors.push(format!("bind '{}' is not an IP address", self.bind));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "config validation failed ({} error{}):\n  - {}",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" },
                errors.join("\n  - ")
            );
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Listen address.  Only meaningful after [`Config::validate`] passed.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address: {}", self.bind))?;
        Ok(SocketAddr::new(ip, self.web_port))
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Parse and validate TOML config text.
pub fn parse(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("failed to parse config")?;
    config.validate()?;
    Ok(config)
}

/// Read, parse, and validate a TOML config file.  A missing file yields the
/// defaults.
pub fn load(path: &str) -> Result<Config> {
    if !Path::new(path).exists() {
        tracing::info!(path, "config file not found — using defaults");
        return Ok(Config::default());
    }

    let contents =
        std::fs::read_to_string(path).with_context(|| format!("failed to read config: {path}"))?;
    let config = parse(&contents).with_context(|| format!("invalid config: {path}"))?;

    tracing::info!(
        path,
        tick_ms = config.tick_ms,
        web_port = config.web_port,
        seeded = config.seed.is_some(),
        "config loaded"
    );

    Ok(config)
}

// ===========================================================================
// Tests
// ===========================================================================
