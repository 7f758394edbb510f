//! Simulated environmental sensors for the envdash demo dashboard.
//!
//! The [`SensorSim`] holds one reading per [`Channel`] and advances them as a
//! bounded random walk.  It knows nothing about rendering or timing: callers
//! drive it with [`SensorSim::advance`] and read it back through
//! [`SensorSim::evaluate`] and [`SensorSim::snapshot`].  [`ticker`] provides
//! the cancellable repeating task used to do that on a fixed period.

pub mod channel;
pub mod simulator;
pub mod ticker;
pub mod warning;

pub use channel::{Band, Channel, ChannelSpec};
pub use simulator::{Readings, SensorSim, Snapshot};
pub use ticker::{spawn_repeating, Ticker};
pub use warning::{Level, Warning, WarningCatalog};
