//! `epi-core`: foundational types for the `rust_epi` city epidemic simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`ids`]          | `HostId`, `PlaceId`, `AgentId`, `PathogenId`, `Uid`       |
//! | [`geo`]          | `Coordinate`, euclidean distance                          |
//! | [`time`]         | `TimeUnit`, `Time`, `TimeInterval`, `Tick`                |
//! | [`distribution`] | `TimeDistribution` (Box–Muller duration sampling)         |
//! | [`rate`]         | `Rate`: validated probability with `roll()`               |
//! | [`clock`]        | `SimClock`, `SimConfig`                                   |
//! | [`rng`]          | `HostRng` (per-host), `SimRng` (model-level)              |
//! | [`demography`]   | `Demographic`, `LandUse`, `PlaceCategory`                 |
//! | [`error`]        | `CoreError`, `CoreResult`                                 |
//!
//! # Stochastic primitives
//!
//! [`Rate::roll`] and [`TimeDistribution::sample`] are the only two random
//! draws the engine makes.  Every higher-level decision (transmission,
//! symptom expression, movement anomalies) is a composition of the two.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod clock;
pub mod demography;
pub mod distribution;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rate;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{SimClock, SimConfig};
pub use demography::{Demographic, LandUse, PlaceCategory};
pub use distribution::TimeDistribution;
pub use error::{CoreError, CoreResult};
pub use geo::Coordinate;
pub use ids::{AgentId, HostId, PathogenId, PlaceId, Uid};
pub use rate::Rate;
pub use rng::{HostRng, SimRng};
pub use time::{Tick, Time, TimeInterval, TimeUnit};
