//! `epi-population`: hosts, places, and pathogen agents of the city.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`element`]    | `Element` (uid, name, coordinate), `UidSource`             |
//! | [`place`]      | `Place`, `PlaceRegistry` (by id and by land use)           |
//! | [`host`]       | `Host`, `Itinerary`                                        |
//! | [`agent`]      | `Agent`, `AgentVessel`, `AgentRegistry`                    |
//! | [`store`]      | `HostStore`, `HostRngs` (per-host RNG)                     |
//! | [`population`] | `Population`, `NewHost`                                    |
//! | [`builder`]    | `PopulationBuilder` (fluent construction)                  |
//! | [`error`]      | `PopulationError`, `PopulationResult<T>`                   |
//!
//! # Relationships
//!
//! Hosts refer to places by `PlaceId`, agents to their vessel by
//! [`AgentVessel`].  The reverse edges (a place's occupants, a host's carried
//! agents, a place's deposited agents) are indices owned by [`Population`]
//! and written only by its methods, so the two sides cannot drift apart.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash for the land-use index.                           |
//! | `serde`   | Derives `Serialize`/`Deserialize` on all public types.   |

pub mod agent;
pub mod builder;
pub mod element;
pub mod error;
pub mod host;
pub mod place;
pub mod population;
pub mod store;


pub use agent::{Agent, AgentRegistry, AgentVessel};
pub use builder::PopulationBuilder;
pub use element::{Element, UidSource};
pub use error::{PopulationError, PopulationResult};
pub use host::{Host, Itinerary};
pub use place::{Place, PlaceRegistry};
pub use population::{NewHost, Population};
pub use store::{HostRngs, HostStore};
