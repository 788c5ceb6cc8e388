//! `epi-behavior`: where hosts go, phase by phase.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`movement`]     | `Movement` (`Stay`, `Relocate`)                           |
//! | [`context`]      | `MoveContext<'a>`: read-only tick snapshot                |
//! | [`model`]        | `ChoiceModel` trait                                       |
//! | [`behavior_map`] | `BehaviorMap`, `Candidate`: the standard choice model     |
//! | [`stay`]         | `StayPut`: nobody moves                                   |
//! | [`error`]        | `BehaviorError`, `BehaviorResult<T>`                      |
//!
//! # Design notes
//!
//! Movement in epi-sim is two-phase:
//!
//! 1. **Choose** (optionally parallel): call `ChoiceModel::choose` for every
//!    living host against a shared `&MoveContext` and the host's own RNG.
//! 2. **Apply** (sequential): relocate hosts in ascending `HostId` order,
//!    which is the only place the occupancy index is written.
//!
//! A choice model therefore never holds mutable state; what a host needs to
//! remember between ticks travels in its `Itinerary`.

pub mod behavior_map;
pub mod context;
pub mod error;
pub mod model;
pub mod movement;
pub mod stay;


pub use behavior_map::{BehaviorMap, Candidate, DEFAULT_MAX_ATTEMPTS};
pub use context::MoveContext;
pub use error::{BehaviorError, BehaviorResult};
pub use model::ChoiceModel;
pub use movement::Movement;
pub use stay::StayPut;
