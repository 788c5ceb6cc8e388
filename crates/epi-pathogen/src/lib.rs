//! `epi-pathogen`: disease parameters and the per-host infection state machine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`pathogen`]    | `Pathogen`, `PathogenBuilder`, `ByDemographic`, `Symptom` |
//! | [`compartment`] | `Compartment`, `CompartmentCounts`                      |
//! | [`effect`]      | `PathogenEffect` (one per host × pathogen)              |
//! | [`hospital`]    | `Hospital` bed accounting                               |
//! | [`error`]       | `PathogenError`, `PathogenResult<T>`                    |
//!
//! # Progression
//!
//! ```text
//! Susceptible ──infect──▶ Incubating ──incubation elapsed──▶ Infectious
//!                                     (sample infectious duration,
//!                                      express symptoms, request a bed)
//! Infectious ──infectious duration elapsed──▶ Recovered
//!                                           │ DeadTreated   (held a bed)
//!                                           │ DeadUntreated (did not)
//! ```
//!
//! Reinfection is not modelled: terminal states are absorbing.  A waning
//! immunity extension would add a `Recovered → Susceptible` edge here.

pub mod compartment;
pub mod effect;
pub mod error;
pub mod hospital;
pub mod pathogen;

#[cfg(test)]
mod tests;

pub use compartment::{Compartment, CompartmentCounts};
pub use effect::PathogenEffect;
pub use error::{PathogenError, PathogenResult};
pub use hospital::Hospital;
pub use pathogen::{ByDemographic, Pathogen, PathogenBuilder, PathogenKind, Symptom};
