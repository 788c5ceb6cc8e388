//! `epi-sim`: the city model and its update loop.
//!
//! # Update passes
//!
//! ```text
//! update(dt):
//!   ① Clock        current_time += dt; phase recomputed from the schedule.
//!   ② Movement     ChoiceModel::choose per living host (parallel with the
//!                  `parallel` feature), applied in ascending HostId order.
//!   ③ Shedding     every Infectious (host, pathogen):
//!                    a. carry an agent of the pathogen
//!                    b. deposit one at the current place  p = attack·h
//!                    c. expose each co-located host       p = attack·h·density
//!   ④ Environment  each deposited agent exposes occupants p = attack·h/size
//!   ⑤ Progression  at most one compartment transition per status
//!   ⑥ Decay        agent life -= dt; expired agents removed
//! ```
//!
//! `h` is the step length in hours.  Passes ③–⑤ draw from one model-level
//! RNG in id order; movement draws from per-host RNGs.  A seeded run is
//! therefore reproducible with or without `parallel`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`model`]    | `CityModel`: state, run loop, queries                   |
//! | [`tick`]     | `update` and its passes, `StepStats`                    |
//! | [`scenario`] | `patient_zero`, `populate`, `all_to_*`, …               |
//! | [`builder`]  | `CityModelBuilder`                                      |
//! | [`observer`] | `SimObserver`, `NoopObserver`                           |
//! | [`view`]     | `ModelView`: what observers see                         |
//! | [`error`]    | `SimError`, `SimResult<T>`                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the movement decisions on Rayon's thread pool.    |
//! | `fx-hash`  | FxHash for the land-use index.                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_behavior::BehaviorMap;
//! use epi_core::SimConfig;
//! use epi_sim::{CityModelBuilder, NoopObserver};
//!
//! let mut model = CityModelBuilder::new(SimConfig::default(), schedule, BehaviorMap::new())
//!     .pathogen(flu)
//!     .population(city)
//!     .build()?;
//! model.patient_zero(flu_id, 3)?;
//! model.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod scenario;
pub mod tick;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::CityModelBuilder;
pub use error::{SimError, SimResult};
pub use model::CityModel;
pub use observer::{NoopObserver, SimObserver};
pub use tick::StepStats;
pub use view::ModelView;
