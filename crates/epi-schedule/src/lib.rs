//! `epi-schedule`: the repeating daily cycle that drives host movement.
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`phase`]    | `Phase` and its nominal `PlaceCategory`             |
//! | [`schedule`] | `Schedule`, `PhaseSlot`                             |
//! | [`loader`]   | `load_schedule_csv`, `load_schedule_reader`         |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                |
//!
//! # Cycle model (summary)
//!
//! ```text
//! offset        = t mod period            (Euclidean, so always ≥ 0)
//! current_phase = interval with start ≤ offset < end
//! remaining     = end − offset
//! ```
//!
//! A schedule with phases SLEEP(6h), HOME(16h), SLEEP(2h) has a 24h period;
//! 23h falls in the trailing SLEEP, 30h wraps to 6h and lands in HOME.

pub mod error;
pub mod loader;
pub mod phase;
pub mod schedule;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_schedule_csv, load_schedule_reader};
pub use phase::Phase;
pub use schedule::{PhaseSlot, Schedule};
