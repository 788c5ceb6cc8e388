//! Read-only state passed to every movement decision.

use epi_core::{Tick, Time};
use epi_population::PlaceRegistry;
use epi_schedule::Phase;

/// A read-only snapshot of the tick, shared by every
/// [`ChoiceModel::choose`][crate::ChoiceModel::choose] call.
///
/// Built once per tick by epi-sim after the clock has advanced.  All borrows
/// live for the duration of the movement step only.
pub struct MoveContext<'a> {
    pub tick:           Tick,
    /// Simulated time after this tick's advance.
    pub now:            Time,
    /// Length of this tick.
    pub time_step:      Time,
    pub phase:          Phase,
    /// Full length of the current phase; per-tick anomaly and recovery
    /// probabilities are scaled by `time_step / phase_duration`.
    pub phase_duration: Time,
    pub places:         &'a PlaceRegistry,
}

impl<'a> MoveContext<'a> {
    #[inline]
    pub fn new(
        tick:           Tick,
        now:            Time,
        time_step:      Time,
        phase:          Phase,
        phase_duration: Time,
        places:         &'a PlaceRegistry,
    ) -> Self {
        Self { tick, now, time_step, phase, phase_duration, places }
    }

    /// `time_step / phase_duration`, or `1.0` for a degenerate phase.
    pub fn step_fraction(&self) -> f64 {
        self.time_step.ratio(self.phase_duration).unwrap_or(1.0)
    }
}
