//! Simulation clock and run configuration.
//!
//! The model carries both a continuous [`Time`] (what the schedule and the
//! disease progression read) and an integer [`Tick`] (what observers and
//! output rows are keyed by).  [`SimClock::advance`] moves both together.

use std::fmt;

use crate::{CoreError, CoreResult, Tick, Time, TimeUnit};

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current position of a run on both time axes.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Elapsed simulated time since the start of the run.
    pub current_time: Time,
    /// Number of completed updates.
    pub current_tick: Tick,
}

impl SimClock {
    /// A clock at time zero, expressed in `unit`.
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            current_time: Time::new(0.0, unit),
            current_tick: Tick::ZERO,
        }
    }

    /// Advance by one update of length `dt`.
    #[inline]
    pub fn advance(&mut self, dt: Time) {
        self.current_time += dt;
        self.current_tick = self.current_tick.next();
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_mins = self.current_time.value_in(TimeUnit::Min).max(0.0) as u64;
        let days = total_mins / 1_440;
        let hours = ((total_mins % 1_440) / 60) as u32;
        let minutes = (total_mins % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// The demo loads this from JSON; library users usually build it in code.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Length of one `step()`.  Default: 1 hour.
    pub time_step: Time,

    /// Steps performed by `run()`.  For 60 days at 1 h/step: 60 * 24 = 1440.
    pub total_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Fire `on_snapshot` every N steps.  1 = every step.
    pub output_interval_steps: u64,

    /// Hospital bed capacity.  `None` means every host whose hospitalisation
    /// roll succeeds is treated.
    pub hospital_beds: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step:             Time::hours(1.0),
            total_steps:           24 * 60,
            seed:                  0,
            num_threads:           None,
            output_interval_steps: 1,
            hospital_beds:         None,
        }
    }
}

impl SimConfig {
    /// The tick at which `run()` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_steps)
    }

    /// A `SimClock` at time zero in the unit of `time_step`.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.time_step.unit)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.time_step.is_positive() {
            return Err(CoreError::Config(format!(
                "time_step must be > 0, got {}",
                self.time_step
            )));
        }
        if self.output_interval_steps == 0 {
            return Err(CoreError::Config("output_interval_steps must be >= 1".into()));
        }
        Ok(())
    }
}
