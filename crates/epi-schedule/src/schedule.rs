//! The repeating phase cycle.

use epi_core::{Time, TimeInterval, TimeUnit};

use crate::{Phase, ScheduleError, ScheduleResult};

// ── PhaseSlot ─────────────────────────────────────────────────────────────────

/// Where an absolute time falls inside the cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhaseSlot {
    pub phase:     Phase,
    /// The phase's interval within one period.
    pub interval:  TimeInterval,
    /// Time left until the phase ends.
    pub remaining: Time,
}

impl PhaseSlot {
    /// Full length of the phase.
    #[inline]
    pub fn duration(&self) -> Time {
        self.interval.duration()
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An ordered, repeating sequence of `(interval, phase)` pairs.
///
/// Each phase added starts where the previous one ended; the first starts
/// at zero.  The period is the sum of all durations and the cycle repeats
/// forever, so `get_phase(t)` and `get_phase(t + k·period)` always agree.
///
/// Intervals are half-open: an instant exactly on a boundary belongs to the
/// phase that begins there.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    intervals: Vec<(TimeInterval, Phase)>,
    period:    Time,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(TimeUnit::Hour)
    }
}

impl Schedule {
    /// An empty schedule whose boundaries are kept in `unit`.
    pub fn new(unit: TimeUnit) -> Self {
        Self { intervals: Vec::new(), period: Time::new(0.0, unit) }
    }

    /// Convenience: build a schedule from `(phase, duration)` pairs in order.
    pub fn from_phases<I>(phases: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = (Phase, Time)>,
    {
        let mut schedule = Schedule::default();
        for (phase, duration) in phases {
            schedule.add_phase(phase, duration)?;
        }
        Ok(schedule)
    }

    /// Append `phase` for `duration`, starting where the previous phase ended.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidDuration`] if `duration <= 0`.
    pub fn add_phase(&mut self, phase: Phase, duration: Time) -> ScheduleResult<&mut Self> {
        if !duration.is_positive() {
            return Err(ScheduleError::InvalidDuration(duration));
        }
        let start = self.period;
        let end = start + duration;
        self.intervals.push((TimeInterval::new(start, end), phase));
        self.period = end;
        Ok(self)
    }

    /// Total length of one cycle.
    #[inline]
    pub fn period(&self) -> Time {
        self.period
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[(TimeInterval, Phase)] {
        &self.intervals
    }

    /// The phase active at absolute time `t`.
    ///
    /// # Errors
    /// [`ScheduleError::EmptySchedule`] if no phase was added.
    pub fn get_phase(&self, t: Time) -> ScheduleResult<Phase> {
        self.phase_slot(t).map(|slot| slot.phase)
    }

    /// The phase active at `t`, with its interval and the time remaining in it.
    pub fn phase_slot(&self, t: Time) -> ScheduleResult<PhaseSlot> {
        let Some(&(last_interval, last_phase)) = self.intervals.last() else {
            return Err(ScheduleError::EmptySchedule);
        };
        let offset = t.convert(self.period.unit).modulo(self.period)?;

        let (interval, phase) = self
            .intervals
            .iter()
            .copied()
            .find(|(iv, _)| iv.contains(offset))
            // Float rounding can leave `offset` a hair short of `period`.
            .unwrap_or((last_interval, last_phase));

        Ok(PhaseSlot {
            phase,
            interval,
            remaining: (interval.end - offset).non_negative(),
        })
    }
}
