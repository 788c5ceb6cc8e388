//! Named periods of the day.

use std::fmt;
use std::str::FromStr;

use epi_core::PlaceCategory;

use crate::ScheduleError;

/// A named period of the day that drives where hosts want to be.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Sleep,
    Home,
    Work,
    Errands,
    Leisure,
}

impl Phase {
    pub const ALL: [Phase; 5] = [Phase::Sleep, Phase::Home, Phase::Work, Phase::Errands, Phase::Leisure];

    /// The place category a host heads to during this phase when nothing
    /// diverts it.
    pub fn nominal_category(self) -> PlaceCategory {
        match self {
            Phase::Sleep | Phase::Home       => PlaceCategory::Primary,
            Phase::Work                      => PlaceCategory::Secondary,
            Phase::Errands | Phase::Leisure  => PlaceCategory::Tertiary,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Sleep   => "sleep",
            Phase::Home    => "home",
            Phase::Work    => "work",
            Phase::Errands => "errands",
            Phase::Leisure => "leisure",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, ScheduleError> {
        let needle = s.trim().to_ascii_lowercase();
        Phase::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| ScheduleError::Parse(format!("unknown phase {s:?}")))
    }
}
