//! Closed enums describing who hosts are and what places are for.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Demographic ───────────────────────────────────────────────────────────────

/// Age band of a host.  Rates keyed per demographic index into a `[T; 3]`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Demographic {
    Child,
    Adult,
    Senior,
}

impl Demographic {
    pub const ALL: [Demographic; 3] = [Demographic::Child, Demographic::Adult, Demographic::Senior];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Demographic::Child  => "child",
            Demographic::Adult  => "adult",
            Demographic::Senior => "senior",
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Demographic {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "child"  => Ok(Demographic::Child),
            "adult"  => Ok(Demographic::Adult),
            "senior" => Ok(Demographic::Senior),
            other => Err(CoreError::Config(format!("unknown demographic {other:?}"))),
        }
    }
}

// ── LandUse ───────────────────────────────────────────────────────────────────

/// What a place is used for.  The behavior map resolves destinations by
/// land use, never by individual place.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LandUse {
    Dwelling,
    Office,
    School,
    Retail,
    Restaurant,
    Park,
    Hospital,
    Industrial,
}

impl LandUse {
    pub const ALL: [LandUse; 8] = [
        LandUse::Dwelling,
        LandUse::Office,
        LandUse::School,
        LandUse::Retail,
        LandUse::Restaurant,
        LandUse::Park,
        LandUse::Hospital,
        LandUse::Industrial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LandUse::Dwelling   => "dwelling",
            LandUse::Office     => "office",
            LandUse::School     => "school",
            LandUse::Retail     => "retail",
            LandUse::Restaurant => "restaurant",
            LandUse::Park       => "park",
            LandUse::Hospital   => "hospital",
            LandUse::Industrial => "industrial",
        }
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LandUse {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let needle = s.trim().to_ascii_lowercase();
        LandUse::ALL
            .into_iter()
            .find(|u| u.as_str() == needle)
            .ok_or_else(|| CoreError::Config(format!("unknown land use {s:?}")))
    }
}

// ── PlaceCategory ─────────────────────────────────────────────────────────────

/// Role a place plays for a host: home, work/school, or anywhere else.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceCategory {
    Primary,
    Secondary,
    Tertiary,
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaceCategory::Primary   => "primary",
            PlaceCategory::Secondary => "secondary",
            PlaceCategory::Tertiary  => "tertiary",
        })
    }
}
