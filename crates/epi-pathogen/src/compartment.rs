//! Disease stages and per-stage tallies.

use std::fmt;

/// A host's disease stage with respect to one pathogen.
///
/// Variants are declared in progression order, so `Ord` matches the only
/// direction a host may move: `Susceptible → Incubating → Infectious →
/// terminal`.  Nothing leaves a terminal state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compartment {
    #[default]
    Susceptible,
    Incubating,
    Infectious,
    Recovered,
    DeadTreated,
    DeadUntreated,
}

impl Compartment {
    pub const ALL: [Compartment; 6] = [
        Compartment::Susceptible,
        Compartment::Incubating,
        Compartment::Infectious,
        Compartment::Recovered,
        Compartment::DeadTreated,
        Compartment::DeadUntreated,
    ];

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Compartment::Recovered | Compartment::DeadTreated | Compartment::DeadUntreated
        )
    }

    #[inline]
    pub fn is_dead(self) -> bool {
        matches!(self, Compartment::DeadTreated | Compartment::DeadUntreated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compartment::Susceptible   => "susceptible",
            Compartment::Incubating    => "incubating",
            Compartment::Infectious    => "infectious",
            Compartment::Recovered     => "recovered",
            Compartment::DeadTreated   => "dead_treated",
            Compartment::DeadUntreated => "dead_untreated",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host counts per compartment for one pathogen.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentCounts {
    pub susceptible:    u32,
    pub incubating:     u32,
    pub infectious:     u32,
    pub recovered:      u32,
    pub dead_treated:   u32,
    pub dead_untreated: u32,
}

impl CompartmentCounts {
    pub fn record(&mut self, compartment: Compartment) {
        let slot = match compartment {
            Compartment::Susceptible   => &mut self.susceptible,
            Compartment::Incubating    => &mut self.incubating,
            Compartment::Infectious    => &mut self.infectious,
            Compartment::Recovered     => &mut self.recovered,
            Compartment::DeadTreated   => &mut self.dead_treated,
            Compartment::DeadUntreated => &mut self.dead_untreated,
        };
        *slot += 1;
    }

    pub fn get(&self, compartment: Compartment) -> u32 {
        match compartment {
            Compartment::Susceptible   => self.susceptible,
            Compartment::Incubating    => self.incubating,
            Compartment::Infectious    => self.infectious,
            Compartment::Recovered     => self.recovered,
            Compartment::DeadTreated   => self.dead_treated,
            Compartment::DeadUntreated => self.dead_untreated,
        }
    }

    pub fn total(&self) -> u32 {
        Compartment::ALL.iter().map(|&c| self.get(c)).sum()
    }

    pub fn dead(&self) -> u32 {
        self.dead_treated + self.dead_untreated
    }
}

impl FromIterator<Compartment> for CompartmentCounts {
    fn from_iter<I: IntoIterator<Item = Compartment>>(iter: I) -> Self {
        let mut counts = CompartmentCounts::default();
        for c in iter {
            counts.record(c);
        }
        counts
    }
}
