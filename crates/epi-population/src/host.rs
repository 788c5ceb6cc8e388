//! Hosts: the people of the city.

use std::collections::{BTreeMap, BTreeSet};

use epi_core::{AgentId, Coordinate, Demographic, HostId, PathogenId, PlaceId, Rate};
use epi_pathogen::{Compartment, PathogenEffect};
use epi_schedule::Phase;

use crate::Element;

/// Movement state the choice model carries between ticks.
///
/// `phase` is the phase the current destination was resolved for;
/// `diverted` is set while the host is on an anomalous tertiary excursion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    pub phase:    Option<Phase>,
    pub diverted: bool,
}

/// A person that can be infected, carry agents, and move between places.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Host {
    pub id:              HostId,
    pub element:         Element,
    pub demographic:     Demographic,
    /// Home.
    pub primary_place:   PlaceId,
    /// Work or school, if any.
    pub secondary_place: Option<PlaceId>,
    /// Probability that an exposure is shrugged off.
    pub resilience:      Rate,
    pub itinerary:       Itinerary,
    pub(crate) current_place:  Option<PlaceId>,
    pub(crate) statuses:       BTreeMap<PathogenId, PathogenEffect>,
    pub(crate) carried_agents: BTreeSet<AgentId>,
}

impl Host {
    /// Where the host is now; `None` once it has died and been removed
    /// from the map.
    #[inline]
    pub fn current_place(&self) -> Option<PlaceId> {
        self.current_place
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.element.coordinate
    }

    /// The host's compartment for `pathogen`; `Susceptible` if never infected.
    pub fn compartment(&self, pathogen: PathogenId) -> Compartment {
        self.statuses
            .get(&pathogen)
            .map_or(Compartment::Susceptible, PathogenEffect::compartment)
    }

    pub fn status(&self, pathogen: PathogenId) -> Option<&PathogenEffect> {
        self.statuses.get(&pathogen)
    }

    pub fn statuses(&self) -> &BTreeMap<PathogenId, PathogenEffect> {
        &self.statuses
    }

    /// Direct status access for the infection and progression passes.
    pub fn statuses_mut(&mut self) -> &mut BTreeMap<PathogenId, PathogenEffect> {
        &mut self.statuses
    }

    pub fn carried_agents(&self) -> &BTreeSet<AgentId> {
        &self.carried_agents
    }

    /// `true` once any pathogen has killed the host.
    pub fn is_dead(&self) -> bool {
        self.statuses.values().any(|e| e.compartment().is_dead())
    }
}
