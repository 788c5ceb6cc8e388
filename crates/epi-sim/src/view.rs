//! Borrowed, read-only view of a model handed to observers.

use epi_core::{PathogenId, Tick, Time};
use epi_pathogen::{CompartmentCounts, Hospital, Pathogen};
use epi_population::Population;
use epi_schedule::Phase;

/// What an observer may read at a step boundary.
///
/// Cheap to build (all borrows); the model constructs one per callback.
#[derive(Copy, Clone)]
pub struct ModelView<'a> {
    pub tick:       Tick,
    pub time:       Time,
    pub phase:      Phase,
    pub population: &'a Population,
    pub pathogens:  &'a [Pathogen],
    pub hospital:   &'a Hospital,
}

impl<'a> ModelView<'a> {
    /// Per-compartment host counts for `pathogen`.
    pub fn compartment_counts(&self, pathogen: PathogenId) -> CompartmentCounts {
        compartment_counts(self.population, pathogen)
    }

    /// Pathogens with their ids, in id order.
    pub fn pathogens(&self) -> impl Iterator<Item = (PathogenId, &'a Pathogen)> + 'a {
        self.pathogens
            .iter()
            .enumerate()
            .map(|(i, p)| (PathogenId(i as u16), p))
    }
}

pub(crate) fn compartment_counts(population: &Population, pathogen: PathogenId) -> CompartmentCounts {
    population.hosts.iter().map(|h| h.compartment(pathogen)).collect()
}
