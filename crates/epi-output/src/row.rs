//! Plain data row types written by output backends.

use epi_core::{PathogenId, Tick};
use epi_pathogen::CompartmentCounts;
use epi_population::Host;
use epi_sim::ModelView;

/// Marks a host with no current place (it has died).
pub const NO_PLACE: u32 = u32::MAX;

/// Host counts per compartment for one pathogen at the end of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompartmentSummaryRow {
    pub tick:              u64,
    /// Simulated time since the start of the run, in hours.
    pub time_hours:        f64,
    pub phase:             &'static str,
    pub pathogen_id:       u16,
    pub susceptible:       u32,
    pub incubating:        u32,
    pub infectious:        u32,
    pub recovered:         u32,
    pub dead_treated:      u32,
    pub dead_untreated:    u32,
    /// Hospital beds in use across all pathogens.
    pub hospital_occupied: u32,
}

impl CompartmentSummaryRow {
    pub fn new(view: &ModelView<'_>, pathogen: PathogenId, counts: CompartmentCounts) -> Self {
        Self {
            tick:              view.tick.0,
            time_hours:        view.time.in_hours(),
            phase:             view.phase.as_str(),
            pathogen_id:       pathogen.0,
            susceptible:       counts.susceptible,
            incubating:        counts.incubating,
            infectious:        counts.infectious,
            recovered:         counts.recovered,
            dead_treated:      counts.dead_treated,
            dead_untreated:    counts.dead_untreated,
            hospital_occupied: view.hospital.occupied(),
        }
    }
}

/// One host's state for one pathogen at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSnapshotRow {
    pub tick:           u64,
    pub host_id:        u32,
    /// [`NO_PLACE`] once the host is off the map.
    pub place_id:       u32,
    pub pathogen_id:    u16,
    pub compartment:    &'static str,
    pub treated:        bool,
    pub carried_agents: u32,
}

impl HostSnapshotRow {
    pub fn new(tick: Tick, host: &Host, pathogen: PathogenId) -> Self {
        Self {
            tick:           tick.0,
            host_id:        host.id.0,
            place_id:       host.current_place().map_or(NO_PLACE, |p| p.0),
            pathogen_id:    pathogen.0,
            compartment:    host.compartment(pathogen).as_str(),
            treated:        host.status(pathogen).is_some_and(|s| s.treated()),
            carried_agents: host.carried_agents().len() as u32,
        }
    }
}
