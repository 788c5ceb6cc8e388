//! Scenario construction and debugging commands.
//!
//! These mutate the model outside `update` and are meant for setting up a
//! run (places, hosts, index cases) or forcing a known state in tests.

use std::ops::RangeInclusive;

use log::debug;

use epi_behavior::ChoiceModel;
use epi_core::{AgentId, Coordinate, Demographic, HostId, LandUse, PathogenId, PlaceCategory, PlaceId};
use epi_pathogen::PathogenEffect;
use epi_population::{AgentVessel, Itinerary, NewHost};

use crate::{CityModel, SimError, SimResult};

impl<C: ChoiceModel> CityModel<C> {
    // ── Construction ──────────────────────────────────────────────────────

    pub fn add_place(
        &mut self,
        name:       impl Into<String>,
        coordinate: Coordinate,
        land_use:   LandUse,
        size:       f64,
    ) -> SimResult<PlaceId> {
        Ok(self.population.add_place(name, coordinate, land_use, size)?)
    }

    pub fn add_host(&mut self, host: NewHost) -> SimResult<HostId> {
        Ok(self.population.add_host(host)?)
    }

    /// Add `count` hosts of `demographic`, each living at a uniformly chosen
    /// place of `home_use` and, when `work_use` is given, working at a
    /// uniformly chosen place of that use.
    ///
    /// # Errors
    /// [`SimError::Config`] when no place of a requested use exists.
    pub fn populate(
        &mut self,
        demographic: Demographic,
        count:       usize,
        home_use:    LandUse,
        work_use:    Option<LandUse>,
    ) -> SimResult<Vec<HostId>> {
        let homes = self.places().with_use(home_use).to_vec();
        if homes.is_empty() && count > 0 {
            return Err(SimError::Config(format!("populate: no {home_use} places")));
        }
        let works = match work_use {
            Some(land_use) => {
                let works = self.places().with_use(land_use).to_vec();
                if works.is_empty() && count > 0 {
                    return Err(SimError::Config(format!("populate: no {land_use} places")));
                }
                works
            }
            None => Vec::new(),
        };

        let mut added = Vec::with_capacity(count);
        for _ in 0..count {
            let home = homes[self.rng.gen_range(0..homes.len())];
            let name = format!("{}-{}", demographic.as_str(), self.population.hosts.len());
            let mut host = NewHost::new(name, demographic, home);
            if !works.is_empty() {
                host = host.secondary(works[self.rng.gen_range(0..works.len())]);
            }
            added.push(self.population.add_host(host)?);
        }
        debug!("populated {count} {demographic} hosts in {home_use} places");
        Ok(added)
    }

    /// Scatter `count` places of `land_use` uniformly over the square
    /// `[0, extent]²`, each with a size drawn uniformly from `size`.
    pub fn random_places(
        &mut self,
        land_use: LandUse,
        count:    usize,
        extent:   f64,
        size:     RangeInclusive<f64>,
    ) -> SimResult<Vec<PlaceId>> {
        if !(extent.is_finite() && extent >= 0.0) {
            return Err(SimError::Config(format!("random_places: extent must be >= 0, got {extent}")));
        }
        if !(*size.start() > 0.0 && size.start() <= size.end() && size.end().is_finite()) {
            return Err(SimError::Config(format!(
                "random_places: size range must be positive and ordered, got {size:?}"
            )));
        }

        let mut added = Vec::with_capacity(count);
        for _ in 0..count {
            let coordinate = Coordinate::planar(
                self.rng.gen_range(0.0..=extent),
                self.rng.gen_range(0.0..=extent),
            );
            let s = self.rng.gen_range(size.clone());
            let name = format!("{}-{}", land_use.as_str(), self.places().len());
            added.push(self.population.add_place(name, coordinate, land_use, s)?);
        }
        debug!("added {count} random {land_use} places");
        Ok(added)
    }

    /// Create an agent of `pathogen` in `vessel`, with the pathogen's full
    /// agent life.
    pub fn put_agent(&mut self, vessel: AgentVessel, pathogen: PathogenId) -> SimResult<AgentId> {
        let life = self
            .pathogen(pathogen)
            .ok_or(SimError::UnknownPathogen(pathogen))?
            .agent_life;
        Ok(self.population.put_agent(vessel, pathogen, life)?)
    }

    // ── Infection ─────────────────────────────────────────────────────────

    /// Infect `host` with `pathogen` now, bypassing resilience.
    ///
    /// Idempotent: returns `Ok(false)` and changes nothing when the host
    /// already has a status for `pathogen` (or is dead).
    pub fn infect_host(&mut self, host: HostId, pathogen: PathogenId) -> SimResult<bool> {
        self.check_ids(host, pathogen)?;
        Ok(self.infect(host, pathogen))
    }

    /// An exposure: the host's resilience is rolled first and a success
    /// blocks the infection.
    pub fn expose_host(&mut self, host: HostId, pathogen: PathogenId) -> SimResult<bool> {
        self.check_ids(host, pathogen)?;
        Ok(self.expose(host, pathogen))
    }

    /// Seed `count` distinct susceptible hosts, chosen uniformly, directly in
    /// the `Infectious` compartment.  Returns their ids in ascending order.
    pub fn patient_zero(&mut self, pathogen: PathogenId, count: usize) -> SimResult<Vec<HostId>> {
        let p = self
            .pathogens
            .get(pathogen.index())
            .ok_or(SimError::UnknownPathogen(pathogen))?;

        let mut chosen: Vec<HostId> = self
            .population
            .hosts
            .iter()
            .filter(|h| h.current_place().is_some() && h.status(pathogen).is_none())
            .map(|h| h.id)
            .collect();
        if count > chosen.len() {
            return Err(SimError::Config(format!(
                "patient_zero: asked for {count} hosts, only {} susceptible",
                chosen.len()
            )));
        }
        self.rng.shuffle(&mut chosen);
        chosen.truncate(count);
        chosen.sort_unstable();

        let now = self.clock.current_time;
        for &id in &chosen {
            if let Some(h) = self.population.hosts.get_mut(id) {
                let effect = PathogenEffect::seeded_infectious(
                    p,
                    h.demographic,
                    now,
                    &mut self.hospital,
                    self.rng.inner(),
                );
                h.statuses_mut().insert(pathogen, effect);
            }
        }
        debug!("patient zero: seeded {count} hosts with {}", p.name);
        Ok(chosen)
    }

    // ── Forced movement ───────────────────────────────────────────────────

    /// Send every living host home.  Returns the number relocated.
    pub fn all_to_primary(&mut self) -> usize {
        self.all_to(PlaceCategory::Primary)
    }

    /// Send every living host to work or school (home if it has none).
    pub fn all_to_secondary(&mut self) -> usize {
        self.all_to(PlaceCategory::Secondary)
    }

    /// Send every living host to a tertiary place resolved by the choice model.
    pub fn all_to_tertiary(&mut self) -> usize {
        self.all_to(PlaceCategory::Tertiary)
    }

    /// The placement holds until the next phase change.
    fn all_to(&mut self, category: PlaceCategory) -> usize {
        let itinerary = Itinerary { phase: Some(self.current_phase), diverted: false };

        let choice = &self.choice;
        let (hosts, places, rngs) = self.population.split_for_movement();
        let moves: Vec<(HostId, PlaceId)> = hosts
            .iter()
            .filter(|h| h.current_place().is_some())
            .map(|h| (h.id, choice.destination(h, category, places, rngs.get_mut(h.id))))
            .collect();

        let mut moved = 0;
        for (host, destination) in moves {
            if self.population.relocate(host, destination).is_ok() {
                if let Some(h) = self.population.hosts.get_mut(host) {
                    h.itinerary = itinerary;
                }
                moved += 1;
            }
        }
        debug!("forced {moved} hosts to {category} places");
        moved
    }

    fn check_ids(&self, host: HostId, pathogen: PathogenId) -> SimResult<()> {
        if self.population.host(host).is_none() {
            return Err(SimError::UnknownHost(host));
        }
        if self.pathogen(pathogen).is_none() {
            return Err(SimError::UnknownPathogen(pathogen));
        }
        Ok(())
    }
}
