//! The aggregate of hosts, places, and agents, and the only writer of the
//! occupancy and vessel back-references.

use std::collections::BTreeSet;

use epi_core::{AgentId, Coordinate, Demographic, HostId, LandUse, PathogenId, PlaceId, Rate, Time};

use crate::{
    Agent, AgentRegistry, AgentVessel, Element, Host, HostRngs, HostStore, Itinerary, PlaceRegistry,
    PopulationError, PopulationResult, UidSource,
};

static NO_OCCUPANTS: BTreeSet<HostId> = BTreeSet::new();

/// Everything needed to add a host.  The host is placed at its primary place.
#[derive(Clone, Debug)]
pub struct NewHost {
    pub name:            String,
    pub demographic:     Demographic,
    pub primary_place:   PlaceId,
    pub secondary_place: Option<PlaceId>,
    pub resilience:      Rate,
}

impl NewHost {
    /// A host with no secondary place and zero resilience.
    pub fn new(name: impl Into<String>, demographic: Demographic, primary_place: PlaceId) -> Self {
        Self {
            name: name.into(),
            demographic,
            primary_place,
            secondary_place: None,
            resilience: Rate::NEVER,
        }
    }

    pub fn secondary(mut self, place: PlaceId) -> Self {
        self.secondary_place = Some(place);
        self
    }

    pub fn resilience(mut self, resilience: Rate) -> Self {
        self.resilience = resilience;
        self
    }
}

/// Hosts, places, agents, and the indices tying them together.
///
/// `hosts` and `rngs` are public so the engine can split-borrow them; the
/// fields that encode relationships (`Host::current_place`,
/// `Host::carried_agents`, `Place::agents`, the occupancy index) are only
/// written through the methods here, which keep both sides in step.
pub struct Population {
    pub hosts: HostStore,
    pub rngs:  HostRngs,
    places:    PlaceRegistry,
    agents:    AgentRegistry,
    /// `occupancy[place]` = hosts whose current place is `place`.
    occupancy: Vec<BTreeSet<HostId>>,
    uids:      UidSource,
}

impl Population {
    pub fn new(seed: u64) -> Self {
        Self {
            hosts:     HostStore::default(),
            rngs:      HostRngs::new(seed),
            places:    PlaceRegistry::default(),
            agents:    AgentRegistry::default(),
            occupancy: Vec::new(),
            uids:      UidSource::default(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// # Errors
    /// [`PopulationError::Config`] if `size` is not a positive finite number.
    pub fn add_place(
        &mut self,
        name:       impl Into<String>,
        coordinate: Coordinate,
        land_use:   LandUse,
        size:       f64,
    ) -> PopulationResult<PlaceId> {
        if !(size.is_finite() && size > 0.0) {
            return Err(PopulationError::Config(format!("place size must be > 0, got {size}")));
        }
        let element = self.uids.element(name, coordinate);
        let id = self.places.push(element, land_use, size);
        self.occupancy.push(BTreeSet::new());
        Ok(id)
    }

    /// Add a host at its primary place.
    pub fn add_host(&mut self, spec: NewHost) -> PopulationResult<HostId> {
        let home = self
            .places
            .get(spec.primary_place)
            .ok_or(PopulationError::UnknownPlace(spec.primary_place))?
            .coordinate();
        if let Some(work) = spec.secondary_place {
            self.check_place(work)?;
        }

        let id = HostId(self.hosts.len() as u32);
        let element = self.uids.element(spec.name, home);
        self.hosts.push(Host {
            id,
            element,
            demographic:     spec.demographic,
            primary_place:   spec.primary_place,
            secondary_place: spec.secondary_place,
            resilience:      spec.resilience,
            itinerary:       Itinerary::default(),
            current_place:   Some(spec.primary_place),
            statuses:        Default::default(),
            carried_agents:  BTreeSet::new(),
        });
        self.rngs.push(id);
        self.occupancy[spec.primary_place.index()].insert(id);
        Ok(id)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move `host` to `place`, updating both occupant sets.
    pub fn relocate(&mut self, host: HostId, place: PlaceId) -> PopulationResult<()> {
        self.check_place(place)?;
        let h = self.hosts.get_mut(host).ok_or(PopulationError::UnknownHost(host))?;
        let from = h.current_place.replace(place);
        if from == Some(place) {
            return Ok(());
        }
        if let Some(old) = from {
            self.occupancy[old.index()].remove(&host);
        }
        self.occupancy[place.index()].insert(host);
        Ok(())
    }

    /// Take `host` off the map entirely (used for the dead).
    pub fn vacate(&mut self, host: HostId) -> PopulationResult<()> {
        let h = self.hosts.get_mut(host).ok_or(PopulationError::UnknownHost(host))?;
        if let Some(old) = h.current_place.take() {
            self.occupancy[old.index()].remove(&host);
        }
        Ok(())
    }

    /// Hosts currently at `place`, in id order.  Empty for an unknown place.
    pub fn occupants(&self, place: PlaceId) -> &BTreeSet<HostId> {
        self.occupancy.get(place.index()).unwrap_or(&NO_OCCUPANTS)
    }

    /// `occupants / size` for `place`.
    pub fn density(&self, place: PlaceId) -> Option<f64> {
        self.places.get(place).map(|p| p.density(self.occupants(place).len()))
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Create an agent of `pathogen` with `life` remaining, inside `vessel`.
    pub fn put_agent(
        &mut self,
        vessel:   AgentVessel,
        pathogen: PathogenId,
        life:     Time,
    ) -> PopulationResult<AgentId> {
        match vessel {
            AgentVessel::Host(h) => {
                self.hosts.get(h).ok_or(PopulationError::UnknownHost(h))?;
            }
            AgentVessel::Environment(p) => self.check_place(p)?,
        }
        let id = self.agents.insert(pathogen, life, vessel);
        match vessel {
            AgentVessel::Host(h) => {
                if let Some(host) = self.hosts.get_mut(h) {
                    host.carried_agents.insert(id);
                }
            }
            AgentVessel::Environment(p) => {
                if let Some(place) = self.places.get_mut(p) {
                    place.agents.insert(id);
                }
            }
        }
        Ok(id)
    }

    /// Remove an agent from the registry and from its vessel.
    pub fn remove_agent(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.agents.remove(id)?;
        match agent.vessel {
            AgentVessel::Host(h) => {
                if let Some(host) = self.hosts.get_mut(h) {
                    host.carried_agents.remove(&id);
                }
            }
            AgentVessel::Environment(p) => {
                if let Some(place) = self.places.get_mut(p) {
                    place.agents.remove(&id);
                }
            }
        }
        Some(agent)
    }

    /// `true` if `host` carries a live agent of `pathogen`.
    pub fn host_carries(&self, host: HostId, pathogen: PathogenId) -> bool {
        self.hosts.get(host).is_some_and(|h| {
            h.carried_agents
                .iter()
                .any(|a| self.agents.get(*a).is_some_and(|a| a.pathogen == pathogen))
        })
    }

    /// `true` if an agent of `pathogen` is deposited at `place`.
    pub fn environment_has(&self, place: PlaceId, pathogen: PathogenId) -> bool {
        self.places.get(place).is_some_and(|p| {
            p.agents
                .iter()
                .any(|a| self.agents.get(*a).is_some_and(|a| a.pathogen == pathogen))
        })
    }

    /// Age every agent by `dt` and remove the expired ones.
    ///
    /// Returns the number removed.
    pub fn decay_agents(&mut self, dt: Time) -> usize {
        let mut expired = Vec::new();
        for agent in self.agents.values_mut() {
            agent.life -= dt;
            if !agent.is_alive() {
                expired.push(agent.id);
            }
        }
        for &id in &expired {
            self.remove_agent(id);
        }
        expired.len()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn host(&self, id: HostId) -> Option<&Host> {
        self.hosts.get(id)
    }

    pub fn place(&self, id: PlaceId) -> Option<&crate::Place> {
        self.places.get(id)
    }

    pub fn places(&self) -> &PlaceRegistry {
        &self.places
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    /// Uids handed out to hosts and places so far.
    pub fn uids_issued(&self) -> u64 {
        self.uids.issued()
    }

    /// Borrow hosts and places shared while holding the per-host RNGs
    /// exclusively (the movement phase's access pattern).
    pub fn split_for_movement(&mut self) -> (&HostStore, &PlaceRegistry, &mut HostRngs) {
        (&self.hosts, &self.places, &mut self.rngs)
    }

    fn check_place(&self, place: PlaceId) -> PopulationResult<()> {
        if self.places.contains(place) {
            Ok(())
        } else {
            Err(PopulationError::UnknownPlace(place))
        }
    }
}
