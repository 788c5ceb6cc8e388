//! `CityModel::update` and its passes.

use log::{debug, trace, warn};

use epi_behavior::{ChoiceModel, MoveContext, Movement};
use epi_core::{HostId, HostRng, PathogenId, PlaceId, Time};
use epi_pathogen::{Compartment, PathogenEffect};
use epi_population::{AgentVessel, Host};

use crate::{CityModel, SimError, SimResult};

/// Per-update counts, logged at `debug` level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub moved:       usize,
    pub deposited:   usize,
    pub infected:    usize,
    pub transitions: usize,
    pub deaths:      usize,
    pub expired:     usize,
}

impl<C: ChoiceModel> CityModel<C> {
    /// Advance the model by `dt`.
    ///
    /// ```text
    /// ① clock      current_time += dt; phase recomputed from the schedule
    /// ② movement   choice model per living host; occupancy updated
    /// ③ shedding   every Infectious (host, pathogen): carried agent,
    ///              environment deposit, direct host→host exposure
    /// ④ environment every deposited agent exposes its place's occupants
    /// ⑤ progression at most one compartment transition per status
    /// ⑥ decay      agent life -= dt; expired agents removed
    /// ```
    ///
    /// The phase lookup is made before anything is mutated, so an error
    /// leaves the model exactly as it was.
    ///
    /// # Errors
    /// [`SimError::Config`] when `dt` is not a positive finite duration.
    pub fn update(&mut self, dt: Time) -> SimResult<StepStats> {
        if !dt.is_positive() {
            return Err(SimError::Config(format!("update step must be > 0, got {dt}")));
        }
        let slot = self.schedule.phase_slot(self.clock.current_time + dt)?;

        // ── ① Clock ───────────────────────────────────────────────────────
        self.clock.advance(dt);
        self.current_phase = slot.phase;

        let mut stats = StepStats::default();

        // ── ② Movement ────────────────────────────────────────────────────
        stats.moved = self.move_hosts(dt, slot.duration());

        // ── ③ Shedding and direct transmission ────────────────────────────
        let hours = dt.in_hours();
        let (deposited, direct) = self.shed(hours);
        stats.deposited = deposited;

        // ── ④ Environment → host ──────────────────────────────────────────
        stats.infected = direct + self.environment_exposure(hours);

        // ── ⑤ Progression ─────────────────────────────────────────────────
        let (transitions, deaths) = self.progress_hosts();
        stats.transitions = transitions;
        stats.deaths = deaths;

        // ── ⑥ Agent decay ─────────────────────────────────────────────────
        stats.expired = self.population.decay_agents(dt);

        debug!(
            "{} {}: moved {} deposited {} infected {} transitions {} deaths {} expired {}",
            self.clock,
            self.current_phase,
            stats.moved,
            stats.deposited,
            stats.infected,
            stats.transitions,
            stats.deaths,
            stats.expired
        );
        Ok(stats)
    }

    // ── ② ─────────────────────────────────────────────────────────────────

    /// Compute every host's movement (in parallel with the `parallel`
    /// feature), then apply relocations in ascending `HostId` order.
    fn move_hosts(&mut self, dt: Time, phase_duration: Time) -> usize {
        let tick  = self.clock.current_tick;
        let now   = self.clock.current_time;
        let phase = self.current_phase;

        // Explicit field borrows so the borrow checker sees disjoint access.
        let choice = &self.choice;
        let (hosts, places, rngs) = self.population.split_for_movement();
        let ctx = MoveContext::new(tick, now, dt, phase, phase_duration, places);

        let decide = |host: &Host, rng: &mut HostRng| {
            if host.current_place().is_none() {
                Movement::Stay
            } else {
                choice.choose(host, &ctx, rng)
            }
        };

        #[cfg(not(feature = "parallel"))]
        let moves: Vec<Movement> = hosts
            .iter()
            .zip(rngs.inner.iter_mut())
            .map(|(host, rng)| decide(host, rng))
            .collect();

        #[cfg(feature = "parallel")]
        let moves: Vec<Movement> = {
            use rayon::prelude::*;

            hosts
                .as_slice()
                .par_iter()
                .zip(rngs.inner.par_iter_mut())
                .map(|(host, rng)| decide(host, rng))
                .collect()
        };

        let mut moved = 0;
        for (i, movement) in moves.into_iter().enumerate() {
            let Movement::Relocate { destination, itinerary } = movement else {
                continue;
            };
            let host = HostId(i as u32);
            match self.population.relocate(host, destination) {
                Ok(()) => {
                    if let Some(h) = self.population.hosts.get_mut(host) {
                        h.itinerary = itinerary;
                    }
                    moved += 1;
                }
                // A bad destination from a custom choice model is non-fatal:
                // the host stays where it is.
                Err(e) => warn!("{host}: relocation to {destination} failed: {e}"),
            }
        }
        moved
    }

    // ── ③ ─────────────────────────────────────────────────────────────────

    /// Returns `(environment deposits, direct infections)`.
    fn shed(&mut self, hours: f64) -> (usize, usize) {
        let shedders: Vec<(HostId, PathogenId, PlaceId)> = self
            .population
            .hosts
            .iter()
            .filter_map(|h| h.current_place().map(|place| (h, place)))
            .flat_map(|(h, place)| {
                h.statuses()
                    .iter()
                    .filter(|(_, e)| e.compartment() == Compartment::Infectious)
                    .map(move |(&pid, _)| (h.id, pid, place))
            })
            .collect();

        let mut deposited = 0;
        let mut infected = 0;
        for (host, pid, place) in shedders {
            let Some(pathogen) = self.pathogens.get(pid.index()) else { continue };
            let attack = pathogen.attack_rate;
            let life = pathogen.agent_life;

            // a. every shedder carries an agent of what it sheds
            if !self.population.host_carries(host, pid) {
                if let Err(e) = self.population.put_agent(AgentVessel::Host(host), pid, life) {
                    warn!("{host}: could not attach agent of {pid}: {e}");
                }
            }

            // b. deposit into the environment
            if !self.population.environment_has(place, pid)
                && attack.scaled(hours).roll(self.rng.inner())
            {
                match self.population.put_agent(AgentVessel::Environment(place), pid, life) {
                    Ok(agent) => {
                        trace!("{host} deposited {agent} of {pid} at {place}");
                        deposited += 1;
                    }
                    Err(e) => warn!("{host}: could not deposit agent at {place}: {e}"),
                }
            }

            // c. direct host → host
            let Some(density) = self.population.density(place) else { continue };
            let chance = attack.scaled(hours * density);
            let targets: Vec<HostId> = self
                .population
                .occupants(place)
                .iter()
                .copied()
                .filter(|&other| other != host)
                .collect();
            for target in targets {
                if self.is_exposable(target, pid)
                    && chance.roll(self.rng.inner())
                    && self.expose(target, pid)
                {
                    trace!("{host} infected {target} with {pid} at {place}");
                    infected += 1;
                }
            }
        }
        (deposited, infected)
    }

    // ── ④ ─────────────────────────────────────────────────────────────────

    fn environment_exposure(&mut self, hours: f64) -> usize {
        let deposits: Vec<(PlaceId, PathogenId)> = self
            .population
            .agents()
            .iter()
            .filter_map(|a| match a.vessel {
                AgentVessel::Environment(place) => Some((place, a.pathogen)),
                AgentVessel::Host(_) => None,
            })
            .collect();

        let mut infected = 0;
        for (place, pid) in deposits {
            let Some(attack) = self.pathogens.get(pid.index()).map(|p| p.attack_rate) else {
                continue;
            };
            let Some(size) = self.population.place(place).map(|p| p.size) else { continue };
            let chance = attack.scaled(hours / size);
            let occupants: Vec<HostId> = self.population.occupants(place).iter().copied().collect();
            for target in occupants {
                if self.is_exposable(target, pid)
                    && chance.roll(self.rng.inner())
                    && self.expose(target, pid)
                {
                    trace!("environment at {place} infected {target} with {pid}");
                    infected += 1;
                }
            }
        }
        infected
    }

    // ── ⑤ ─────────────────────────────────────────────────────────────────

    /// Returns `(transitions, deaths)`.  The newly dead are taken off the map.
    ///
    /// Hosts already off the map are skipped.  Once one pathogen kills a
    /// host its remaining statuses are not progressed; they end with the
    /// host and release any bed they hold.
    fn progress_hosts(&mut self) -> (usize, usize) {
        let now = self.clock.current_time;
        let pathogens = &self.pathogens;
        let hospital = &mut self.hospital;
        let rng = &mut self.rng;

        let mut transitions = 0;
        let mut died = Vec::new();
        for host in self.population.hosts.iter_mut() {
            if host.current_place().is_none() || host.is_dead() {
                continue;
            }
            let id = host.id;
            let demographic = host.demographic;
            let mut killed = false;
            for (pid, effect) in host.statuses_mut().iter_mut() {
                if killed {
                    break;
                }
                let Some(pathogen) = pathogens.get(pid.index()) else { continue };
                let Some(next) = effect.progress(pathogen, demographic, now, hospital, rng.inner())
                else {
                    continue;
                };
                trace!("{id}: {pid} -> {next}");
                transitions += 1;
                killed = next.is_dead();
            }
            if !killed {
                continue;
            }
            for (pid, effect) in host.statuses_mut().iter_mut() {
                if let Some(next) = effect.end_with_host(hospital) {
                    trace!("{id}: {pid} -> {next} with its host");
                    transitions += 1;
                }
            }
            died.push(id);
        }

        for &id in &died {
            if let Err(e) = self.population.vacate(id) {
                warn!("{id}: could not remove dead host from the map: {e}");
            }
        }
        (transitions, died.len())
    }

    // ── Infection primitive ───────────────────────────────────────────────

    /// A living host with no status for `pathogen`.
    fn is_exposable(&self, host: HostId, pathogen: PathogenId) -> bool {
        self.population
            .host(host)
            .is_some_and(|h| h.current_place().is_some() && h.status(pathogen).is_none())
    }

    /// Resilience roll, then infection.  Returns `true` when a new status
    /// was created.
    pub(crate) fn expose(&mut self, host: HostId, pathogen: PathogenId) -> bool {
        let Some(h) = self.population.host(host) else { return false };
        if h.resilience.roll(self.rng.inner()) {
            trace!("{host} resisted {pathogen}");
            return false;
        }
        self.infect(host, pathogen)
    }

    /// Create an `Incubating` status unless one already exists.
    pub(crate) fn infect(&mut self, host: HostId, pathogen: PathogenId) -> bool {
        let now = self.clock.current_time;
        let Some(p) = self.pathogens.get(pathogen.index()) else { return false };
        let Some(h) = self.population.hosts.get_mut(host) else { return false };
        if h.status(pathogen).is_some() || h.current_place().is_none() {
            return false;
        }
        let effect = PathogenEffect::infect(p, now, self.rng.inner());
        h.statuses_mut().insert(pathogen, effect);
        true
    }
}
