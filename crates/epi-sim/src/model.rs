//! The `CityModel` aggregate, its run loop, and its query surface.

use std::collections::BTreeSet;

use epi_behavior::{BehaviorMap, ChoiceModel};
use epi_core::{HostId, PathogenId, PlaceId, SimClock, SimConfig, SimRng, Tick, Time};
use epi_pathogen::{Compartment, CompartmentCounts, Hospital, Pathogen};
use epi_population::{AgentRegistry, Host, HostStore, PlaceRegistry, Population};
use epi_schedule::{Phase, Schedule};

use crate::{ModelView, SimObserver, SimResult, StepStats};

/// The whole simulated city.
///
/// `CityModel<C>` owns every host, place, agent and pathogen, and drives the
/// six-pass update described in the crate docs.  `update` is the only
/// mutator used while running; the scenario commands in
/// [`scenario`](crate::scenario) are for setup and debugging.
///
/// Create via [`CityModelBuilder`][crate::CityModelBuilder].
pub struct CityModel<C: ChoiceModel = BehaviorMap> {
    /// Run configuration (time step, step count, seed, …).
    pub config: SimConfig,

    /// The movement policy.  Called once per living host per update.
    pub choice: C,

    pub(crate) clock:         SimClock,
    pub(crate) current_phase: Phase,
    pub(crate) schedule:      Schedule,
    pub(crate) pathogens:     Vec<Pathogen>,
    pub(crate) population:    Population,
    /// Model-level RNG for the sequential transmission and progression passes.
    pub(crate) rng:           SimRng,
    pub(crate) hospital:      Hospital,
}

impl<C: ChoiceModel> CityModel<C> {
    // ── Running ───────────────────────────────────────────────────────────

    /// One update of the configured `time_step`.
    pub fn step(&mut self) -> SimResult<StepStats> {
        self.update(self.config.time_step)
    }

    /// Step until `config.end_tick()`, then call `on_sim_end`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_tick`).
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_step(observer)?;
        }
        Ok(())
    }

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_step_start(self.clock.current_tick.next());
        self.step()?;

        let tick = self.clock.current_tick;
        let view = self.view();
        observer.on_step_end(tick, &view);
        if tick.0.is_multiple_of(self.config.output_interval_steps) {
            observer.on_snapshot(tick, &view);
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn hosts(&self) -> &HostStore {
        &self.population.hosts
    }

    pub fn host(&self, id: HostId) -> Option<&Host> {
        self.population.host(id)
    }

    /// The environments hosts and agents occupy.
    pub fn places(&self) -> &PlaceRegistry {
        self.population.places()
    }

    pub fn agents(&self) -> &AgentRegistry {
        self.population.agents()
    }

    pub fn pathogens(&self) -> &[Pathogen] {
        &self.pathogens
    }

    pub fn pathogen(&self, id: PathogenId) -> Option<&Pathogen> {
        self.pathogens.get(id.index())
    }

    /// Look up a pathogen id by name.
    pub fn pathogen_id(&self, name: &str) -> Option<PathogenId> {
        self.pathogens
            .iter()
            .position(|p| p.name == name)
            .map(|i| PathogenId(i as u16))
    }

    #[inline]
    pub fn current_time(&self) -> Time {
        self.clock.current_time
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn hospital(&self) -> &Hospital {
        &self.hospital
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// `host`'s compartment for `pathogen`; `None` for an unknown host.
    pub fn compartment(&self, host: HostId, pathogen: PathogenId) -> Option<Compartment> {
        self.population.host(host).map(|h| h.compartment(pathogen))
    }

    pub fn compartment_counts(&self, pathogen: PathogenId) -> CompartmentCounts {
        crate::view::compartment_counts(&self.population, pathogen)
    }

    /// Occupants per unit size of `place`.
    pub fn density(&self, place: PlaceId) -> Option<f64> {
        self.population.density(place)
    }

    pub fn occupants(&self, place: PlaceId) -> &BTreeSet<HostId> {
        self.population.occupants(place)
    }

    /// A borrowed snapshot for observers and writers.
    pub fn view(&self) -> ModelView<'_> {
        ModelView {
            tick:       self.clock.current_tick,
            time:       self.clock.current_time,
            phase:      self.current_phase,
            population: &self.population,
            pathogens:  &self.pathogens,
            hospital:   &self.hospital,
        }
    }
}
