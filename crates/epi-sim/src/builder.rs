//! Fluent builder for constructing a [`CityModel`].

use log::debug;

use epi_behavior::ChoiceModel;
use epi_core::{SimConfig, SimRng};
use epi_pathogen::{Hospital, Pathogen};
use epi_population::Population;
use epi_schedule::Schedule;

use crate::{CityModel, SimError, SimResult};

/// Fluent builder for [`CityModel<C>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: time step, step count, seed, hospital beds, …
/// - [`Schedule`]: must contain at least one phase
/// - `C: ChoiceModel`: usually a configured [`epi_behavior::BehaviorMap`]
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                               |
/// |--------------------|---------------------------------------|
/// | `.pathogen(p)`     | no pathogens                          |
/// | `.population(pop)` | empty `Population::new(config.seed)`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = CityModelBuilder::new(config, schedule, behavior)
///     .pathogen(flu)
///     .population(city)
///     .build()?;
/// model.patient_zero(PathogenId(0), 5)?;
/// model.run(&mut NoopObserver)?;
/// ```
pub struct CityModelBuilder<C: ChoiceModel> {
    config:     SimConfig,
    schedule:   Schedule,
    choice:     C,
    pathogens:  Vec<Pathogen>,
    population: Option<Population>,
}

impl<C: ChoiceModel> CityModelBuilder<C> {
    pub fn new(config: SimConfig, schedule: Schedule, choice: C) -> Self {
        Self {
            config,
            schedule,
            choice,
            pathogens:  Vec::new(),
            population: None,
        }
    }

    /// Register a pathogen.  Ids are assigned in registration order.
    pub fn pathogen(mut self, pathogen: Pathogen) -> Self {
        self.pathogens.push(pathogen);
        self
    }

    pub fn pathogens(mut self, pathogens: impl IntoIterator<Item = Pathogen>) -> Self {
        self.pathogens.extend(pathogens);
        self
    }

    /// Start from a pre-built population (see
    /// [`epi_population::PopulationBuilder`]).
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Validate inputs and return a model at time zero.
    pub fn build(self) -> SimResult<CityModel<C>> {
        self.config.validate()?;
        if self.schedule.is_empty() {
            return Err(SimError::Config("schedule has no phases".into()));
        }
        if self.pathogens.len() > u16::MAX as usize {
            return Err(SimError::Config(format!(
                "at most {} pathogens are supported, got {}",
                u16::MAX,
                self.pathogens.len()
            )));
        }

        #[cfg(feature = "parallel")]
        if let Some(n) = self.config.num_threads {
            if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
                debug!("rayon global pool already configured: {e}");
            }
        }

        let clock = self.config.make_clock();
        let current_phase = self.schedule.get_phase(clock.current_time)?;
        let population = self
            .population
            .unwrap_or_else(|| Population::new(self.config.seed));

        debug!(
            "city model: {} hosts, {} places, {} pathogens, schedule period {}",
            population.hosts.len(),
            population.places().len(),
            self.pathogens.len(),
            self.schedule.period()
        );

        Ok(CityModel {
            rng:       SimRng::new(self.config.seed),
            hospital:  Hospital::new(self.config.hospital_beds),
            config:    self.config,
            choice:    self.choice,
            clock,
            current_phase,
            schedule:  self.schedule,
            pathogens: self.pathogens,
            population,
        })
    }
}
