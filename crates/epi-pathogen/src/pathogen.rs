//! Static disease parameters.

use std::collections::BTreeMap;
use std::fmt;

use epi_core::{Demographic, Rate, Time, TimeDistribution};

use crate::{PathogenError, PathogenResult};

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathogenKind {
    Virus,
    Bacterium,
    Fungus,
    Parasite,
}

/// An observable symptom a host may express once infectious.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symptom {
    Fever,
    Cough,
    Fatigue,
    Nausea,
    Rash,
    ShortnessOfBreath,
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── ByDemographic ─────────────────────────────────────────────────────────────

/// One value per [`Demographic`], indexed by `Demographic::index()`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByDemographic<T> {
    values: [T; 3],
}

impl<T: Copy> ByDemographic<T> {
    /// `[child, adult, senior]`.
    pub const fn new(values: [T; 3]) -> Self {
        Self { values }
    }

    /// The same value for every demographic.
    pub const fn uniform(value: T) -> Self {
        Self { values: [value; 3] }
    }

    #[inline]
    pub fn get(&self, demographic: Demographic) -> T {
        self.values[demographic.index()]
    }

    pub fn set(&mut self, demographic: Demographic, value: T) {
        self.values[demographic.index()] = value;
    }

    /// Builder-style override for one demographic.
    pub fn with(mut self, demographic: Demographic, value: T) -> Self {
        self.set(demographic, value);
        self
    }
}

impl<T: Copy + Default> Default for ByDemographic<T> {
    fn default() -> Self {
        Self::uniform(T::default())
    }
}

// ── Pathogen ──────────────────────────────────────────────────────────────────

/// A disease: how it spreads, how long each stage lasts, and how it ends.
///
/// Built once through [`PathogenBuilder`], then owned by the model and
/// referenced everywhere else by `PathogenId`.  Fields are public for reading;
/// nothing in the engine mutates a pathogen after construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pathogen {
    pub name:                String,
    pub kind:                PathogenKind,
    /// Per-hour transmission probability.
    pub attack_rate:         Rate,
    /// Lifetime of a freshly deposited agent.
    pub agent_life:          Time,
    pub incubation:          TimeDistribution,
    pub infectious:          TimeDistribution,
    pub mortality_treated:   ByDemographic<Rate>,
    pub mortality_untreated: ByDemographic<Rate>,
    pub hospitalization:     ByDemographic<Rate>,
    pub symptom_expression:  BTreeMap<Symptom, ByDemographic<Rate>>,
}

impl Pathogen {
    pub fn builder(name: impl Into<String>, kind: PathogenKind) -> PathogenBuilder {
        PathogenBuilder::new(name, kind)
    }
}

// ── PathogenBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Pathogen`].
///
/// Rates are given as plain `f64` and validated in [`build`](Self::build),
/// so a misconfigured pathogen fails once at setup with every field named.
///
/// | Method                  | Default              |
/// |-------------------------|----------------------|
/// | `.attack_rate(r)`       | `0.0`                |
/// | `.agent_life(t)`        | 1 day                |
/// | `.incubation(d)`        | fixed 0              |
/// | `.infectious(d)`        | fixed 0              |
/// | mortality / hospital    | `0.0` everywhere     |
/// | `.symptom(s, r)`        | no symptoms          |
pub struct PathogenBuilder {
    name:                String,
    kind:                PathogenKind,
    attack_rate:         f64,
    agent_life:          Time,
    incubation:          TimeDistribution,
    infectious:          TimeDistribution,
    mortality_treated:   [f64; 3],
    mortality_untreated: [f64; 3],
    hospitalization:     [f64; 3],
    symptoms:            BTreeMap<Symptom, [f64; 3]>,
}

impl PathogenBuilder {
    pub fn new(name: impl Into<String>, kind: PathogenKind) -> Self {
        Self {
            name:                name.into(),
            kind,
            attack_rate:         0.0,
            agent_life:          Time::days(1.0),
            incubation:          TimeDistribution::fixed(Time::ZERO),
            infectious:          TimeDistribution::fixed(Time::ZERO),
            mortality_treated:   [0.0; 3],
            mortality_untreated: [0.0; 3],
            hospitalization:     [0.0; 3],
            symptoms:            BTreeMap::new(),
        }
    }

    pub fn attack_rate(mut self, rate: f64) -> Self {
        self.attack_rate = rate;
        self
    }

    pub fn agent_life(mut self, life: Time) -> Self {
        self.agent_life = life;
        self
    }

    pub fn incubation(mut self, dist: TimeDistribution) -> Self {
        self.incubation = dist;
        self
    }

    pub fn infectious(mut self, dist: TimeDistribution) -> Self {
        self.infectious = dist;
        self
    }

    /// Same treated mortality for every demographic.
    pub fn mortality_treated(mut self, rate: f64) -> Self {
        self.mortality_treated = [rate; 3];
        self
    }

    pub fn mortality_untreated(mut self, rate: f64) -> Self {
        self.mortality_untreated = [rate; 3];
        self
    }

    pub fn hospitalization(mut self, rate: f64) -> Self {
        self.hospitalization = [rate; 3];
        self
    }

    /// Override treated mortality for one demographic.
    pub fn mortality_treated_for(mut self, demographic: Demographic, rate: f64) -> Self {
        self.mortality_treated[demographic.index()] = rate;
        self
    }

    pub fn mortality_untreated_for(mut self, demographic: Demographic, rate: f64) -> Self {
        self.mortality_untreated[demographic.index()] = rate;
        self
    }

    pub fn hospitalization_for(mut self, demographic: Demographic, rate: f64) -> Self {
        self.hospitalization[demographic.index()] = rate;
        self
    }

    /// Express `symptom` with the same probability in every demographic.
    pub fn symptom(mut self, symptom: Symptom, rate: f64) -> Self {
        self.symptoms.insert(symptom, [rate; 3]);
        self
    }

    /// Express `symptom` with per-demographic probabilities `[child, adult, senior]`.
    pub fn symptom_by_demographic(mut self, symptom: Symptom, rates: [f64; 3]) -> Self {
        self.symptoms.insert(symptom, rates);
        self
    }

    /// # Errors
    /// [`PathogenError::Config`] naming the first invalid field.
    pub fn build(self) -> PathogenResult<Pathogen> {
        if !self.agent_life.is_positive() {
            return Err(PathogenError::Config(format!(
                "{}: agent_life must be > 0, got {}",
                self.name, self.agent_life
            )));
        }

        let name = self.name;
        let rate = |field: &str, v: f64| {
            Rate::new(v).map_err(|e| PathogenError::Config(format!("{name}: {field}: {e}")))
        };
        let by_demo = |field: &str, vs: [f64; 3]| -> PathogenResult<ByDemographic<Rate>> {
            Ok(ByDemographic::new([rate(field, vs[0])?, rate(field, vs[1])?, rate(field, vs[2])?]))
        };

        let attack_rate = rate("attack_rate", self.attack_rate)?;
        let mortality_treated = by_demo("mortality_treated", self.mortality_treated)?;
        let mortality_untreated = by_demo("mortality_untreated", self.mortality_untreated)?;
        let hospitalization = by_demo("hospitalization", self.hospitalization)?;
        let symptom_expression = self
            .symptoms
            .into_iter()
            .map(|(s, vs)| Ok((s, by_demo(&s.to_string(), vs)?)))
            .collect::<PathogenResult<BTreeMap<_, _>>>()?;

        log::debug!("built pathogen {name:?} (attack rate {attack_rate}/h)");

        Ok(Pathogen {
            name,
            kind: self.kind,
            attack_rate,
            agent_life: self.agent_life,
            incubation: self.incubation,
            infectious: self.infectious,
            mortality_treated,
            mortality_untreated,
            hospitalization,
            symptom_expression,
        })
    }
}
