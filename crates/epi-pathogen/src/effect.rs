//! Per-(host, pathogen) infection state machine.

use std::collections::BTreeSet;

use rand::Rng;

use epi_core::{Demographic, Time};

use crate::{Compartment, Hospital, Pathogen, Symptom};

/// The status record a host holds for one pathogen.
///
/// Created once, at infection, and never recreated.  The compartment only
/// moves forward; [`progress`](Self::progress) makes at most one transition
/// per call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathogenEffect {
    compartment:      Compartment,
    onset_time:       Time,
    incubation:       Time,
    /// Sampled when incubation ends.
    infectious:       Option<Time>,
    infectious_since: Option<Time>,
    treated:          bool,
    symptoms:         BTreeSet<Symptom>,
}

impl PathogenEffect {
    /// A fresh infection at `now`: `Incubating`, with the incubation period
    /// sampled from the pathogen.
    pub fn infect<R: Rng + ?Sized>(pathogen: &Pathogen, now: Time, rng: &mut R) -> Self {
        Self {
            compartment:      Compartment::Incubating,
            onset_time:       now,
            incubation:       pathogen.incubation.sample(rng),
            infectious:       None,
            infectious_since: None,
            treated:          false,
            symptoms:         BTreeSet::new(),
        }
    }

    /// An index case already shedding at `now`, skipping incubation.
    pub fn seeded_infectious<R: Rng + ?Sized>(
        pathogen:    &Pathogen,
        demographic: Demographic,
        now:         Time,
        hospital:    &mut Hospital,
        rng:         &mut R,
    ) -> Self {
        let mut effect = Self {
            compartment:      Compartment::Incubating,
            onset_time:       now,
            incubation:       Time::new(0.0, now.unit),
            infectious:       None,
            infectious_since: None,
            treated:          false,
            symptoms:         BTreeSet::new(),
        };
        effect.become_infectious(pathogen, demographic, now, hospital, rng);
        effect
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn compartment(&self) -> Compartment {
        self.compartment
    }

    pub fn onset_time(&self) -> Time {
        self.onset_time
    }

    pub fn incubation(&self) -> Time {
        self.incubation
    }

    pub fn infectious_duration(&self) -> Option<Time> {
        self.infectious
    }

    pub fn infectious_since(&self) -> Option<Time> {
        self.infectious_since
    }

    /// `true` once the host was given a hospital bed; the bed itself is
    /// released when the status resolves.
    pub fn treated(&self) -> bool {
        self.treated
    }

    pub fn symptoms(&self) -> &BTreeSet<Symptom> {
        &self.symptoms
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// Advance at most one compartment given the current time.
    ///
    /// Returns the new compartment when a transition happened.
    pub fn progress<R: Rng + ?Sized>(
        &mut self,
        pathogen:    &Pathogen,
        demographic: Demographic,
        now:         Time,
        hospital:    &mut Hospital,
        rng:         &mut R,
    ) -> Option<Compartment> {
        match self.compartment {
            Compartment::Incubating if now - self.onset_time >= self.incubation => {
                self.become_infectious(pathogen, demographic, now, hospital, rng);
                Some(self.compartment)
            }
            Compartment::Infectious => {
                let since = self.infectious_since?;
                let duration = self.infectious?;
                if now - since < duration {
                    return None;
                }
                self.resolve(pathogen, demographic, hospital, rng);
                Some(self.compartment)
            }
            _ => None,
        }
    }

    /// The host died of another pathogen.  A status that has not resolved
    /// ends in the dead compartment matching its treatment and gives back
    /// its bed; a resolved one is left alone.
    ///
    /// Returns the new compartment when the status changed.
    pub fn end_with_host(&mut self, hospital: &mut Hospital) -> Option<Compartment> {
        if self.compartment.is_terminal() {
            return None;
        }
        self.compartment = if self.treated {
            hospital.discharge();
            Compartment::DeadTreated
        } else {
            Compartment::DeadUntreated
        };
        Some(self.compartment)
    }

    fn become_infectious<R: Rng + ?Sized>(
        &mut self,
        pathogen:    &Pathogen,
        demographic: Demographic,
        now:         Time,
        hospital:    &mut Hospital,
        rng:         &mut R,
    ) {
        self.compartment = Compartment::Infectious;
        self.infectious_since = Some(now);
        self.infectious = Some(pathogen.infectious.sample(rng));

        for (&symptom, rates) in &pathogen.symptom_expression {
            if rates.get(demographic).roll(rng) {
                self.symptoms.insert(symptom);
            }
        }

        if pathogen.hospitalization.get(demographic).roll(rng) {
            self.treated = hospital.try_admit();
        }
    }

    /// One uniform draw over {die, recover}, with the mortality rate chosen
    /// by whether the host is in hospital.
    fn resolve<R: Rng + ?Sized>(
        &mut self,
        pathogen:    &Pathogen,
        demographic: Demographic,
        hospital:    &mut Hospital,
        rng:         &mut R,
    ) {
        let draw = rng.r#gen::<f64>();
        self.compartment = if self.treated {
            hospital.discharge();
            if draw < pathogen.mortality_treated.get(demographic).value() {
                Compartment::DeadTreated
            } else {
                Compartment::Recovered
            }
        } else if draw < pathogen.mortality_untreated.get(demographic).value() {
            Compartment::DeadUntreated
        } else {
            Compartment::Recovered
        };
    }
}
