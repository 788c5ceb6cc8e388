//! Demographic- and category-keyed destination choice.
//!
//! # Resolution
//!
//! ```text
//! phase ──phase_categories──▶ nominal category
//!         (anomaly roll)      ─▶ Tertiary instead, until a recovery roll
//!
//! Primary   → host.primary_place
//! Secondary → host.secondary_place, else primary
//! Tertiary  → get_random_place(host, Tertiary)
//! ```
//!
//! `get_random_place` is rejection sampling: draw a candidate land use,
//! draw a place of that use, accept if within the candidate's
//! `max_distance` of the host's home.  After `max_attempts` rejections, or
//! when nothing is registered for the host's demographic, the host goes home.

use std::collections::BTreeMap;

use epi_core::{Demographic, HostRng, LandUse, PlaceCategory, PlaceId, Rate};
use epi_population::{Host, Itinerary, PlaceRegistry};
use epi_schedule::Phase;

use crate::{BehaviorError, BehaviorResult, ChoiceModel, MoveContext, Movement};

/// Default bound on rejection-sampling attempts per lookup.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1_000;

/// One eligible land use for a (demographic, category) pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub land_use:     LandUse,
    /// Maximum distance from the host's primary place.
    pub max_distance: f64,
}

/// Maps (demographic × category) to candidate land uses, and phases to
/// categories, anomaly rates and recovery rates.
#[derive(Clone, Debug)]
pub struct BehaviorMap {
    candidates:       BTreeMap<(Demographic, PlaceCategory), Vec<Candidate>>,
    phase_categories: BTreeMap<Phase, PlaceCategory>,
    anomaly_rates:    BTreeMap<Phase, Rate>,
    recovery_rates:   BTreeMap<Phase, Rate>,
    max_attempts:     u32,
}

impl Default for BehaviorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorMap {
    /// An empty map: every phase uses its nominal category, no anomalies.
    pub fn new() -> Self {
        Self {
            candidates:       BTreeMap::new(),
            phase_categories: Phase::ALL.iter().map(|&p| (p, p.nominal_category())).collect(),
            anomaly_rates:    BTreeMap::new(),
            recovery_rates:   BTreeMap::new(),
            max_attempts:     DEFAULT_MAX_ATTEMPTS,
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Register `land_use` as eligible for `(demographic, category)` within
    /// `max_distance` of home.  Repeated calls build a candidate set.
    pub fn set_map(
        &mut self,
        demographic:  Demographic,
        category:     PlaceCategory,
        land_use:     LandUse,
        max_distance: f64,
    ) -> BehaviorResult<&mut Self> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return Err(BehaviorError::Config(format!(
                "max_distance for {demographic}/{category}/{land_use} must be >= 0, got {max_distance}"
            )));
        }
        self.candidates
            .entry((demographic, category))
            .or_default()
            .push(Candidate { land_use, max_distance });
        Ok(self)
    }

    /// Override the category a phase sends hosts to.
    pub fn set_phase_category(&mut self, phase: Phase, category: PlaceCategory) -> &mut Self {
        self.phase_categories.insert(phase, category);
        self
    }

    /// Probability, per full phase, that a host wanders off to a tertiary place.
    pub fn set_anomaly_rate(&mut self, phase: Phase, rate: Rate) -> &mut Self {
        self.anomaly_rates.insert(phase, rate);
        self
    }

    /// Probability, per full phase, that a wandering host returns to plan.
    pub fn set_recovery_rate(&mut self, phase: Phase, rate: Rate) -> &mut Self {
        self.recovery_rates.insert(phase, rate);
        self
    }

    pub fn set_max_attempts(&mut self, attempts: u32) -> BehaviorResult<&mut Self> {
        if attempts == 0 {
            return Err(BehaviorError::Config("max_attempts must be >= 1".into()));
        }
        self.max_attempts = attempts;
        Ok(self)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn category_of(&self, phase: Phase) -> PlaceCategory {
        self.phase_categories
            .get(&phase)
            .copied()
            .unwrap_or_else(|| phase.nominal_category())
    }

    pub fn candidates(&self, demographic: Demographic, category: PlaceCategory) -> &[Candidate] {
        self.candidates
            .get(&(demographic, category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn anomaly_rate(&self, phase: Phase) -> Rate {
        self.anomaly_rates.get(&phase).copied().unwrap_or(Rate::NEVER)
    }

    fn recovery_rate(&self, phase: Phase) -> Rate {
        self.recovery_rates.get(&phase).copied().unwrap_or(Rate::NEVER)
    }

    /// A random place of `category` near `host`'s home; falls back to home.
    pub fn get_random_place(
        &self,
        host:     &Host,
        category: PlaceCategory,
        places:   &PlaceRegistry,
        rng:      &mut HostRng,
    ) -> PlaceId {
        let home = host.primary_place;
        let candidates = self.candidates(host.demographic, category);
        if candidates.is_empty() {
            log::trace!("{}: no {category} candidates for {}; staying home", host.id, host.demographic);
            return home;
        }
        let Some(origin) = places.get(home).map(|p| p.coordinate()) else {
            return home;
        };

        for _ in 0..self.max_attempts {
            let Some(candidate) = rng.choose(candidates) else { break };
            let Some(&pid) = rng.choose(places.with_use(candidate.land_use)) else {
                continue;
            };
            let Some(place) = places.get(pid) else { continue };
            if origin.within(place.coordinate(), candidate.max_distance) {
                return pid;
            }
        }

        log::trace!(
            "{}: no {category} place within range after {} attempts; staying home",
            host.id,
            self.max_attempts
        );
        home
    }
}

impl ChoiceModel for BehaviorMap {
    fn choose(&self, host: &Host, ctx: &MoveContext<'_>, rng: &mut HostRng) -> Movement {
        let phase = ctx.phase;
        let mut itinerary = host.itinerary;

        let phase_changed = itinerary.phase != Some(phase);
        if phase_changed {
            itinerary = Itinerary { phase: Some(phase), diverted: false };
        }

        let fraction = ctx.step_fraction();
        let was_diverted = itinerary.diverted;
        if !was_diverted {
            itinerary.diverted = self.anomaly_rate(phase).scaled(fraction).roll(rng.inner());
        } else if self.recovery_rate(phase).scaled(fraction).roll(rng.inner()) {
            itinerary.diverted = false;
        }

        if !phase_changed && itinerary.diverted == was_diverted {
            return Movement::Stay;
        }

        let category = if itinerary.diverted { PlaceCategory::Tertiary } else { self.category_of(phase) };
        let destination = self.destination(host, category, ctx.places, rng);
        Movement::Relocate { destination, itinerary }
    }

    fn destination(
        &self,
        host:     &Host,
        category: PlaceCategory,
        places:   &PlaceRegistry,
        rng:      &mut HostRng,
    ) -> PlaceId {
        match category {
            PlaceCategory::Primary   => host.primary_place,
            PlaceCategory::Secondary => host.secondary_place.unwrap_or(host.primary_place),
            PlaceCategory::Tertiary  => self.get_random_place(host, category, places, rng),
        }
    }
}
