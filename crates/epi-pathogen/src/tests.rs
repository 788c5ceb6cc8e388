//! Unit tests for epi-pathogen.

use epi_core::{Demographic, SimRng, Time, TimeDistribution};

use crate::{Compartment, Hospital, Pathogen, PathogenEffect, PathogenError, PathogenKind, Symptom};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two-day incubation, three-day infectious period, both exact.
fn flu() -> Pathogen {
    Pathogen::builder("flu", PathogenKind::Virus)
        .attack_rate(0.1)
        .incubation(TimeDistribution::fixed(Time::days(2.0)))
        .infectious(TimeDistribution::fixed(Time::days(3.0)))
        .build()
        .unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn per_demographic_overrides() {
        let p = Pathogen::builder("x", PathogenKind::Bacterium)
            .mortality_untreated(0.01)
            .mortality_untreated_for(Demographic::Senior, 0.2)
            .symptom_by_demographic(Symptom::Fever, [0.9, 0.5, 0.7])
            .build()
            .unwrap();
        assert_eq!(p.mortality_untreated.get(Demographic::Adult).value(), 0.01);
        assert_eq!(p.mortality_untreated.get(Demographic::Senior).value(), 0.2);
        assert_eq!(p.symptom_expression[&Symptom::Fever].get(Demographic::Child).value(), 0.9);
    }

    #[test]
    fn out_of_range_rate_rejected() {
        let err = Pathogen::builder("bad", PathogenKind::Virus)
            .attack_rate(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, PathogenError::Config(msg) if msg.contains("attack_rate")));
    }

    #[test]
    fn zero_agent_life_rejected() {
        let res = Pathogen::builder("bad", PathogenKind::Virus)
            .agent_life(Time::ZERO)
            .build();
        assert!(res.is_err());
    }
}

// ── PathogenEffect ────────────────────────────────────────────────────────────

#[cfg(test)]
mod effect {
    use super::*;

    #[test]
    fn full_progression_is_monotonic() {
        let p = flu();
        let mut rng = SimRng::new(1);
        let mut hospital = Hospital::unlimited();
        let mut e = PathogenEffect::infect(&p, Time::days(0.0), rng.inner());
        assert_eq!(e.compartment(), Compartment::Incubating);

        let mut seen = vec![e.compartment()];
        for day in 1..10 {
            e.progress(&p, Demographic::Adult, Time::days(day as f64), &mut hospital, rng.inner());
            seen.push(e.compartment());
        }
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
        // Infectious from day 2, resolved at day 5.
        assert_eq!(seen[2], Compartment::Infectious);
        assert_eq!(seen[4], Compartment::Infectious);
        assert!(seen[5].is_terminal());
    }

    #[test]
    fn one_transition_per_call() {
        let p = Pathogen::builder("instant", PathogenKind::Virus).build().unwrap();
        let mut rng = SimRng::new(2);
        let mut hospital = Hospital::unlimited();
        let mut e = PathogenEffect::infect(&p, Time::hours(0.0), rng.inner());
        let now = Time::hours(1.0);
        assert_eq!(
            e.progress(&p, Demographic::Adult, now, &mut hospital, rng.inner()),
            Some(Compartment::Infectious)
        );
        assert!(e.progress(&p, Demographic::Adult, now, &mut hospital, rng.inner()).unwrap().is_terminal());
        assert_eq!(e.progress(&p, Demographic::Adult, now, &mut hospital, rng.inner()), None);
    }

    #[test]
    fn certain_death_untreated() {
        let p = Pathogen::builder("lethal", PathogenKind::Virus)
            .mortality_untreated(1.0)
            .build()
            .unwrap();
        let mut rng = SimRng::new(3);
        let mut hospital = Hospital::unlimited();
        let mut e = PathogenEffect::seeded_infectious(&p, Demographic::Senior, Time::ZERO, &mut hospital, rng.inner());
        e.progress(&p, Demographic::Senior, Time::hours(1.0), &mut hospital, rng.inner());
        assert_eq!(e.compartment(), Compartment::DeadUntreated);
    }

    #[test]
    fn hospital_capacity_gates_treatment() {
        let p = Pathogen::builder("severe", PathogenKind::Virus)
            .hospitalization(1.0)
            .mortality_treated(1.0)
            .infectious(TimeDistribution::fixed(Time::days(1.0)))
            .build()
            .unwrap();
        let mut rng = SimRng::new(4);
        let mut hospital = Hospital::new(Some(1));

        let mut first = PathogenEffect::seeded_infectious(&p, Demographic::Adult, Time::ZERO, &mut hospital, rng.inner());
        let second = PathogenEffect::seeded_infectious(&p, Demographic::Adult, Time::ZERO, &mut hospital, rng.inner());
        assert!(first.treated());
        assert!(!second.treated());
        assert_eq!(hospital.occupied(), 1);

        first.progress(&p, Demographic::Adult, Time::days(1.0), &mut hospital, rng.inner());
        assert_eq!(first.compartment(), Compartment::DeadTreated);
        assert_eq!(hospital.occupied(), 0);
    }

    #[test]
    fn ending_with_host_releases_bed_once() {
        let p = Pathogen::builder("severe", PathogenKind::Virus)
            .hospitalization(1.0)
            .infectious(TimeDistribution::fixed(Time::days(30.0)))
            .build()
            .unwrap();
        let mut rng = SimRng::new(5);
        let mut hospital = Hospital::new(Some(2));

        let mut treated = PathogenEffect::seeded_infectious(&p, Demographic::Adult, Time::ZERO, &mut hospital, rng.inner());
        let mut incubating = PathogenEffect::infect(&p, Time::ZERO, rng.inner());
        assert_eq!(hospital.available(), Some(1));

        assert_eq!(treated.end_with_host(&mut hospital), Some(Compartment::DeadTreated));
        assert_eq!(incubating.end_with_host(&mut hospital), Some(Compartment::DeadUntreated));
        assert_eq!(hospital.available(), Some(2));

        assert_eq!(treated.end_with_host(&mut hospital), None);
        assert_eq!(treated.progress(&p, Demographic::Adult, Time::days(60.0), &mut hospital, rng.inner()), None);
        assert_eq!(hospital.occupied(), 0);
    }

    #[test]
    fn bed_accounting() {
        let mut hospital = Hospital::new(Some(2));
        assert!(hospital.try_admit());
        assert!(hospital.try_admit());
        assert!(!hospital.try_admit());
        assert_eq!(hospital.available(), Some(0));
        hospital.discharge();
        assert_eq!(hospital.available(), Some(1));
        assert_eq!(Hospital::unlimited().available(), None);
    }

    #[test]
    fn certain_symptoms_are_expressed() {
        let p = Pathogen::builder("cold", PathogenKind::Virus)
            .symptom(Symptom::Cough, 1.0)
            .symptom(Symptom::Rash, 0.0)
            .build()
            .unwrap();
        let mut rng = SimRng::new(5);
        let mut hospital = Hospital::unlimited();
        let e = PathogenEffect::seeded_infectious(&p, Demographic::Child, Time::ZERO, &mut hospital, rng.inner());
        assert!(e.symptoms().contains(&Symptom::Cough));
        assert!(!e.symptoms().contains(&Symptom::Rash));
    }
}

// ── Counts ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod counts {
    use crate::{Compartment, CompartmentCounts};

    #[test]
    fn collect_and_total() {
        let counts: CompartmentCounts = [
            Compartment::Susceptible,
            Compartment::Susceptible,
            Compartment::Infectious,
            Compartment::DeadTreated,
            Compartment::DeadUntreated,
        ]
        .into_iter()
        .collect();
        assert_eq!(counts.susceptible, 2);
        assert_eq!(counts.dead(), 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn ordering_follows_progression() {
        assert!(Compartment::Susceptible < Compartment::Incubating);
        assert!(Compartment::Incubating < Compartment::Infectious);
        assert!(Compartment::Infectious < Compartment::Recovered);
        assert!(Compartment::Recovered.is_terminal());
        assert!(!Compartment::Infectious.is_terminal());
    }
}
