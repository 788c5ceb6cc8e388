//! Integration tests for epi-sim.

use epi_behavior::{BehaviorMap, ChoiceModel, StayPut};
use epi_core::{
    Coordinate, Demographic, HostId, LandUse, PathogenId, PlaceCategory, PlaceId, Rate, SimConfig,
    Tick, Time, TimeDistribution,
};
use epi_pathogen::{Compartment, Pathogen, PathogenKind};
use epi_population::{AgentVessel, NewHost, Population, PopulationBuilder};
use epi_schedule::{Phase, Schedule};

use crate::{CityModel, CityModelBuilder, ModelView, NoopObserver, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_steps: u64) -> SimConfig {
    SimConfig {
        time_step:             Time::hours(1.0),
        total_steps,
        seed:                  42,
        num_threads:           Some(1),
        output_interval_steps: 1,
        hospital_beds:         None,
    }
}

/// Sleep 8 h, work 8 h, home 8 h.
fn day() -> Schedule {
    Schedule::from_phases([
        (Phase::Sleep, Time::hours(8.0)),
        (Phase::Work, Time::hours(8.0)),
        (Phase::Home, Time::hours(8.0)),
    ])
    .unwrap()
}

/// Instant incubation and infectious periods, certain transmission.
fn instant(mortality: f64) -> Pathogen {
    Pathogen::builder("instant", PathogenKind::Virus)
        .attack_rate(1.0)
        .incubation(TimeDistribution::fixed(Time::hours(0.0)))
        .infectious(TimeDistribution::fixed(Time::hours(0.0)))
        .mortality_untreated(mortality)
        .build()
        .unwrap()
}

/// Two-day incubation, four-day infectious period, modest spread.
fn flu() -> Pathogen {
    Pathogen::builder("flu", PathogenKind::Virus)
        .attack_rate(0.05)
        .agent_life(Time::hours(12.0))
        .incubation(TimeDistribution::new(Time::days(2.0), Time::hours(12.0)).unwrap())
        .infectious(TimeDistribution::new(Time::days(4.0), Time::days(1.0)).unwrap())
        .mortality_untreated(0.05)
        .hospitalization(0.2)
        .build()
        .unwrap()
}

/// One dwelling of size 100 with `n` adults.
fn one_room(n: usize) -> Population {
    PopulationBuilder::new(42)
        .place("room", Coordinate::ORIGIN, LandUse::Dwelling, 100.0)
        .hosts((0..n).map(|i| NewHost::new(format!("h{i}"), Demographic::Adult, PlaceId(0))))
        .build()
        .unwrap()
}

/// Four houses, an office and a park; twelve adults, half of them working.
fn town() -> Population {
    let mut b = PopulationBuilder::new(42)
        .place("house-0", Coordinate::planar(0.0, 0.0), LandUse::Dwelling, 6.0)
        .place("house-1", Coordinate::planar(50.0, 0.0), LandUse::Dwelling, 6.0)
        .place("house-2", Coordinate::planar(0.0, 50.0), LandUse::Dwelling, 6.0)
        .place("house-3", Coordinate::planar(50.0, 50.0), LandUse::Dwelling, 6.0)
        .place("office", Coordinate::planar(400.0, 0.0), LandUse::Office, 20.0)
        .place("park", Coordinate::planar(0.0, 300.0), LandUse::Park, 50.0);
    for i in 0..12u32 {
        let mut host = NewHost::new(format!("h{i}"), Demographic::Adult, PlaceId(i % 4));
        if i % 2 == 0 {
            host = host.secondary(PlaceId(4));
        }
        b = b.host(host);
    }
    b.build().unwrap()
}

fn town_behavior() -> BehaviorMap {
    let mut map = BehaviorMap::new();
    map.set_map(Demographic::Adult, PlaceCategory::Tertiary, LandUse::Park, 1_000.0)
        .unwrap();
    map.set_anomaly_rate(Phase::Home, Rate::new(0.5).unwrap());
    map.set_recovery_rate(Phase::Home, Rate::new(0.5).unwrap());
    map
}

fn town_model(seed: u64) -> CityModel {
    let mut config = test_config(96);
    config.seed = seed;
    CityModelBuilder::new(config, day(), town_behavior())
        .pathogen(flu())
        .population(town())
        .build()
        .unwrap()
}

fn room_model<C: ChoiceModel>(n: usize, pathogen: Pathogen, choice: C) -> CityModel<C> {
    CityModelBuilder::new(test_config(10), day(), choice)
        .pathogen(pathogen)
        .population(one_room(n))
        .build()
        .unwrap()
}

const P0: PathogenId = PathogenId(0);

// ── CityModelBuilder ──────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn starts_at_time_zero_in_first_phase() {
        let model = town_model(1);
        assert_eq!(model.current_tick(), Tick::ZERO);
        assert!(model.current_time().is_zero());
        assert_eq!(model.current_phase(), Phase::Sleep);
        assert_eq!(model.hosts().len(), 12);
        assert_eq!(model.places().len(), 6);
        assert_eq!(model.pathogen_id("flu"), Some(P0));
        assert_eq!(model.compartment_counts(P0).susceptible, 12);
    }

    #[test]
    fn empty_schedule_rejected() {
        let err = CityModelBuilder::new(test_config(1), Schedule::default(), StayPut)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = test_config(1);
        config.time_step = Time::ZERO;
        assert!(CityModelBuilder::new(config, day(), StayPut).build().is_err());
    }

    #[test]
    fn default_population_is_empty() {
        let model = CityModelBuilder::new(test_config(1), day(), StayPut).build().unwrap();
        assert!(model.hosts().is_empty());
        assert!(model.places().is_empty());
    }
}

// ── update ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod update {
    use super::*;

    #[test]
    fn advances_clock_and_phase() {
        let mut model = room_model(1, instant(0.0), StayPut);
        for _ in 0..9 {
            model.step().unwrap();
        }
        assert_eq!(model.current_tick(), Tick(9));
        assert_eq!(model.current_time().in_hours(), 9.0);
        assert_eq!(model.current_phase(), Phase::Work);
    }

    #[test]
    fn non_positive_step_rejected_without_mutation() {
        let mut model = room_model(2, instant(0.0), StayPut);
        model.patient_zero(P0, 1).unwrap();
        assert!(model.update(Time::ZERO).is_err());
        assert!(model.update(Time::hours(-1.0)).is_err());
        assert_eq!(model.current_tick(), Tick::ZERO);
        assert!(model.agents().is_empty());
        assert_eq!(model.compartment_counts(P0).infectious, 1);
    }

    /// Transmission is only certain within two ticks when
    /// `hours_per_step * density >= 1`; a 1 h step in this room gives
    /// roughly 0.02 per tick, hence the week-long steps.
    #[test]
    fn two_host_room_resolves_in_two_ticks() {
        let mut model = room_model(2, instant(0.5), BehaviorMap::new());
        let seeded = model.patient_zero(P0, 1).unwrap();
        let other = if seeded[0] == HostId(0) { HostId(1) } else { HostId(0) };
        assert_eq!(model.compartment(other, P0), Some(Compartment::Susceptible));

        model.update(Time::weeks(1.0)).unwrap();
        model.update(Time::weeks(1.0)).unwrap();

        let c = model.compartment(other, P0).unwrap();
        assert!(c.is_terminal(), "expected a terminal compartment, got {c}");
        assert!(model.compartment(seeded[0], P0).unwrap().is_terminal());
    }

    #[test]
    fn workers_commute_with_the_schedule() {
        let mut model = town_model(3);
        model.choice = BehaviorMap::new();
        for _ in 0..9 {
            model.step().unwrap();
        }
        assert_eq!(model.current_phase(), Phase::Work);
        let at_office = model.occupants(PlaceId(4));
        assert_eq!(at_office.len(), 6);
        assert!(at_office.iter().all(|h| h.0 % 2 == 0));
        assert_eq!(model.density(PlaceId(4)), Some(6.0 / 20.0));

        for _ in 0..8 {
            model.step().unwrap();
        }
        assert_eq!(model.current_phase(), Phase::Home);
        assert!(model.occupants(PlaceId(4)).is_empty());
    }

    #[test]
    fn compartments_only_move_forward() {
        let mut model = town_model(5);
        model.patient_zero(P0, 2).unwrap();
        let mut last: Vec<Compartment> =
            model.hosts().iter().map(|h| h.compartment(P0)).collect();
        for _ in 0..24 * 14 {
            model.step().unwrap();
            for (host, prev) in model.hosts().iter().zip(last.iter_mut()) {
                let now = host.compartment(P0);
                assert!(now >= *prev, "{}: {prev} -> {now}", host.id);
                if prev.is_terminal() {
                    assert_eq!(now, *prev);
                }
                *prev = now;
            }
        }
    }

    #[test]
    fn agents_are_live_and_linked() {
        let mut model = town_model(7);
        model.patient_zero(P0, 3).unwrap();
        for _ in 0..72 {
            model.step().unwrap();
            for agent in model.agents().iter() {
                assert!(agent.is_alive());
                match agent.vessel {
                    AgentVessel::Host(h) => {
                        assert!(model.host(h).unwrap().carried_agents().contains(&agent.id));
                    }
                    AgentVessel::Environment(p) => {
                        assert!(model.places().get(p).unwrap().agents().contains(&agent.id));
                    }
                }
            }
            for host in model.hosts() {
                for id in host.carried_agents() {
                    assert!(model.agents().get(*id).is_some());
                }
            }
        }
    }

    #[test]
    fn dead_hosts_leave_the_map() {
        let mut model = room_model(3, instant(1.0), StayPut);
        model.patient_zero(P0, 1).unwrap();
        model.update(Time::weeks(1.0)).unwrap();
        model.update(Time::weeks(1.0)).unwrap();
        let counts = model.compartment_counts(P0);
        assert_eq!(counts.dead_untreated, 3);
        assert!(model.occupants(PlaceId(0)).is_empty());
        assert!(model.hosts().iter().all(|h| h.current_place().is_none()));
    }

    #[test]
    fn same_seed_same_epidemic() {
        let run = |seed| {
            let mut model = town_model(seed);
            model.patient_zero(P0, 2).unwrap();
            model.run(&mut NoopObserver).unwrap();
            let places: Vec<_> = model.hosts().iter().map(|h| h.current_place()).collect();
            let compartments: Vec<_> = model.hosts().iter().map(|h| h.compartment(P0)).collect();
            (places, compartments, model.agents().minted())
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn hospital_beds_bound_treatment() {
        let pathogen = Pathogen::builder("severe", PathogenKind::Bacterium)
            .attack_rate(0.0)
            .infectious(TimeDistribution::fixed(Time::days(3.0)))
            .hospitalization(1.0)
            .build()
            .unwrap();
        let mut config = test_config(10);
        config.hospital_beds = Some(1);
        let mut model = CityModelBuilder::new(config, day(), StayPut)
            .pathogen(pathogen)
            .population(one_room(3))
            .build()
            .unwrap();
        let seeded = model.patient_zero(P0, 3).unwrap();
        let treated = seeded
            .iter()
            .filter(|&&h| model.host(h).unwrap().status(P0).unwrap().treated())
            .count();
        assert_eq!(treated, 1);
        assert_eq!(model.hospital().occupied(), 1);

        model.update(Time::days(4.0)).unwrap();
        assert_eq!(model.hospital().occupied(), 0);
        assert_eq!(model.compartment_counts(P0).recovered, 3);
    }

    /// Host 0 is in hospital with `slow` when `killer` takes it.
    fn killer_and_slow() -> CityModel<StayPut> {
        let killer = Pathogen::builder("killer", PathogenKind::Virus)
            .attack_rate(0.0)
            .incubation(TimeDistribution::fixed(Time::hours(0.0)))
            .infectious(TimeDistribution::fixed(Time::hours(0.0)))
            .mortality_untreated(1.0)
            .build()
            .unwrap();
        let slow = Pathogen::builder("slow", PathogenKind::Bacterium)
            .attack_rate(0.0)
            .incubation(TimeDistribution::fixed(Time::hours(2.0)))
            .infectious(TimeDistribution::fixed(Time::days(30.0)))
            .hospitalization(1.0)
            .build()
            .unwrap();
        let mut config = test_config(10);
        config.hospital_beds = Some(1);
        CityModelBuilder::new(config, day(), StayPut)
            .pathogens([killer, slow])
            .population(one_room(2))
            .build()
            .unwrap()
    }

    #[test]
    fn death_ends_other_infections_and_frees_the_bed() {
        let (killer, slow) = (PathogenId(0), PathogenId(1));
        let mut model = killer_and_slow();

        model.infect_host(HostId(0), slow).unwrap();
        model.update(Time::hours(2.0)).unwrap();
        assert!(model.host(HostId(0)).unwrap().status(slow).unwrap().treated());
        assert_eq!(model.hospital().occupied(), 1);

        model.infect_host(HostId(0), killer).unwrap();
        model.update(Time::hours(1.0)).unwrap();
        let stats = model.update(Time::hours(1.0)).unwrap();
        assert_eq!(stats.deaths, 1);
        assert_eq!(stats.transitions, 2);

        let h0 = model.host(HostId(0)).unwrap();
        assert_eq!(h0.current_place(), None);
        assert_eq!(h0.compartment(killer), Compartment::DeadUntreated);
        assert_eq!(h0.compartment(slow), Compartment::DeadTreated);
        assert_eq!(model.hospital().occupied(), 0);
        assert_eq!(model.compartment_counts(slow).infectious, 0);

        model.infect_host(HostId(1), slow).unwrap();
        model.update(Time::hours(2.0)).unwrap();
        assert!(model.host(HostId(1)).unwrap().status(slow).unwrap().treated());
        assert_eq!(model.hospital().occupied(), 1);
    }

    #[test]
    fn dead_hosts_stop_progressing() {
        let (killer, slow) = (PathogenId(0), PathogenId(1));
        let mut model = killer_and_slow();
        model.infect_host(HostId(0), killer).unwrap();
        model.infect_host(HostId(0), slow).unwrap();

        model.update(Time::hours(1.0)).unwrap();
        let stats = model.update(Time::hours(1.0)).unwrap();
        assert_eq!(stats.deaths, 1);
        assert_eq!(model.compartment(HostId(0), slow), Some(Compartment::DeadUntreated));

        for _ in 0..4 {
            let stats = model.update(Time::hours(1.0)).unwrap();
            assert_eq!(stats.transitions, 0);
            assert_eq!(stats.deaths, 0);
        }
        assert_eq!(model.hospital().occupied(), 0);
        assert_eq!(model.compartment_counts(slow).dead_untreated, 1);
    }
}

// ── Infection primitive ───────────────────────────────────────────────────────

#[cfg(test)]
mod infection {
    use super::*;

    #[test]
    fn infect_host_is_idempotent() {
        let mut model = room_model(1, flu(), StayPut);
        assert!(model.infect_host(HostId(0), P0).unwrap());
        let first = model.host(HostId(0)).unwrap().status(P0).cloned();
        assert!(!model.infect_host(HostId(0), P0).unwrap());
        assert_eq!(model.host(HostId(0)).unwrap().status(P0).cloned(), first);
        assert_eq!(model.compartment(HostId(0), P0), Some(Compartment::Incubating));
    }

    #[test]
    fn resilience_blocks_exposure_only() {
        let mut model = CityModelBuilder::new(test_config(1), day(), StayPut)
            .pathogen(flu())
            .build()
            .unwrap();
        let place = model.add_place("room", Coordinate::ORIGIN, LandUse::Dwelling, 10.0).unwrap();
        let host = model
            .add_host(NewHost::new("tough", Demographic::Senior, place).resilience(Rate::ALWAYS))
            .unwrap();
        assert!(!model.expose_host(host, P0).unwrap());
        assert_eq!(model.compartment(host, P0), Some(Compartment::Susceptible));
        assert!(model.infect_host(host, P0).unwrap());
    }

    #[test]
    fn unknown_ids_rejected() {
        let mut model = room_model(1, flu(), StayPut);
        assert!(matches!(model.infect_host(HostId(9), P0), Err(SimError::UnknownHost(_))));
        assert!(matches!(
            model.infect_host(HostId(0), PathogenId(3)),
            Err(SimError::UnknownPathogen(_))
        ));
        assert!(model.put_agent(AgentVessel::Environment(PlaceId(0)), PathogenId(3)).is_err());
    }

    #[test]
    fn put_agent_uses_pathogen_life() {
        let mut model = room_model(1, flu(), StayPut);
        let id = model.put_agent(AgentVessel::Environment(PlaceId(0)), P0).unwrap();
        assert_eq!(model.agents().get(id).unwrap().life, Time::hours(12.0));
        model.update(Time::hours(12.0)).unwrap();
        assert!(model.agents().get(id).is_none());
        assert!(model.places().get(PlaceId(0)).unwrap().agents().is_empty());
    }

    #[test]
    fn patient_zero_picks_distinct_susceptibles() {
        let mut model = town_model(9);
        let first = model.patient_zero(P0, 4).unwrap();
        assert_eq!(first.len(), 4);
        assert!(first.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(model.compartment_counts(P0).infectious, 4);

        let second = model.patient_zero(P0, 8).unwrap();
        assert!(second.iter().all(|h| !first.contains(h)));
        assert!(model.patient_zero(P0, 1).is_err());
    }
}

// ── Scenario commands ─────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario {
    use super::*;

    #[test]
    fn random_places_then_populate() {
        let mut model = CityModelBuilder::new(test_config(1), day(), BehaviorMap::new())
            .build()
            .unwrap();
        assert!(model.populate(Demographic::Adult, 5, LandUse::Dwelling, None).is_err());

        let houses = model.random_places(LandUse::Dwelling, 5, 1_000.0, 2.0..=8.0).unwrap();
        let offices = model.random_places(LandUse::Office, 2, 1_000.0, 50.0..=50.0).unwrap();
        assert_eq!(model.places().with_use(LandUse::Dwelling), houses.as_slice());
        for &p in &houses {
            let place = model.places().get(p).unwrap();
            assert!((2.0..=8.0).contains(&place.size));
            let c = place.coordinate();
            assert!((0.0..=1_000.0).contains(&c.x) && (0.0..=1_000.0).contains(&c.y));
        }

        let hosts = model
            .populate(Demographic::Adult, 20, LandUse::Dwelling, Some(LandUse::Office))
            .unwrap();
        assert_eq!(hosts.len(), 20);
        for &h in &hosts {
            let host = model.host(h).unwrap();
            assert!(houses.contains(&host.primary_place));
            assert!(offices.contains(&host.secondary_place.unwrap()));
        }
        assert!(model.random_places(LandUse::Park, 1, 10.0, 0.0..=1.0).is_err());
    }

    #[test]
    fn forced_moves() {
        let mut model = town_model(13);
        assert_eq!(model.all_to_secondary(), 12);
        assert_eq!(model.occupants(PlaceId(4)).len(), 6);
        assert_eq!(model.all_to_tertiary(), 12);
        assert_eq!(model.occupants(PlaceId(5)).len(), 12);
        assert_eq!(model.all_to_primary(), 12);
        for host in model.hosts() {
            assert_eq!(host.current_place(), Some(host.primary_place));
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[derive(Default)]
    struct Counting {
        starts:    Vec<Tick>,
        ends:      Vec<Tick>,
        snapshots: Vec<(Tick, u32)>,
        finished:  Option<Tick>,
    }

    impl SimObserver for Counting {
        fn on_step_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_step_end(&mut self, tick: Tick, view: &ModelView<'_>) {
            assert_eq!(view.tick, tick);
            self.ends.push(tick);
        }
        fn on_snapshot(&mut self, tick: Tick, view: &ModelView<'_>) {
            self.snapshots.push((tick, view.compartment_counts(P0).total()));
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    #[test]
    fn run_fires_hooks_in_order() {
        let mut config = test_config(6);
        config.output_interval_steps = 2;
        let mut model = CityModelBuilder::new(config, day(), StayPut)
            .pathogen(flu())
            .population(one_room(3))
            .build()
            .unwrap();
        let mut obs = Counting::default();
        model.run(&mut obs).unwrap();

        let ticks: Vec<Tick> = (1..=6).map(Tick).collect();
        assert_eq!(obs.starts, ticks);
        assert_eq!(obs.ends, ticks);
        assert_eq!(obs.snapshots, vec![(Tick(2), 3), (Tick(4), 3), (Tick(6), 3)]);
        assert_eq!(obs.finished, Some(Tick(6)));
    }

    #[test]
    fn run_steps_ignores_end_tick() {
        let mut model = room_model(1, flu(), StayPut);
        let mut obs = Counting::default();
        model.run_steps(15, &mut obs).unwrap();
        assert_eq!(model.current_tick(), Tick(15));
        assert_eq!(obs.ends.len(), 15);
        assert_eq!(obs.finished, None);
    }
}
