//! Unit tests for epi-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, HostId, PlaceId};

    #[test]
    fn index_roundtrip() {
        let id = HostId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(HostId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(HostId::INVALID.0, u32::MAX);
        assert_eq!(AgentId::INVALID.0, u64::MAX);
        assert_eq!(PlaceId::default(), PlaceId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(PlaceId(7).to_string(), "PlaceId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Coordinate;

    #[test]
    fn pythagorean_distance() {
        let a = Coordinate::planar(0.0, 0.0);
        let b = Coordinate::planar(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!(a.within(b, 5.0));
        assert!(!a.within(b, 4.99));
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, Time, TimeInterval, TimeUnit};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn convert_roundtrip_all_unit_pairs() {
        for &u1 in &TimeUnit::ALL {
            for &u2 in &TimeUnit::ALL {
                let t = Time::new(3.75, u1);
                let back = t.convert(u2).convert(u1);
                assert_eq!(back.unit, u1);
                assert!(close(back.amount, t.amount), "{u1} -> {u2}: {back}");
            }
        }
    }

    #[test]
    fn conversion_ratios() {
        assert!(close(Time::days(1.0).value_in(TimeUnit::Hour), 24.0));
        assert!(close(Time::weeks(1.0).value_in(TimeUnit::Day), 7.0));
        assert!(close(Time::new(1.0, TimeUnit::Month).value_in(TimeUnit::Week), 4.34524));
        assert!(close(Time::new(1.0, TimeUnit::Year).value_in(TimeUnit::Month), 12.0));
        assert!(close(Time::hours(1.0).value_in(TimeUnit::Ms), 3_600_000.0));
    }

    #[test]
    fn arithmetic_keeps_left_unit() {
        let t = Time::hours(2.0) + Time::minutes(30.0);
        assert_eq!(t.unit, TimeUnit::Hour);
        assert!(close(t.amount, 2.5));

        let d = Time::days(1.0) - Time::hours(36.0);
        assert_eq!(d.unit, TimeUnit::Day);
        assert!(close(d.amount, -0.5));
    }

    #[test]
    fn equality_across_units() {
        assert_eq!(Time::days(1.0), Time::hours(24.0));
        assert!(Time::minutes(59.0) < Time::hours(1.0));
    }

    #[test]
    fn divide_by_zero_fails() {
        let err = Time::hours(3.0).divide(Time::ZERO).unwrap_err();
        assert!(matches!(err, CoreError::DivideByZero(_)));
        assert!(matches!(
            Time::hours(3.0).modulo(Time::minutes(0.0)),
            Err(CoreError::DivideByZero(_))
        ));
    }

    #[test]
    fn modulo_wraps_into_period() {
        let m = Time::hours(30.0).modulo(Time::days(1.0)).unwrap();
        assert!(close(m.amount, 6.0));
        let neg = Time::hours(-2.0).modulo(Time::hours(24.0)).unwrap();
        assert!(close(neg.amount, 22.0));
    }

    #[test]
    fn ratio_is_dimensionless() {
        let r = Time::minutes(90.0).ratio(Time::hours(1.0)).unwrap();
        assert!(close(r, 1.5));
    }

    #[test]
    fn interval_is_half_open() {
        let iv = TimeInterval::new(Time::hours(6.0), Time::hours(22.0));
        assert!(iv.contains(Time::hours(6.0)));
        assert!(!iv.contains(Time::hours(22.0)));
        assert_eq!(iv.duration(), Time::hours(16.0));
    }

    #[test]
    fn unit_parse() {
        assert_eq!("Hours".parse::<TimeUnit>().unwrap(), TimeUnit::Hour);
        assert_eq!(" d ".parse::<TimeUnit>().unwrap(), TimeUnit::Day);
        assert!(matches!("fortnight".parse::<TimeUnit>(), Err(CoreError::UnitMismatch(_))));
    }
}

#[cfg(test)]
mod rate {
    use crate::{CoreError, Rate, SimRng};

    #[test]
    fn out_of_range_is_rejected() {
        assert!(matches!(Rate::new(1.01), Err(CoreError::RateOutOfRange(_))));
        assert!(matches!(Rate::new(-0.1), Err(CoreError::RateOutOfRange(_))));
        assert!(Rate::new(f64::NAN).is_err());
        assert!(Rate::new(0.0).is_ok());
        assert!(Rate::new(1.0).is_ok());
    }

    #[test]
    fn scaled_clamps() {
        let r = Rate::new(0.5).unwrap();
        assert_eq!(r.scaled(4.0), Rate::ALWAYS);
        assert_eq!(r.scaled(-1.0), Rate::NEVER);
        assert!((r.scaled(0.5).value() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn roll_frequency_matches_value() {
        let rate = Rate::new(0.3).unwrap();
        let mut rng = SimRng::new(12345);
        let n = 100_000;
        let hits = (0..n).filter(|_| rate.roll(rng.inner())).count();
        let freq = hits as f64 / n as f64;
        // 5 sigma for p = 0.3, n = 100k is about 0.0072.
        assert!((freq - 0.3).abs() < 0.0075, "frequency {freq}");
    }

    #[test]
    fn extremes_are_certain() {
        let mut rng = SimRng::new(1);
        assert!((0..1_000).all(|_| Rate::ALWAYS.roll(rng.inner())));
        assert!((0..1_000).all(|_| !Rate::NEVER.roll(rng.inner())));
    }
}

#[cfg(test)]
mod distribution {
    use crate::{SimRng, Time, TimeDistribution, TimeUnit};

    #[test]
    fn degenerate_distribution_is_exact() {
        let d = TimeDistribution::fixed(Time::days(3.0));
        let mut rng = SimRng::new(9);
        for _ in 0..100 {
            assert_eq!(d.sample(rng.inner()), Time::days(3.0));
        }
    }

    #[test]
    fn samples_are_never_negative() {
        let d = TimeDistribution::new(Time::hours(1.0), Time::hours(10.0)).unwrap();
        let mut rng = SimRng::new(77);
        for _ in 0..10_000 {
            let t = d.sample(rng.inner());
            assert_eq!(t.unit, TimeUnit::Hour);
            assert!(t.amount >= 0.0);
        }
    }

    #[test]
    fn sample_mean_is_close() {
        let d = TimeDistribution::new(Time::days(5.0), Time::hours(24.0)).unwrap();
        let mut rng = SimRng::new(4);
        let n = 20_000;
        let mean = (0..n).map(|_| d.sample(rng.inner()).amount).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.05, "mean {mean}");
    }

    #[test]
    fn negative_parameters_rejected() {
        assert!(TimeDistribution::new(Time::hours(-1.0), Time::ZERO).is_err());
        assert!(TimeDistribution::new(Time::hours(1.0), Time::hours(-1.0)).is_err());
    }
}

#[cfg(test)]
mod clock {
    use crate::{SimClock, SimConfig, Tick, Time, TimeUnit};

    #[test]
    fn advance_moves_both_axes() {
        let mut clock = SimClock::new(TimeUnit::Hour);
        clock.advance(Time::hours(1.0));
        clock.advance(Time::minutes(30.0));
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.current_time, Time::minutes(90.0));
        assert_eq!(clock.elapsed_dhm(), (0, 1, 30));
    }

    #[test]
    fn config_validation() {
        let mut cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.end_tick(), Tick(cfg.total_steps));
        cfg.time_step = Time::ZERO;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::{HostId, HostRng, SimRng};

    #[test]
    fn host_rng_is_deterministic() {
        let mut a = HostRng::new(42, HostId(3));
        let mut b = HostRng::new(42, HostId(3));
        for _ in 0..16 {
            assert_eq!(a.inner().r#gen::<u64>(), b.inner().r#gen::<u64>());
        }
    }

    #[test]
    fn hosts_get_independent_streams() {
        let mut a = HostRng::new(42, HostId(0));
        let mut b = HostRng::new(42, HostId(1));
        let xs: Vec<u64> = (0..4).map(|_| a.inner().r#gen()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.inner().r#gen()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn choose_handles_empty_slices() {
        let mut rng = HostRng::new(1, HostId(0));
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[7u8]), Some(&7));
    }

    #[test]
    fn sim_rng_shuffle_is_reproducible() {
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        let mut xs: Vec<u32> = (0..20).collect();
        let mut ys = xs.clone();
        a.shuffle(&mut xs);
        b.shuffle(&mut ys);
        assert_eq!(xs, ys);
        assert_eq!(a.gen_range(0..1_000u32), b.gen_range(0..1_000u32));
    }
}

#[cfg(test)]
mod demography {
    use crate::{Demographic, LandUse};

    #[test]
    fn land_use_parse_roundtrip() {
        for u in LandUse::ALL {
            assert_eq!(u.as_str().parse::<LandUse>().unwrap(), u);
        }
        assert!("castle".parse::<LandUse>().is_err());
    }

    #[test]
    fn demographic_indices_are_dense() {
        let idx: Vec<usize> = Demographic::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
