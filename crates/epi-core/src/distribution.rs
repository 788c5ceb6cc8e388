//! Gaussian duration sampling.

use rand::Rng;

use crate::{CoreError, CoreResult, Time};

/// A normal distribution over durations, used for incubation and infectious
/// periods.
///
/// Samples are drawn with the Box–Muller transform and clamped at zero, so a
/// wide `stddev` never yields a negative duration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDistribution {
    pub mean:   Time,
    pub stddev: Time,
}

impl TimeDistribution {
    /// Build a distribution, rejecting negative or non-finite parameters.
    pub fn new(mean: Time, stddev: Time) -> CoreResult<Self> {
        for (label, t) in [("mean", mean), ("stddev", stddev)] {
            if !t.amount.is_finite() || t.amount < 0.0 {
                return Err(CoreError::Config(format!(
                    "time distribution {label} must be finite and >= 0, got {t}"
                )));
            }
        }
        Ok(Self { mean, stddev })
    }

    /// A degenerate distribution that always yields `value`.
    pub fn fixed(value: Time) -> Self {
        Self { mean: value, stddev: Time::new(0.0, value.unit) }
    }

    /// Draw one duration in the unit of `mean`, clamped to `>= 0`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        let z = standard_normal(rng);
        let amount = self.mean.amount + z * self.stddev.value_in(self.mean.unit);
        Time::new(amount.max(0.0), self.mean.unit)
    }
}

/// One standard-normal variate via the Box–Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 ∈ (0, 1] keeps ln(u1) finite.
    let u1 = 1.0 - rng.r#gen::<f64>();
    let u2 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
