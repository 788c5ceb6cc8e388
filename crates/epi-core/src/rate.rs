//! Validated probabilities.

use rand::Rng;

use crate::{CoreError, CoreResult};

/// A probability in `[0, 1]`.
///
/// Construction rejects out-of-range and NaN values; use [`Rate::scaled`] to
/// derive per-step probabilities, which clamps instead of failing because a
/// per-hour rate times a long step can legitimately exceed one.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Rate(f64);

impl Rate {
    pub const NEVER: Rate  = Rate(0.0);
    pub const ALWAYS: Rate = Rate(1.0);

    /// # Errors
    /// [`CoreError::RateOutOfRange`] if `value` is not in `[0, 1]`.
    pub fn new(value: f64) -> CoreResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Rate(value))
        } else {
            Err(CoreError::RateOutOfRange(value))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `value × factor`, clamped into `[0, 1]`.
    #[inline]
    pub fn scaled(self, factor: f64) -> Rate {
        let v = self.0 * factor;
        if v.is_nan() { Rate::NEVER } else { Rate(v.clamp(0.0, 1.0)) }
    }

    /// `true` with probability `value`, from one uniform draw.
    #[inline]
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        rng.r#gen::<f64>() < self.0
    }
}

impl TryFrom<f64> for Rate {
    type Error = CoreError;

    fn try_from(value: f64) -> CoreResult<Self> {
        Rate::new(value)
    }
}

impl From<Rate> for f64 {
    fn from(rate: Rate) -> f64 {
        rate.0
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
