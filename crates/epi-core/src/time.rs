//! Unit-aware simulation time.
//!
//! # Design
//!
//! A [`Time`] is a scalar `amount` tagged with a [`TimeUnit`].  Arithmetic
//! between two times reconciles units first: the right-hand operand is
//! converted into the left operand's unit, then the operation is applied, so
//! the result always carries the left operand's unit.
//!
//! Conversions go through milliseconds as the common base using fixed
//! ratios (60 s/min, 60 min/h, 24 h/day, 7 day/week, 4.34524 week/month,
//! 12 month/year).  Calendar months are therefore an average, which is what
//! a daily-cycle simulator wants.
//!
//! Negative amounts are legal as intermediates ("two hours before now");
//! anything used as a scheduling duration is validated to be `> 0` by its
//! consumer.
//!
//! [`Tick`] is the integer step counter the model advances alongside the
//! continuous clock; output rows and observers are keyed by it.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::{CoreError, CoreResult};

const MS_PER_SEC:      f64 = 1_000.0;
const SECS_PER_MIN:    f64 = 60.0;
const MINS_PER_HOUR:   f64 = 60.0;
const HOURS_PER_DAY:   f64 = 24.0;
const DAYS_PER_WEEK:   f64 = 7.0;
const WEEKS_PER_MONTH: f64 = 4.34524;
const MONTHS_PER_YEAR: f64 = 12.0;

// ── TimeUnit ──────────────────────────────────────────────────────────────────

/// The unit a [`Time`] amount is expressed in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Ms,
    Sec,
    Min,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        TimeUnit::Ms,
        TimeUnit::Sec,
        TimeUnit::Min,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// Length of one unit in milliseconds.
    pub fn millis(self) -> f64 {
        const SEC: f64   = MS_PER_SEC;
        const MIN: f64   = SEC * SECS_PER_MIN;
        const HOUR: f64  = MIN * MINS_PER_HOUR;
        const DAY: f64   = HOUR * HOURS_PER_DAY;
        const WEEK: f64  = DAY * DAYS_PER_WEEK;
        const MONTH: f64 = WEEK * WEEKS_PER_MONTH;
        const YEAR: f64  = MONTH * MONTHS_PER_YEAR;
        match self {
            TimeUnit::Ms    => 1.0,
            TimeUnit::Sec   => SEC,
            TimeUnit::Min   => MIN,
            TimeUnit::Hour  => HOUR,
            TimeUnit::Day   => DAY,
            TimeUnit::Week  => WEEK,
            TimeUnit::Month => MONTH,
            TimeUnit::Year  => YEAR,
        }
    }

    /// Lowercase label, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Ms    => "ms",
            TimeUnit::Sec   => "sec",
            TimeUnit::Min   => "min",
            TimeUnit::Hour  => "hour",
            TimeUnit::Day   => "day",
            TimeUnit::Week  => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year  => "year",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ms" | "millis" | "millisecond" | "milliseconds" => Ok(TimeUnit::Ms),
            "s" | "sec" | "secs" | "second" | "seconds"      => Ok(TimeUnit::Sec),
            "min" | "mins" | "minute" | "minutes"            => Ok(TimeUnit::Min),
            "h" | "hour" | "hours"                           => Ok(TimeUnit::Hour),
            "d" | "day" | "days"                             => Ok(TimeUnit::Day),
            "week" | "weeks"                                 => Ok(TimeUnit::Week),
            "month" | "months"                               => Ok(TimeUnit::Month),
            "year" | "years"                                 => Ok(TimeUnit::Year),
            other => Err(CoreError::UnitMismatch(other.to_owned())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Time ──────────────────────────────────────────────────────────────────────

/// A scalar amount of simulated time in a specific unit.
///
/// Equality and ordering compare the underlying duration, so
/// `Time::days(1.0) == Time::hours(24.0)`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub amount: f64,
    pub unit:   TimeUnit,
}

impl Time {
    pub const ZERO: Time = Time { amount: 0.0, unit: TimeUnit::Ms };

    #[inline]
    pub const fn new(amount: f64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    pub const fn millis(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Ms)
    }

    pub const fn seconds(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Sec)
    }

    pub const fn minutes(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Min)
    }

    pub const fn hours(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Hour)
    }

    pub const fn days(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Day)
    }

    pub const fn weeks(amount: f64) -> Self {
        Self::new(amount, TimeUnit::Week)
    }

    // ── Conversion ────────────────────────────────────────────────────────

    /// The duration in milliseconds (the common conversion base).
    #[inline]
    pub fn to_millis(self) -> f64 {
        self.amount * self.unit.millis()
    }

    /// The amount this time represents when expressed in `unit`.
    #[inline]
    pub fn value_in(self, unit: TimeUnit) -> f64 {
        if unit == self.unit {
            return self.amount;
        }
        self.to_millis() / unit.millis()
    }

    /// The same duration re-expressed in `unit`.
    #[inline]
    pub fn convert(self, unit: TimeUnit) -> Time {
        Time::new(self.value_in(unit), unit)
    }

    /// Shorthand for `value_in(TimeUnit::Hour)`; transmission rates are per hour.
    #[inline]
    pub fn in_hours(self) -> f64 {
        self.value_in(TimeUnit::Hour)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.amount == 0.0
    }

    /// `true` for a strictly positive, finite duration.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// Product of the two amounts after unit reconciliation.
    pub fn multiply(self, rhs: Time) -> Time {
        Time::new(self.amount * rhs.value_in(self.unit), self.unit)
    }

    /// Quotient of the two amounts after unit reconciliation.
    ///
    /// # Errors
    /// [`CoreError::DivideByZero`] if `rhs` has a zero amount.
    pub fn divide(self, rhs: Time) -> CoreResult<Time> {
        let divisor = self.reconciled_divisor(rhs)?;
        Ok(Time::new(self.amount / divisor, self.unit))
    }

    /// Dimensionless ratio `self / rhs`.
    pub fn ratio(self, rhs: Time) -> CoreResult<f64> {
        self.divide(rhs).map(|t| t.amount)
    }

    /// Euclidean remainder of `self` by `rhs`: always in `[0, |rhs|)`, so a
    /// negative time still maps to a position inside the period.
    ///
    /// # Errors
    /// [`CoreError::DivideByZero`] if `rhs` has a zero amount.
    pub fn modulo(self, rhs: Time) -> CoreResult<Time> {
        let divisor = self.reconciled_divisor(rhs)?;
        Ok(Time::new(self.amount.rem_euclid(divisor), self.unit))
    }

    /// Multiply the amount by a plain factor, keeping the unit.
    #[inline]
    pub fn scale(self, factor: f64) -> Time {
        Time::new(self.amount * factor, self.unit)
    }

    /// Clamp negative amounts to zero (duration use).
    #[inline]
    pub fn non_negative(self) -> Time {
        Time::new(self.amount.max(0.0), self.unit)
    }

    fn reconciled_divisor(self, rhs: Time) -> CoreResult<f64> {
        let divisor = rhs.value_in(self.unit);
        if divisor == 0.0 {
            return Err(CoreError::DivideByZero(format!("{self} by {rhs}")));
        }
        Ok(divisor)
    }
}

impl Default for Time {
    fn default() -> Self {
        Time::ZERO
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.to_millis() == other.to_millis()
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_millis().partial_cmp(&other.to_millis())
    }
}

impl Add for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: Time) -> Time {
        Time::new(self.amount + rhs.value_in(self.unit), self.unit)
    }
}

impl Sub for Time {
    type Output = Time;
    #[inline]
    fn sub(self, rhs: Time) -> Time {
        Time::new(self.amount - rhs.value_in(self.unit), self.unit)
    }
}

impl AddAssign for Time {
    #[inline]
    fn add_assign(&mut self, rhs: Time) {
        *self = *self + rhs;
    }
}

impl SubAssign for Time {
    #[inline]
    fn sub_assign(&mut self, rhs: Time) {
        *self = *self - rhs;
    }
}

impl Neg for Time {
    type Output = Time;
    #[inline]
    fn neg(self) -> Time {
        Time::new(-self.amount, self.unit)
    }
}

impl Mul<f64> for Time {
    type Output = Time;
    #[inline]
    fn mul(self, rhs: f64) -> Time {
        self.scale(rhs)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

// ── TimeInterval ──────────────────────────────────────────────────────────────

/// A half-open span of time `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeInterval {
    pub start: Time,
    pub end:   Time,
}

impl TimeInterval {
    #[inline]
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// `end − start`, in the unit of `start`.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    /// `true` if `t` lies in `[start, end)`.  An instant exactly on a
    /// boundary belongs to the interval that begins there.
    #[inline]
    pub fn contains(&self, t: Time) -> bool {
        self.start <= t && t < self.end
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
///
/// Incremented once per `update`, independently of the step's duration, so
/// observers and output rows have an exact integer key.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
