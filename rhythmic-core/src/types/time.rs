//! Rational timing types for exact step placement
//!
//! Step sizes like 1/3 of a beat do not survive floating point; keeping them
//! as rationals keeps step boundaries on exact part indices.

use num_rational::Ratio;

/// Exact time value in beats
pub type Time = Ratio<i64>;

/// Helper to create Time from a ratio n/d
#[inline]
pub fn time(n: i64, d: i64) -> Time {
    Ratio::new(n, d)
}

/// Create Time from an integer (whole beats)
#[inline]
pub fn beats(n: i64) -> Time {
    Ratio::from_integer(n)
}

/// Largest integer not above `t`; total for every representable value
#[inline]
pub fn floor_int(t: Time) -> i64 {
    // denominators are kept positive
    t.numer().div_euclid(*t.denom())
}

/// Smallest integer not below `t`; total for every representable value
#[inline]
pub fn ceil_int(t: Time) -> i64 {
    let floor = floor_int(t);
    if t.numer().rem_euclid(*t.denom()) == 0 {
        floor
    } else {
        floor + 1
    }
}
