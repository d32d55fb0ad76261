// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::num::{checked::CheckedTime, constants::Tolerance};
use num_traits::{Bounded, Num, NumCast};

/// The bound satisfied by every type usable as a time value.
///
/// This is an umbrella trait with a blanket implementation, so any
/// primitive integer or float qualifies without further work.
///
/// # Examples
///
/// ```rust
/// # use timetable_core::num::scalar::TimeScalar;
///
/// fn halfway<T: TimeScalar>(a: T, b: T) -> T {
///     a + (b - a) / (T::one() + T::one())
/// }
///
/// assert_eq!(halfway(2.0, 4.0), 3.0);
/// assert_eq!(halfway(2, 8), 5);
/// ```
pub trait TimeScalar:
    Copy
    + PartialOrd
    + Num
    + NumCast
    + Bounded
    + Tolerance
    + CheckedTime
    + std::fmt::Debug
    + std::fmt::Display
{
}

impl<T> TimeScalar for T where
    T: Copy
        + PartialOrd
        + Num
        + NumCast
        + Bounded
        + Tolerance
        + CheckedTime
        + std::fmt::Debug
        + std::fmt::Display
{
}

/// Converts a step count into the time domain.
///
/// Returns `None` if `steps` cannot be represented by `T`.
///
/// # Examples
///
/// ```rust
/// # use timetable_core::num::scalar::steps_to_time;
///
/// assert_eq!(steps_to_time::<f64>(10), Some(10.0));
/// assert_eq!(steps_to_time::<i8>(100), Some(100));
/// assert_eq!(steps_to_time::<i8>(1000), None);
/// ```
#[inline]
pub fn steps_to_time<T>(steps: usize) -> Option<T>
where
    T: TimeScalar,
{
    <T as NumCast>::from(steps)
}

/// Returns `steps * delta`, or `None` if either the step count or the
/// product is not representable by `T`.
///
/// # Examples
///
/// ```rust
/// # use timetable_core::num::scalar::checked_scale_steps;
///
/// assert_eq!(checked_scale_steps(4, 3_i32), Some(12));
/// assert_eq!(checked_scale_steps(100_000, 100_000_i32), None);
/// assert_eq!(checked_scale_steps(300, 1_i8), None);
/// ```
#[inline]
pub fn checked_scale_steps<T>(steps: usize, delta: T) -> Option<T>
where
    T: TimeScalar,
{
    steps_to_time::<T>(steps)?.checked_time_mul(delta)
}

/// Returns `steps * delta`.
///
/// Callers must ensure the product is representable in `T`; segments
/// validate this on construction.
#[inline]
pub fn scale_steps<T>(steps: usize, delta: T) -> T
where
    T: TimeScalar,
{
    let steps = steps_to_time::<T>(steps)
        .expect("scale_steps: step count exceeds the range of the time type");
    steps * delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_to_time_unsigned_and_signed() {
        assert_eq!(steps_to_time::<u8>(255), Some(255));
        assert_eq!(steps_to_time::<u8>(256), None);
        assert_eq!(steps_to_time::<i64>(usize::MAX), None);
        assert_eq!(steps_to_time::<i64>(12), Some(12));
    }

    #[test]
    fn test_steps_to_time_float() {
        assert_eq!(steps_to_time::<f32>(3), Some(3.0));
        assert_eq!(steps_to_time::<f64>(0), Some(0.0));
    }

    #[test]
    fn test_scale_steps() {
        assert_eq!(scale_steps(4, 3_i32), 12);
        assert_eq!(scale_steps(0, 7_u64), 0);
        assert!((scale_steps(10, 0.1_f64) - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "step count exceeds")]
    fn test_scale_steps_panics_on_unrepresentable_count() {
        let _ = scale_steps(1000, 1_i8);
    }
}
