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

use timetable_core::num::scalar::{TimeScalar, checked_scale_steps, scale_steps, steps_to_time};

/// The reasons a `(steps, delta)` pair is rejected as a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// The segment contains no steps.
    #[error("segment must contain at least one step")]
    ZeroSteps,
    /// The step size is zero, negative or not a number.
    #[error("segment delta must be strictly positive")]
    NonPositiveDelta,
    /// The step count does not fit into the time type.
    #[error("step count {steps} is not representable by the time type")]
    StepCountOverflow {
        /// The rejected step count.
        steps: usize,
    },
    /// The covered time, or the end of the line it is appended to, does not
    /// fit into the time type.
    #[error("segment duration overflows the time type")]
    DurationOverflow,
}

/// A run of `steps` equally sized time steps of length `delta`.
///
/// # Invariants
/// `steps >= 1`, `delta > 0` and `steps * delta` is representable by `T`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment<T> {
    steps: usize,
    delta: T,
}

impl<T> Segment<T>
where
    T: TimeScalar,
{
    /// Creates a new `Segment`.
    ///
    /// # Panics
    ///
    /// Panics if the pair is not a valid segment; see [`Segment::try_new`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::segment::Segment;
    ///
    /// let s = Segment::new(10, 0.1);
    /// assert_eq!(s.steps(), 10);
    /// ```
    #[inline]
    pub fn new(steps: usize, delta: T) -> Self {
        match Self::try_new(steps, delta) {
            Ok(segment) => segment,
            Err(e) => panic!("called `Segment::new` with an invalid segment: {}", e),
        }
    }

    /// Creates a new `Segment` if the pair is valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::segment::{Segment, SegmentError};
    ///
    /// assert!(Segment::try_new(4, 0.3).is_ok());
    /// assert_eq!(Segment::try_new(0, 0.3), Err(SegmentError::ZeroSteps));
    /// assert_eq!(Segment::try_new(4, 0.0), Err(SegmentError::NonPositiveDelta));
    /// assert_eq!(
    ///     Segment::try_new(300, 1_i8),
    ///     Err(SegmentError::StepCountOverflow { steps: 300 })
    /// );
    /// assert_eq!(
    ///     Segment::try_new(100_000, 100_000_i32),
    ///     Err(SegmentError::DurationOverflow)
    /// );
    /// ```
    pub fn try_new(steps: usize, delta: T) -> Result<Self, SegmentError> {
        if steps == 0 {
            return Err(SegmentError::ZeroSteps);
        }
        // Written as a negated comparison so NaN is rejected too.
        if !(delta > T::zero()) {
            return Err(SegmentError::NonPositiveDelta);
        }
        if steps_to_time::<T>(steps).is_none() {
            return Err(SegmentError::StepCountOverflow { steps });
        }
        if checked_scale_steps(steps, delta).is_none() {
            return Err(SegmentError::DurationOverflow);
        }
        Ok(Self { steps, delta })
    }

    /// Returns the number of steps in the segment.
    #[inline]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the size of every step in the segment.
    #[inline]
    pub const fn delta(&self) -> T {
        self.delta
    }

    /// Returns the time covered by the segment (`steps * delta`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::segment::Segment;
    ///
    /// assert_eq!(Segment::new(4, 3).duration(), 12);
    /// ```
    #[inline]
    pub fn duration(&self) -> T {
        scale_steps(self.steps, self.delta)
    }

    /// Returns the offset of the `k`-th step end from the segment origin.
    #[inline]
    pub(crate) fn offset(&self, k: usize) -> T {
        debug_assert!(
            k <= self.steps,
            "called `Segment::offset` with k out of bounds: the steps are {} but k is {}",
            self.steps,
            k
        );
        scale_steps(k, self.delta)
    }
}

impl<T> TryFrom<(usize, T)> for Segment<T>
where
    T: TimeScalar,
{
    type Error = SegmentError;

    fn try_from((steps, delta): (usize, T)) -> Result<Self, Self::Error> {
        Self::try_new(steps, delta)
    }
}

impl<T> std::fmt::Display for Segment<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.steps, self.delta)
    }
}
