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

use crate::num::scalar::TimeScalar;

/// A closed time window `[start, end]`.
///
/// Unlike an integer interval, a time window is compared against values that
/// may carry rounding error. Every membership test therefore takes an
/// `epsilon` that widens the window on its included bounds. For integer
/// times pass zero (or `T::MIN_EPSILON`) and the tests become exact.
///
/// # Invariants
/// `start` must always be less than or equal to `end`.
#[derive(Clone, Copy, PartialEq, PartialOrd, Hash)]
pub struct TimeWindow<T> {
    start: T,
    end: T,
}

impl<T> TimeWindow<T>
where
    T: TimeScalar,
{
    /// Creates a new `TimeWindow`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or if the bounds are not comparable (NaN).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// let w = TimeWindow::new(1.0, 2.0);
    /// assert_eq!(w.len(), 1.0);
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        assert!(
            start <= end,
            "Invalid time window: start must be less than or equal to end"
        );
        Self { start, end }
    }

    /// Creates a new `TimeWindow` if the bounds are valid.
    ///
    /// Returns `None` if `start > end` or the bounds are not comparable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// assert!(TimeWindow::try_new(0, 10).is_some());
    /// assert!(TimeWindow::try_new(10, 0).is_none());
    /// assert!(TimeWindow::try_new(f64::NAN, 1.0).is_none());
    /// ```
    #[inline]
    pub fn try_new(start: T, end: T) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Creates a new `TimeWindow` without checking the bounds in release builds.
    ///
    /// The caller must ensure `start <= end`.
    #[inline]
    pub fn new_unchecked(start: T, end: T) -> Self {
        debug_assert!(
            start <= end,
            "Invalid time window: start must be less than or equal to end"
        );
        Self { start, end }
    }

    /// Returns the start bound of the window.
    #[inline]
    pub const fn start(&self) -> T {
        self.start
    }

    /// Returns the end bound of the window.
    #[inline]
    pub const fn end(&self) -> T {
        self.end
    }

    /// Returns the length of the window (`end - start`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// assert_eq!(TimeWindow::new(10, 25).len(), 15);
    /// ```
    #[inline]
    pub fn len(&self) -> T {
        self.end - self.start
    }

    /// Returns `true` if the window is a single instant (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `value` lies in `[start - epsilon, end + epsilon]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// let w = TimeWindow::new(1.0, 2.0);
    /// assert!(w.contains(2.0 + 1e-15, 1e-14));
    /// assert!(!w.contains(2.001, 1e-14));
    /// ```
    #[inline]
    pub fn contains(&self, value: T, epsilon: T) -> bool {
        self.end + epsilon >= value && value >= self.start - epsilon
    }

    /// Returns `true` if `value` lies in `[start - epsilon, end)`.
    ///
    /// The end bound is excluded exactly; the tolerance only widens the start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// let w = TimeWindow::new(0, 10);
    /// assert!(w.contains_open_end(0, 0));
    /// assert!(!w.contains_open_end(10, 0));
    /// ```
    #[inline]
    pub fn contains_open_end(&self, value: T, epsilon: T) -> bool {
        self.end > value && value >= self.start - epsilon
    }

    /// Returns `true` if `value` lies in `(start, end + epsilon]`.
    ///
    /// The start bound is excluded exactly; the tolerance only widens the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// let w = TimeWindow::new(0, 10);
    /// assert!(!w.contains_open_start(0, 0));
    /// assert!(w.contains_open_start(10, 0));
    /// ```
    #[inline]
    pub fn contains_open_start(&self, value: T, epsilon: T) -> bool {
        self.end + epsilon >= value && value > self.start
    }

    /// Returns `true` if `other` lies entirely within `self`.
    #[inline]
    pub fn contains_window(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` if the two windows share at least one instant.
    ///
    /// Closed windows that merely touch (`a.end == b.start`) intersect.
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Calculates the intersection of two windows.
    ///
    /// Returns `None` if the windows are disjoint. Touching windows yield a
    /// single-instant window.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// let a = TimeWindow::new(0, 10);
    /// let b = TimeWindow::new(5, 15);
    /// assert_eq!(a.intersection(b), Some(TimeWindow::new(5, 10)));
    /// ```
    #[inline]
    pub fn intersection(&self, other: Self) -> Option<Self> {
        let start = if self.start > other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end < other.end {
            self.end
        } else {
            other.end
        };
        Self::try_new(start, end)
    }

    /// Calculates the union of two windows.
    ///
    /// Returns `None` if a gap separates the windows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_core::math::window::TimeWindow;
    ///
    /// let a = TimeWindow::new(0.0, 1.0);
    /// let b = TimeWindow::new(1.0, 3.0);
    /// assert_eq!(a.union(b), Some(TimeWindow::new(0.0, 3.0)));
    /// assert_eq!(a.union(TimeWindow::new(2.0, 3.0)), None);
    /// ```
    #[inline]
    pub fn union(&self, other: Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Some(Self::new_unchecked(start, end))
    }
}

impl<T> Default for TimeWindow<T>
where
    T: TimeScalar,
{
    #[inline]
    fn default() -> Self {
        Self {
            start: T::zero(),
            end: T::zero(),
        }
    }
}

impl<T> std::fmt::Debug for TimeWindow<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeWindow")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<T> std::fmt::Display for TimeWindow<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl<T> std::ops::RangeBounds<T> for TimeWindow<T> {
    fn start_bound(&self) -> std::ops::Bound<&T> {
        std::ops::Bound::Included(&self.start)
    }

    fn end_bound(&self) -> std::ops::Bound<&T> {
        std::ops::Bound::Included(&self.end)
    }
}

impl<T> From<std::ops::RangeInclusive<T>> for TimeWindow<T>
where
    T: TimeScalar,
{
    #[inline]
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Self::new(start, end)
    }
}

impl<T> From<TimeWindow<T>> for std::ops::RangeInclusive<T> {
    #[inline]
    fn from(w: TimeWindow<T>) -> Self {
        w.start..=w.end
    }
}
