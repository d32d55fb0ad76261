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

//! # Time Lines
//!
//! A `TimeLine<T>` is a start instant followed by an ordered list of
//! segments. A line with `N` steps has `N + 1` time points: point `0` is the
//! start and point `k` is the instant reached after the `k`-th step.
//!
//! Step `k` (the move from point `k - 1` to point `k`) belongs to exactly one
//! segment. Point `0` is attributed to the first segment, so the delta
//! reported there is the size of the first step to be taken.
//!
//! Every point is computed as `origin(segment) + j * delta(segment)` from a
//! cached per-segment origin. Nothing is accumulated step by step, which keeps
//! forward and backward traversal bit-for-bit symmetric.

use crate::{
    index::SegmentIndex,
    segment::{Segment, SegmentError},
};
use std::iter::FusedIterator;
use timetable_core::{math::window::TimeWindow, num::scalar::TimeScalar};

/// Cached placement of a segment inside its line.
#[derive(Clone, Copy, PartialEq, Debug)]
struct Span<T> {
    /// Number of steps taken before this segment begins.
    first_step: usize,
    /// Time point at which this segment begins.
    origin: T,
}

/// A single time point of a `TimeLine`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TimePoint<T> {
    /// Index of the point, `0` being the start.
    pub step: usize,
    /// The instant of the point.
    pub time: T,
    /// Size of the step that reached the point; the first step's size at
    /// point `0`, zero on an empty line.
    pub delta: T,
    /// Segment the point belongs to.
    pub segment: SegmentIndex,
}

/// A start instant followed by segments of equally sized time steps.
///
/// # Examples
///
/// ```rust
/// # use timetable_model::timeline::TimeLine;
///
/// let line = TimeLine::with_segments(1.0_f64, [(10, 0.1), (4, 0.3), (5, 0.2)]).unwrap();
/// assert_eq!(line.num_steps(), 19);
/// assert!((line.end() - 4.2).abs() < 1e-12);
/// assert_eq!(line.iter().count(), 20);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct TimeLine<T> {
    start: T,
    segments: Vec<Segment<T>>,
    spans: Vec<Span<T>>,
    num_steps: usize,
}

impl<T> TimeLine<T>
where
    T: TimeScalar,
{
    /// Creates an empty time line beginning at `start`.
    #[inline]
    pub fn new(start: T) -> Self {
        Self {
            start,
            segments: Vec::new(),
            spans: Vec::new(),
            num_steps: 0,
        }
    }

    /// Creates an empty time line with room for `capacity` segments.
    #[inline]
    pub fn with_capacity(start: T, capacity: usize) -> Self {
        Self {
            start,
            segments: Vec::with_capacity(capacity),
            spans: Vec::with_capacity(capacity),
            num_steps: 0,
        }
    }

    /// Creates a time line from `(steps, delta)` pairs.
    ///
    /// Returns the first `SegmentError` encountered.
    pub fn with_segments<I>(start: T, segments: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let iter = segments.into_iter();
        let mut line = Self::with_capacity(start, iter.size_hint().0);
        for (steps, delta) in iter {
            line.try_push(steps, delta)?;
        }
        Ok(line)
    }

    /// Appends a segment to the end of the line.
    ///
    /// # Panics
    ///
    /// Panics if the new end time is not representable by `T`; see
    /// [`TimeLine::try_push_segment`].
    pub fn push(&mut self, segment: Segment<T>) -> SegmentIndex {
        match self.try_push_segment(segment) {
            Ok(index) => index,
            Err(e) => panic!("called `TimeLine::push` with a segment that cannot be appended: {}", e),
        }
    }

    /// Appends a segment, returning `SegmentError::DurationOverflow` if the
    /// new end time is not representable by `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::timeline::TimeLine;
    /// # use timetable_model::segment::{Segment, SegmentError};
    ///
    /// let mut line = TimeLine::new(i32::MAX - 10);
    /// assert!(line.try_push_segment(Segment::new(5, 2)).is_ok());
    /// assert_eq!(
    ///     line.try_push_segment(Segment::new(1, 1)),
    ///     Err(SegmentError::DurationOverflow)
    /// );
    /// assert_eq!(line.num_segments(), 1);
    /// ```
    pub fn try_push_segment(&mut self, segment: Segment<T>) -> Result<SegmentIndex, SegmentError> {
        let origin = self.end();
        if origin.checked_time_add(segment.duration()).is_none() {
            return Err(SegmentError::DurationOverflow);
        }
        let index = SegmentIndex::new(self.segments.len());
        self.spans.push(Span {
            first_step: self.num_steps,
            origin,
        });
        self.num_steps += segment.steps();
        self.segments.push(segment);
        Ok(index)
    }

    /// Validates and appends a `(steps, delta)` segment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::timeline::TimeLine;
    /// # use timetable_model::segment::SegmentError;
    ///
    /// let mut line = TimeLine::new(0);
    /// assert!(line.try_push(3, 2).is_ok());
    /// assert_eq!(line.try_push(3, 0), Err(SegmentError::NonPositiveDelta));
    /// assert_eq!(line.end(), 6);
    /// ```
    #[inline]
    pub fn try_push(&mut self, steps: usize, delta: T) -> Result<SegmentIndex, SegmentError> {
        Segment::try_new(steps, delta).and_then(|segment| self.try_push_segment(segment))
    }

    /// Returns the start instant.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Returns the last time point; the start on an empty line.
    #[inline]
    pub fn end(&self) -> T {
        match (self.spans.last(), self.segments.last()) {
            (Some(span), Some(segment)) => span.origin + segment.duration(),
            _ => self.start,
        }
    }

    /// Returns `end - start`.
    #[inline]
    pub fn duration(&self) -> T {
        self.end() - self.start
    }

    /// Returns the span `[start, end]` as a window.
    #[inline]
    pub fn window(&self) -> TimeWindow<T> {
        TimeWindow::new_unchecked(self.start, self.end())
    }

    /// Returns the total number of steps.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the number of time points (`num_steps + 1`).
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_steps + 1
    }

    /// Returns the number of segments.
    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the line has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments in order.
    #[inline]
    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    /// Returns the segment at `index`, if any.
    #[inline]
    pub fn segment(&self, index: SegmentIndex) -> Option<&Segment<T>> {
        self.segments.get(index.get())
    }

    /// Returns the number of steps taken before `index` begins.
    #[inline]
    pub fn first_step_of(&self, index: SegmentIndex) -> Option<usize> {
        self.spans.get(index.get()).map(|span| span.first_step)
    }

    /// Moves the line to begin at `start`, shifting every time point.
    pub fn set_start(&mut self, start: T) {
        self.start = start;
        let mut origin = start;
        for (span, segment) in self.spans.iter_mut().zip(&self.segments) {
            span.origin = origin;
            origin = origin + segment.duration();
        }
    }

    /// Removes every segment and moves the start back to zero.
    pub fn clear(&mut self) {
        self.start = T::zero();
        self.segments.clear();
        self.spans.clear();
        self.num_steps = 0;
    }

    /// Returns the segment that owns point `step`.
    ///
    /// Returns `None` on an empty line or if `step > num_steps()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::timeline::TimeLine;
    ///
    /// let line = TimeLine::with_segments(0, [(2, 1), (3, 5)]).unwrap();
    /// assert_eq!(line.segment_of(0).map(|s| s.get()), Some(0));
    /// assert_eq!(line.segment_of(2).map(|s| s.get()), Some(0));
    /// assert_eq!(line.segment_of(3).map(|s| s.get()), Some(1));
    /// assert_eq!(line.segment_of(6), None);
    /// ```
    pub fn segment_of(&self, step: usize) -> Option<SegmentIndex> {
        if self.segments.is_empty() || step > self.num_steps {
            return None;
        }
        if step == 0 {
            return Some(SegmentIndex::new(0));
        }
        let preceding = self.spans.partition_point(|span| span.first_step < step);
        Some(SegmentIndex::new(preceding - 1))
    }

    /// Returns the instant of point `step` inside `segment`.
    ///
    /// The caller must ensure `segment` owns `step`.
    #[inline]
    pub fn time_in_segment(&self, segment: SegmentIndex, step: usize) -> T {
        let index = segment.get();
        debug_assert!(
            index < self.segments.len(),
            "called `TimeLine::time_in_segment` with segment index out of bounds: the len is {} but the index is {}",
            self.segments.len(),
            index
        );
        let span = self.spans[index];
        span.origin + self.segments[index].offset(step - span.first_step)
    }

    /// Returns the instant of point `step`, or `None` past the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::timeline::TimeLine;
    ///
    /// let line = TimeLine::with_segments(10, [(2, 1), (3, 5)]).unwrap();
    /// assert_eq!(line.time_at(0), Some(10));
    /// assert_eq!(line.time_at(2), Some(12));
    /// assert_eq!(line.time_at(3), Some(17));
    /// assert_eq!(line.time_at(5), Some(27));
    /// assert_eq!(line.time_at(6), None);
    /// ```
    pub fn time_at(&self, step: usize) -> Option<T> {
        if step > self.num_steps {
            return None;
        }
        match self.segment_of(step) {
            Some(segment) => Some(self.time_in_segment(segment, step)),
            None => Some(self.start),
        }
    }

    /// Returns the delta of the step that reached point `step`.
    ///
    /// Point `0` reports the first segment's delta. Returns `None` on an
    /// empty line or past the end.
    #[inline]
    pub fn delta_at(&self, step: usize) -> Option<T> {
        self.segment_of(step)
            .map(|segment| self.segments[segment.get()].delta())
    }

    /// Returns the full description of point `step`, or `None` past the end.
    pub fn point_at(&self, step: usize) -> Option<TimePoint<T>> {
        if step > self.num_steps {
            return None;
        }
        let point = match self.segment_of(step) {
            Some(segment) => TimePoint {
                step,
                time: self.time_in_segment(segment, step),
                delta: self.segments[segment.get()].delta(),
                segment,
            },
            None => TimePoint {
                step,
                time: self.start,
                delta: T::zero(),
                segment: SegmentIndex::new(0),
            },
        };
        Some(point)
    }

    /// Returns the last point at or before `time`.
    ///
    /// Values within `T::MIN_EPSILON` of a point snap onto it. Returns `None`
    /// if `time` lies outside `[start, end]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable_model::timeline::TimeLine;
    ///
    /// let line = TimeLine::with_segments(1.0, [(10, 0.1), (4, 0.3)]).unwrap();
    /// assert_eq!(line.step_at(1.0), Some(0));
    /// assert_eq!(line.step_at(1.25), Some(2));
    /// assert_eq!(line.step_at(2.3), Some(11));
    /// assert_eq!(line.step_at(0.5), None);
    /// ```
    pub fn step_at(&self, time: T) -> Option<usize> {
        let epsilon = T::MIN_EPSILON;
        if !self.window().contains(time, epsilon) {
            return None;
        }
        if self.segments.is_empty() {
            return Some(0);
        }
        let owning = self
            .spans
            .partition_point(|span| span.origin <= time + epsilon)
            .max(1)
            - 1;
        let span = self.spans[owning];
        let segment = &self.segments[owning];
        // The quotient only estimates the offset; settle it against the
        // point times themselves so a point's own time maps back onto it.
        let estimate = ((time - span.origin) / segment.delta())
            .to_usize()
            .unwrap_or(0);
        let reached = |k: usize| span.origin + segment.offset(k) <= time + epsilon;
        let mut offset = estimate.min(segment.steps());
        while offset < segment.steps() && reached(offset + 1) {
            offset += 1;
        }
        while offset > 0 && !reached(offset) {
            offset -= 1;
        }
        Some(span.first_step + offset)
    }

    /// Returns an iterator over every time point, start to end.
    #[inline]
    pub fn iter(&self) -> TimePoints<'_, T> {
        TimePoints {
            timeline: self,
            front: 0,
            back: self.num_points(),
        }
    }

    /// Returns an iterator starting at the last point at or before `time`.
    ///
    /// The iterator is empty if `time` lies outside the line.
    #[inline]
    pub fn iter_from(&self, time: T) -> TimePoints<'_, T> {
        let back = self.num_points();
        let front = self.step_at(time).unwrap_or(back);
        TimePoints {
            timeline: self,
            front,
            back,
        }
    }

    /// Returns an iterator over the instants of every time point.
    #[inline]
    pub fn times(
        &self,
    ) -> impl DoubleEndedIterator<Item = T> + ExactSizeIterator + FusedIterator + '_ {
        self.iter().map(|point| point.time)
    }
}

impl<T> Default for TimeLine<T>
where
    T: TimeScalar,
{
    #[inline]
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T> Extend<Segment<T>> for TimeLine<T>
where
    T: TimeScalar,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Segment<T>>,
    {
        for segment in iter {
            self.push(segment);
        }
    }
}

impl<'a, T> IntoIterator for &'a TimeLine<T>
where
    T: TimeScalar,
{
    type Item = TimePoint<T>;
    type IntoIter = TimePoints<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> std::fmt::Display for TimeLine<T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeLine(start={}, steps={}, end={})",
            self.start,
            self.num_steps,
            self.end()
        )
    }
}

/// A double-ended iterator over the points of a `TimeLine`.
///
/// # Examples
///
/// ```rust
/// # use timetable_model::timeline::TimeLine;
///
/// let line = TimeLine::with_segments(10.0, [(5, 1.0), (5, 2.0)]).unwrap();
/// let backwards: Vec<f64> = line.iter().rev().map(|p| p.time).collect();
/// assert_eq!(backwards.first(), Some(&25.0));
/// assert_eq!(backwards.last(), Some(&10.0));
/// assert_eq!(backwards.len(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct TimePoints<'a, T> {
    timeline: &'a TimeLine<T>,
    front: usize,
    back: usize,
}

impl<T> Iterator for TimePoints<'_, T>
where
    T: TimeScalar,
{
    type Item = TimePoint<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let point = self.timeline.point_at(self.front);
            self.front += 1;
            point
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.saturating_sub(self.front);
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T> DoubleEndedIterator for TimePoints<'_, T>
where
    T: TimeScalar,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            self.timeline.point_at(self.back)
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for TimePoints<'_, T> where T: TimeScalar {}

impl<T> FusedIterator for TimePoints<'_, T> where T: TimeScalar {}
