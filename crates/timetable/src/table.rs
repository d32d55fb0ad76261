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

//! # Time Table
//!
//! A `TimeTable<T>` is a cursor over a `TimeLine<T>`. An analysis loop asks
//! it for the current time and step size, does its work, and advances:
//!
//! ```rust
//! use timetable::table::TimeTable;
//!
//! let mut table = TimeTable::with_segments(0.0, [(10, 0.1), (5, 0.2)]);
//! let mut visited = 0;
//! while let Some(time) = table.time() {
//!     let _dt = table.delta();
//!     assert!(time <= table.end_time() + 1e-12);
//!     visited += 1;
//!     table.advance();
//! }
//! assert_eq!(visited, 16);
//! assert!(table.is_finished());
//! ```
//!
//! The cursor walks the `N + 1` points of the line and then one position
//! further, the finished state, in which there is no current time. Stepping
//! back from the finished state lands on the end time again.

use num_traits::Bounded;
use timetable_core::{math::window::TimeWindow, num::scalar::TimeScalar};
use timetable_model::{
    config::{ConfigError, TimeLineConfig},
    index::SegmentIndex,
    segment::{Segment, SegmentError},
    timeline::{TimeLine, TimePoint, TimePoints},
};

/// A bidirectional cursor over the points of a segmented time line.
///
/// # Invariants
/// * `step <= num_steps + 1`, with `num_steps + 1` meaning finished.
/// * While not finished, `segment` owns `step` in the underlying line.
#[derive(Clone, PartialEq, Debug)]
pub struct TimeTable<T> {
    timeline: TimeLine<T>,
    step: usize,
    segment: SegmentIndex,
    epsilon: T,
}

impl<T> TimeTable<T>
where
    T: TimeScalar,
{
    /// Creates a table without segments, starting at `start`.
    #[inline]
    pub fn new(start: T) -> Self {
        Self::from_timeline(TimeLine::new(start))
    }

    /// Creates a table positioned at the start of `timeline`.
    #[inline]
    pub fn from_timeline(timeline: TimeLine<T>) -> Self {
        Self {
            timeline,
            step: 0,
            segment: SegmentIndex::new(0),
            epsilon: T::MIN_EPSILON,
        }
    }

    /// Creates a table from `(steps, delta)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if any pair is not a valid segment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable::table::TimeTable;
    ///
    /// let table = TimeTable::with_segments(1.0_f64, [(10, 0.1)]);
    /// assert!((table.end_time() - 2.0).abs() < 1e-12);
    /// ```
    pub fn with_segments<I>(start: T, segments: I) -> Self
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        match Self::try_with_segments(start, segments) {
            Ok(table) => table,
            Err(e) => panic!("called `TimeTable::with_segments` with an invalid segment: {}", e),
        }
    }

    /// Creates a table from `(steps, delta)` pairs, returning the first
    /// validation error.
    #[inline]
    pub fn try_with_segments<I>(start: T, segments: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        TimeLine::with_segments(start, segments).map(Self::from_timeline)
    }

    /// Creates a table from a configuration, honouring its `epsilon`.
    pub fn from_config(config: &TimeLineConfig<T>) -> Result<Self, ConfigError> {
        let mut table = Self::from_timeline(config.to_timeline()?);
        if let Some(epsilon) = config.epsilon {
            table.set_epsilon(epsilon);
        }
        Ok(table)
    }

    /// Returns the start time of the table.
    #[inline]
    pub fn start_time(&self) -> T {
        self.timeline.start()
    }

    /// Returns the end time of the table.
    #[inline]
    pub fn end_time(&self) -> T {
        self.timeline.end()
    }

    /// Returns `true` once the cursor has stepped past the last point.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.step > self.timeline.num_steps()
    }

    /// Returns `true` if the cursor has left the start point.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.step > 0
    }

    /// Returns `true` if the cursor is on the start point.
    #[inline]
    pub fn is_at_start(&self) -> bool {
        self.step == 0
    }

    /// Returns the index of the current point.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the segment the current point belongs to.
    #[inline]
    pub fn segment(&self) -> SegmentIndex {
        self.segment
    }

    /// Returns the total number of steps in the table.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.timeline.num_steps()
    }

    /// Returns the current time, or `None` once finished.
    #[inline]
    pub fn time(&self) -> Option<T> {
        if self.is_finished() {
            None
        } else if self.timeline.is_empty() {
            Some(self.timeline.start())
        } else {
            Some(self.timeline.time_in_segment(self.segment, self.step))
        }
    }

    /// Returns the size of the step that reached the current point.
    ///
    /// On the start point this is the size of the first step. Returns zero
    /// once finished or when the table has no segments.
    #[inline]
    pub fn delta(&self) -> T {
        if self.is_finished() {
            return T::zero();
        }
        self.timeline
            .segment(self.segment)
            .map_or_else(T::zero, Segment::delta)
    }

    /// Returns the current point, or `None` once finished.
    #[inline]
    pub fn point(&self) -> Option<TimePoint<T>> {
        self.time().map(|time| TimePoint {
            step: self.step,
            time,
            delta: self.delta(),
            segment: self.segment,
        })
    }

    /// Moves the start of the table to `time`.
    ///
    /// The cursor keeps its step, so the current time shifts by the same
    /// amount as the start.
    #[inline]
    pub fn set_start_time(&mut self, time: T) {
        self.timeline.set_start(time);
    }

    /// Appends a segment of `steps` steps of size `delta`.
    ///
    /// A finished table resumes on the first inserted step.
    ///
    /// # Panics
    ///
    /// Panics if the pair is not a valid segment.
    #[inline]
    pub fn insert(&mut self, steps: usize, delta: T) {
        if let Err(e) = self.try_insert(steps, delta) {
            panic!("called `TimeTable::insert` with an invalid segment: {}", e);
        }
    }

    /// Appends a segment, returning an error if the pair is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable::table::TimeTable;
    /// # use timetable_model::segment::SegmentError;
    ///
    /// let mut table = TimeTable::new(0);
    /// assert_eq!(table.try_insert(0, 1), Err(SegmentError::ZeroSteps));
    /// assert!(table.try_insert(3, 1).is_ok());
    /// assert_eq!(table.end_time(), 3);
    /// ```
    pub fn try_insert(&mut self, steps: usize, delta: T) -> Result<(), SegmentError> {
        self.timeline.try_push(steps, delta)?;
        self.sync_segment();
        Ok(())
    }

    /// Appends several segments.
    ///
    /// # Panics
    ///
    /// Panics on the first invalid pair; earlier pairs remain inserted.
    pub fn insert_all<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        if let Err(e) = self.try_insert_all(segments) {
            panic!("called `TimeTable::insert_all` with an invalid segment: {}", e);
        }
    }

    /// Appends several segments, stopping at the first invalid pair.
    ///
    /// Pairs before the invalid one remain inserted.
    pub fn try_insert_all<I>(&mut self, segments: I) -> Result<(), SegmentError>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let result = segments
            .into_iter()
            .try_for_each(|(steps, delta)| self.timeline.try_push(steps, delta).map(|_| ()));
        self.sync_segment();
        result
    }

    /// Moves the cursor back to the start point.
    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
        self.segment = SegmentIndex::new(0);
    }

    /// Removes every segment, moves the start to zero and resets the cursor.
    #[inline]
    pub fn clear(&mut self) {
        self.timeline.clear();
        self.reset();
    }

    /// Moves to the next point and returns its time.
    ///
    /// Advancing from the last point finishes the table; advancing a
    /// finished table does nothing. Returns `None` once finished.
    pub fn advance(&mut self) -> Option<T> {
        if self.is_finished() {
            return None;
        }
        self.step += 1;
        if self.is_finished() {
            return None;
        }
        if self.step > self.segment_end() {
            self.segment += 1;
        }
        self.time()
    }

    /// Moves to the previous point and returns its time.
    ///
    /// Retreating from the start point does nothing. Retreating a finished
    /// table returns to the last point.
    pub fn retreat(&mut self) -> Option<T> {
        if self.step == 0 {
            return self.time();
        }
        self.step -= 1;
        if self.step > 0 && self.step <= self.segment_first_step() {
            self.segment -= 1;
        }
        self.time()
    }

    /// Advances and returns the time from before the move.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timetable::table::TimeTable;
    ///
    /// let mut table = TimeTable::with_segments(1, [(10, 1)]);
    /// assert_eq!(table.fetch_advance(), Some(1));
    /// assert_eq!(table.time(), Some(2));
    /// assert_eq!(table.fetch_retreat(), Some(2));
    /// assert_eq!(table.time(), Some(1));
    /// ```
    #[inline]
    pub fn fetch_advance(&mut self) -> Option<T> {
        let before = self.time();
        self.advance();
        before
    }

    /// Retreats and returns the time from before the move.
    #[inline]
    pub fn fetch_retreat(&mut self) -> Option<T> {
        let before = self.time();
        self.retreat();
        before
    }

    /// Returns the comparison tolerance.
    #[inline]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Sets the comparison tolerance, never below `T::MIN_EPSILON`.
    ///
    /// Integer tables always compare exactly.
    #[inline]
    pub fn set_epsilon(&mut self, epsilon: T) {
        self.epsilon = T::clamp_epsilon(epsilon);
    }

    /// Returns `true` if `value` lies in `[start, end]`.
    #[inline]
    pub fn between(&self, value: T, start: T, end: T) -> bool {
        TimeWindow::try_new(start, end).is_some_and(|w| w.contains(value, self.epsilon))
    }

    /// Returns `true` if `value` lies between the start and end times.
    #[inline]
    pub fn between_start_end(&self, value: T) -> bool {
        self.timeline.window().contains(value, self.epsilon)
    }

    /// Returns `true` if `value` lies between the start and the current time.
    #[inline]
    pub fn between_start_now(&self, value: T) -> bool {
        self.between(value, self.start_time(), self.now())
    }

    /// Returns `true` if `value` lies between the current and the end time.
    #[inline]
    pub fn between_now_end(&self, value: T) -> bool {
        self.between(value, self.now(), self.end_time())
    }

    /// Returns `true` if `value` lies in `[start, now)`.
    #[inline]
    pub fn in_past(&self, value: T) -> bool {
        TimeWindow::try_new(self.start_time(), self.now())
            .is_some_and(|w| w.contains_open_end(value, self.epsilon))
    }

    /// Returns `true` if `value` lies in `(now, end]`.
    #[inline]
    pub fn in_future(&self, value: T) -> bool {
        TimeWindow::try_new(self.now(), self.end_time())
            .is_some_and(|w| w.contains_open_start(value, self.epsilon))
    }

    /// Returns the underlying time line.
    #[inline]
    pub fn timeline(&self) -> &TimeLine<T> {
        &self.timeline
    }

    /// Returns the recorded segments in insertion order.
    #[inline]
    pub fn segments(&self) -> &[Segment<T>] {
        self.timeline.segments()
    }

    /// Returns an iterator over every point, independent of the cursor.
    #[inline]
    pub fn iter(&self) -> TimePoints<'_, T> {
        self.timeline.iter()
    }

    /// The current time, or the largest representable time once finished.
    #[inline]
    fn now(&self) -> T {
        self.time().unwrap_or_else(<T as Bounded>::max_value)
    }

    #[inline]
    fn segment_first_step(&self) -> usize {
        self.timeline.first_step_of(self.segment).unwrap_or(0)
    }

    #[inline]
    fn segment_end(&self) -> usize {
        self.segment_first_step()
            + self
                .timeline
                .segment(self.segment)
                .map_or(0, Segment::steps)
    }

    /// Re-derives the owning segment after the line changed shape.
    #[inline]
    fn sync_segment(&mut self) {
        if let Some(segment) = self.timeline.segment_of(self.step) {
            self.segment = segment;
        }
    }
}

impl<T> Default for TimeTable<T>
where
    T: TimeScalar,
{
    #[inline]
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T> From<TimeLine<T>> for TimeTable<T>
where
    T: TimeScalar,
{
    #[inline]
    fn from(timeline: TimeLine<T>) -> Self {
        Self::from_timeline(timeline)
    }
}

impl<T> std::fmt::Display for TimeTable<T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.time() {
            Some(time) => write!(
                f,
                "TimeTable(time={}, step={}/{})",
                time,
                self.step,
                self.num_steps()
            ),
            None => write!(f, "TimeTable(finished, steps={})", self.num_steps()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let mut table = TimeTable::new(1.5);
        assert!(table.is_at_start());
        assert!(!table.is_finished());
        assert_eq!(table.time(), Some(1.5));
        assert_eq!(table.delta(), 0.0);
        assert_eq!(table.end_time(), 1.5);

        assert_eq!(table.advance(), None);
        assert!(table.is_finished());
        assert!(table.is_started());

        assert_eq!(table.retreat(), Some(1.5));
        assert!(table.is_at_start());
    }

    #[test]
    fn test_default_starts_at_zero() {
        let table = TimeTable::<i32>::default();
        assert_eq!(table.time(), Some(0));
        assert_eq!(table.num_steps(), 0);
    }

    #[test]
    fn test_delta_at_start_is_first_segment() {
        let table = TimeTable::with_segments(0, [(2, 3), (2, 5)]);
        assert_eq!(table.delta(), 3);
        assert_eq!(table.segment(), SegmentIndex::new(0));
    }

    #[test]
    fn test_advance_crosses_segments() {
        let mut table = TimeTable::with_segments(0, [(2, 3), (2, 5)]);
        let mut seen = vec![(table.time(), table.delta())];
        while table.advance().is_some() {
            seen.push((table.time(), table.delta()));
        }
        assert_eq!(
            seen,
            vec![
                (Some(0), 3),
                (Some(3), 3),
                (Some(6), 3),
                (Some(11), 5),
                (Some(16), 5),
            ]
        );
        assert!(table.is_finished());
        assert_eq!(table.delta(), 0);
        assert_eq!(table.time(), None);
    }

    #[test]
    fn test_advance_when_finished_is_noop() {
        let mut table = TimeTable::with_segments(0, [(1, 1)]);
        table.advance();
        table.advance();
        assert!(table.is_finished());
        assert_eq!(table.advance(), None);
        assert_eq!(table.step(), 2);
    }

    #[test]
    fn test_retreat_from_finished_returns_to_end() {
        let mut table = TimeTable::with_segments(0, [(2, 3), (2, 5)]);
        while table.advance().is_some() {}
        assert_eq!(table.retreat(), Some(16));
        assert_eq!(table.delta(), 5);
        assert_eq!(table.retreat(), Some(11));
        assert_eq!(table.delta(), 5);
        assert_eq!(table.retreat(), Some(6));
        assert_eq!(table.delta(), 3);
        assert_eq!(table.retreat(), Some(3));
        assert_eq!(table.retreat(), Some(0));
        assert!(table.is_at_start());
        assert_eq!(table.retreat(), Some(0));
        assert!(table.is_at_start());
    }

    #[test]
    fn test_advance_then_retreat_is_exact() {
        let mut table = TimeTable::with_segments(1.0, [(10, 0.1), (4, 0.3), (5, 0.2)]);
        let forward: Vec<f64> = std::iter::from_fn(|| table.fetch_advance()).collect();
        assert_eq!(forward.len(), 20);

        let mut backward = Vec::new();
        while let Some(t) = table.retreat() {
            backward.push(t);
            if table.is_at_start() {
                break;
            }
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_set_start_time_keeps_step() {
        let mut table = TimeTable::with_segments(0, [(5, 2)]);
        table.advance();
        table.advance();
        table.set_start_time(10);
        assert_eq!(table.step(), 2);
        assert_eq!(table.time(), Some(14));
        assert_eq!(table.end_time(), 20);
    }

    #[test]
    fn test_insert_resumes_finished_table() {
        let mut table = TimeTable::with_segments(0, [(2, 1)]);
        while table.advance().is_some() {}
        assert!(table.is_finished());

        table.insert(3, 10);
        assert!(!table.is_finished());
        assert_eq!(table.time(), Some(12));
        assert_eq!(table.delta(), 10);
        assert_eq!(table.segment(), SegmentIndex::new(1));
    }

    #[test]
    fn test_insert_into_finished_empty_table() {
        let mut table = TimeTable::new(5);
        table.advance();
        assert!(table.is_finished());
        table.insert(2, 3);
        assert_eq!(table.time(), Some(8));
        assert_eq!(table.retreat(), Some(5));
    }

    #[test]
    fn test_insert_all_keeps_valid_prefix() {
        let mut table = TimeTable::new(0);
        let res = table.try_insert_all([(2, 1), (0, 1), (3, 1)]);
        assert_eq!(res, Err(SegmentError::ZeroSteps));
        assert_eq!(table.segments().len(), 1);
        assert_eq!(table.end_time(), 2);
    }

    #[test]
    #[should_panic(expected = "invalid segment")]
    fn test_insert_panics_on_invalid() {
        let mut table = TimeTable::new(0.0);
        table.insert(4, -1.0);
    }

    #[test]
    fn test_clear() {
        let mut table = TimeTable::with_segments(1.0, [(10, 0.1)]);
        table.advance();
        table.clear();
        assert_eq!(table.time(), Some(0.0));
        assert_eq!(table.start_time(), 0.0);
        assert!(table.segments().is_empty());
        assert!(table.is_at_start());
    }

    #[test]
    fn test_epsilon_is_clamped() {
        let mut table = TimeTable::<f64>::new(0.0);
        assert_eq!(table.epsilon(), 1e-14);
        table.set_epsilon(0.0);
        assert_eq!(table.epsilon(), 1e-14);
        table.set_epsilon(0.5);
        assert_eq!(table.epsilon(), 0.5);

        let mut ints = TimeTable::<i32>::new(0);
        ints.set_epsilon(5);
        assert_eq!(ints.epsilon(), 0);
    }

    #[test]
    fn test_in_past_and_in_future() {
        let mut table = TimeTable::with_segments(0, [(10, 1)]);
        table.advance();
        table.advance();
        table.advance();

        assert!(table.in_past(0));
        assert!(table.in_past(2));
        assert!(!table.in_past(3));
        assert!(!table.in_future(3));
        assert!(table.in_future(4));
        assert!(table.in_future(10));
        assert!(!table.in_future(11));
    }

    #[test]
    fn test_queries_when_finished() {
        let mut table = TimeTable::with_segments(0, [(2, 1)]);
        while table.advance().is_some() {}
        assert!(table.between_start_now(2));
        assert!(table.between_start_now(1000));
        assert!(!table.between_now_end(2));
        assert!(!table.in_future(2));
        assert!(table.in_past(2));
    }

    #[test]
    fn test_between_rejects_inverted_bounds() {
        let table = TimeTable::<i32>::new(0);
        assert!(table.between(5, 0, 10));
        assert!(!table.between(5, 10, 0));
    }

    #[test]
    fn test_point_and_iter() {
        let mut table = TimeTable::with_segments(0, [(2, 2), (1, 7)]);
        table.advance();
        let point = table.point().unwrap();
        assert_eq!(point.step, 1);
        assert_eq!(point.time, 2);
        assert_eq!(point.delta, 2);
        // `iter` ignores the cursor.
        assert_eq!(table.iter().count(), 4);
    }

    #[test]
    fn test_from_config_applies_epsilon() {
        let config = TimeLineConfig::<f64>::from_json_str(
            r#"{ "start": 0.0, "segments": [{ "steps": 4, "delta": 0.5 }], "epsilon": 0.01 }"#,
        )
        .unwrap();
        let table = TimeTable::from_config(&config).unwrap();
        assert_eq!(table.epsilon(), 0.01);
        assert_eq!(table.end_time(), 2.0);
        assert!(table.between_start_end(2.005));
    }

    #[test]
    fn test_display() {
        let mut table = TimeTable::with_segments(0, [(2, 5)]);
        assert_eq!(format!("{}", table), "TimeTable(time=0, step=0/2)");
        table.advance();
        table.advance();
        table.advance();
        assert_eq!(format!("{}", table), "TimeTable(finished, steps=2)");
    }
}
