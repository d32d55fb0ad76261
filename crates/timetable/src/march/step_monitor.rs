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

use crate::{stats::MarchStatistics, table::TimeTable};
use timetable_core::num::scalar::TimeScalar;
use timetable_model::{index::SegmentIndex, timeline::TimePoint};

/// What a monitor wants the march to do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum MarchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for MarchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarchCommand::Continue => write!(f, "Continue"),
            MarchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// The point being visited, handed to the step closure and to monitors.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StepContext<T> {
    /// Index of the point, `0` being the start of the table.
    pub step: usize,
    /// The instant of the point.
    pub time: T,
    /// Size of the step that reached the point.
    pub delta: T,
    /// Segment the point belongs to.
    pub segment: SegmentIndex,
}

impl<T> From<TimePoint<T>> for StepContext<T> {
    #[inline]
    fn from(point: TimePoint<T>) -> Self {
        Self {
            step: point.step,
            time: point.time,
            delta: point.delta,
            segment: point.segment,
        }
    }
}

impl<T> std::fmt::Display for StepContext<T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "step {} at t={} (dt={}, {})",
            self.step, self.time, self.delta, self.segment
        )
    }
}

pub trait StepMonitor<T>
where
    T: TimeScalar,
{
    fn name(&self) -> &str;
    fn on_enter(&mut self, table: &TimeTable<T>);
    fn on_step(&mut self, context: &StepContext<T>);
    fn on_exit(&mut self, statistics: &MarchStatistics<T>);
    fn command(&self) -> MarchCommand;
}

impl<T> std::fmt::Debug for dyn StepMonitor<T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StepMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn StepMonitor<T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StepMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        assert_eq!(MarchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            MarchCommand::Terminate("done".to_string()).to_string(),
            "Terminate: done"
        );
        assert_eq!(MarchCommand::default(), MarchCommand::Continue);
    }

    #[test]
    fn test_context_from_point() {
        let point = TimePoint {
            step: 3,
            time: 1.5,
            delta: 0.5,
            segment: SegmentIndex::new(1),
        };
        let ctx = StepContext::from(point);
        assert_eq!(ctx.step, 3);
        assert_eq!(ctx.time, 1.5);
        assert_eq!(ctx.delta, 0.5);
        assert_eq!(ctx.segment, SegmentIndex::new(1));
    }
}
