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

//! # Step Limit Monitor
//!
//! Terminates a march after a fixed number of visited points. Useful for
//! splitting a long analysis into resumable chunks: the table keeps its
//! cursor, so a second march picks up where the first one stopped.
//!
//! ```rust
//! use timetable::march::{marcher::Marcher, step_limit::StepLimitMonitor};
//! use timetable::result::TerminationReason;
//! use timetable::table::TimeTable;
//!
//! let mut table = TimeTable::with_segments(0, [(10, 1)]);
//! let mut marcher = Marcher::new(StepLimitMonitor::new(4));
//! let outcome = marcher.run(&mut table, |_| Ok::<_, ()>(())).unwrap();
//! assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
//! assert_eq!(table.time(), Some(4));
//! ```

use crate::{
    march::step_monitor::{MarchCommand, StepContext, StepMonitor},
    stats::MarchStatistics,
    table::TimeTable,
};
use timetable_core::num::scalar::TimeScalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLimitMonitor {
    limit: usize,
    steps: usize,
}

impl StepLimitMonitor {
    /// Creates a monitor that allows at most `limit` points per march.
    #[inline]
    pub fn new(limit: usize) -> Self {
        Self { limit, steps: 0 }
    }

    /// Returns the configured limit.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of points seen in the current march.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<T> StepMonitor<T> for StepLimitMonitor
where
    T: TimeScalar,
{
    fn name(&self) -> &str {
        "StepLimitMonitor"
    }

    fn on_enter(&mut self, _table: &TimeTable<T>) {
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self, _context: &StepContext<T>) {
        self.steps = self.steps.saturating_add(1);
    }

    fn on_exit(&mut self, _statistics: &MarchStatistics<T>) {}

    #[inline(always)]
    fn command(&self) -> MarchCommand {
        if self.steps >= self.limit {
            return MarchCommand::Terminate("step limit reached".to_string());
        }
        MarchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_model::index::SegmentIndex;

    fn ctx() -> StepContext<i32> {
        StepContext {
            step: 0,
            time: 0,
            delta: 1,
            segment: SegmentIndex::new(0),
        }
    }

    #[test]
    fn test_terminates_at_limit() {
        let mut mon = StepLimitMonitor::new(2);
        assert_eq!(StepMonitor::<i32>::command(&mon), MarchCommand::Continue);
        mon.on_step(&ctx());
        assert_eq!(StepMonitor::<i32>::command(&mon), MarchCommand::Continue);
        mon.on_step(&ctx());
        assert!(matches!(
            StepMonitor::<i32>::command(&mon),
            MarchCommand::Terminate(msg) if msg == "step limit reached"
        ));
    }

    #[test]
    fn test_zero_limit_terminates_immediately() {
        let mon = StepLimitMonitor::new(0);
        assert!(matches!(
            StepMonitor::<i32>::command(&mon),
            MarchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_on_enter_resets_counter() {
        let mut mon = StepLimitMonitor::new(1);
        mon.on_step(&ctx());
        assert_eq!(mon.steps(), 1);
        mon.on_enter(&TimeTable::<i32>::new(0));
        assert_eq!(mon.steps(), 0);
        assert_eq!(mon.limit(), 1);
    }
}
