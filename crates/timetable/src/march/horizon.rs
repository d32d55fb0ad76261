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

use crate::{
    march::step_monitor::{MarchCommand, StepContext, StepMonitor},
    stats::MarchStatistics,
    table::TimeTable,
};
use timetable_core::num::scalar::TimeScalar;

/// Terminates the march once a visited point lies at or beyond `horizon`.
///
/// The point that reaches the horizon is still handed to the step closure;
/// the march stops before the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationTimeMonitor<T> {
    horizon: T,
    reached: bool,
}

impl<T> SimulationTimeMonitor<T>
where
    T: TimeScalar,
{
    #[inline]
    pub fn new(horizon: T) -> Self {
        Self {
            horizon,
            reached: false,
        }
    }

    #[inline]
    pub fn horizon(&self) -> T {
        self.horizon
    }
}

impl<T> StepMonitor<T> for SimulationTimeMonitor<T>
where
    T: TimeScalar,
{
    fn name(&self) -> &str {
        "SimulationTimeMonitor"
    }

    fn on_enter(&mut self, _table: &TimeTable<T>) {
        self.reached = false;
    }

    #[inline(always)]
    fn on_step(&mut self, context: &StepContext<T>) {
        if context.time >= self.horizon {
            self.reached = true;
        }
    }

    fn on_exit(&mut self, _statistics: &MarchStatistics<T>) {}

    #[inline(always)]
    fn command(&self) -> MarchCommand {
        if self.reached {
            return MarchCommand::Terminate(format!("simulation horizon {} reached", self.horizon));
        }
        MarchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_model::index::SegmentIndex;

    fn at(time: f64) -> StepContext<f64> {
        StepContext {
            step: 0,
            time,
            delta: 0.5,
            segment: SegmentIndex::new(0),
        }
    }

    #[test]
    fn test_terminates_once_horizon_is_reached() {
        let mut mon = SimulationTimeMonitor::new(2.0);
        mon.on_step(&at(1.5));
        assert_eq!(mon.command(), MarchCommand::Continue);
        mon.on_step(&at(2.0));
        assert_eq!(
            mon.command(),
            MarchCommand::Terminate("simulation horizon 2 reached".to_string())
        );
    }

    #[test]
    fn test_on_enter_clears_state() {
        let mut mon = SimulationTimeMonitor::new(1.0);
        mon.on_step(&at(5.0));
        mon.on_enter(&TimeTable::new(0.0));
        assert_eq!(mon.command(), MarchCommand::Continue);
        assert_eq!(mon.horizon(), 1.0);
    }
}
