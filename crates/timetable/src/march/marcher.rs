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

//! # Marcher
//!
//! The canonical analysis loop over a `TimeTable`:
//!
//! ```text
//! while the table is not finished:
//!     solve at (time, delta)
//!     advance
//! ```
//!
//! `Marcher` runs it with a `StepMonitor` attached. The march starts at the
//! table's current point, so a table that was stopped early can be resumed
//! with a second call.
//!
//! ```rust
//! use timetable::march::{marcher::Marcher, no_op::NoOpMonitor};
//! use timetable::table::TimeTable;
//!
//! let mut table = TimeTable::with_segments(0.0, [(4, 0.25)]);
//! let mut visited = Vec::new();
//! let outcome = Marcher::new(NoOpMonitor)
//!     .run(&mut table, |ctx| {
//!         visited.push(ctx.time);
//!         Ok::<_, std::convert::Infallible>(())
//!     })
//!     .unwrap();
//!
//! assert!(outcome.is_completed());
//! assert_eq!(visited, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! assert!(table.is_finished());
//! ```

use crate::{
    march::step_monitor::{MarchCommand, StepContext, StepMonitor},
    result::{MarchOutcome, TerminationReason},
    stats::{MarchStatistics, MarchStatisticsBuilder},
    table::TimeTable,
};
use timetable_core::num::scalar::TimeScalar;

/// Drives a `TimeTable` to its end under the control of a monitor.
#[derive(Debug, Clone, Default)]
pub struct Marcher<T, M> {
    monitor: M,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, M> Marcher<T, M>
where
    T: TimeScalar,
    M: StepMonitor<T>,
{
    #[inline]
    pub fn new(monitor: M) -> Self {
        Self {
            monitor,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    #[inline]
    pub fn monitor_mut(&mut self) -> &mut M {
        &mut self.monitor
    }

    #[inline]
    pub fn into_monitor(self) -> M {
        self.monitor
    }

    /// Visits every point from the table's cursor to its end.
    ///
    /// For each point the monitor is consulted first, then `step_fn` runs,
    /// then the table advances. An `Err` from `step_fn` stops the march with
    /// the cursor left on the failing point and is returned unchanged.
    pub fn run<F, E>(&mut self, table: &mut TimeTable<T>, mut step_fn: F) -> Result<MarchOutcome<T>, E>
    where
        F: FnMut(&StepContext<T>) -> Result<(), E>,
    {
        let start_time = std::time::Instant::now();
        let mut steps_taken = 0usize;
        let mut final_time = None;

        self.monitor.on_enter(table);
        tracing::debug!(
            monitor = self.monitor.name(),
            step = table.step(),
            steps = table.num_steps(),
            "march entered"
        );

        let reason = loop {
            if let MarchCommand::Terminate(msg) = self.monitor.command() {
                break TerminationReason::Aborted(msg);
            }

            let Some(point) = table.point() else {
                break TerminationReason::Completed;
            };
            let context = StepContext::from(point);

            if let Err(e) = step_fn(&context) {
                let statistics = Self::statistics(steps_taken, final_time, start_time);
                tracing::debug!(step = context.step, time = %context.time, "march failed");
                self.monitor.on_exit(&statistics);
                return Err(e);
            }

            steps_taken += 1;
            final_time = Some(context.time);
            self.monitor.on_step(&context);
            tracing::trace!(step = context.step, time = %context.time, delta = %context.delta, "step");

            table.advance();
        };

        let statistics = Self::statistics(steps_taken, final_time, start_time);
        tracing::debug!(reason = %reason, steps = steps_taken, "march exited");
        self.monitor.on_exit(&statistics);
        Ok(MarchOutcome::new(reason, statistics))
    }

    #[inline]
    fn statistics(
        steps_taken: usize,
        final_time: Option<T>,
        start_time: std::time::Instant,
    ) -> MarchStatistics<T> {
        MarchStatisticsBuilder::new()
            .steps_taken(steps_taken)
            .final_time(final_time)
            .duration(start_time.elapsed())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::march::{
        composite::CompositeMonitor, horizon::SimulationTimeMonitor, interrupt::InterruptMonitor,
        no_op::NoOpMonitor, step_limit::StepLimitMonitor,
    };
    use std::sync::atomic::AtomicBool;

    #[derive(Default)]
    struct Recorder {
        entered: usize,
        steps: Vec<usize>,
        exits: Vec<usize>,
    }

    impl StepMonitor<i64> for Recorder {
        fn name(&self) -> &str {
            "Recorder"
        }
        fn on_enter(&mut self, _table: &TimeTable<i64>) {
            self.entered += 1;
        }
        fn on_step(&mut self, context: &StepContext<i64>) {
            self.steps.push(context.step);
        }
        fn on_exit(&mut self, statistics: &MarchStatistics<i64>) {
            self.exits.push(statistics.steps_taken);
        }
        fn command(&self) -> MarchCommand {
            MarchCommand::Continue
        }
    }

    #[test]
    fn test_completes_and_visits_every_point() {
        let mut table = TimeTable::with_segments(0i64, [(2, 3), (2, 5)]);
        let mut times = Vec::new();
        let mut marcher = Marcher::new(Recorder::default());
        let outcome = marcher
            .run(&mut table, |ctx| {
                times.push((ctx.time, ctx.delta));
                Ok::<_, ()>(())
            })
            .unwrap();

        assert_eq!(outcome.reason, TerminationReason::Completed);
        assert_eq!(outcome.statistics.steps_taken, 5);
        assert_eq!(outcome.statistics.final_time, Some(16));
        assert_eq!(times, vec![(0, 3), (3, 3), (6, 3), (11, 5), (16, 5)]);

        let recorder = marcher.into_monitor();
        assert_eq!(recorder.entered, 1);
        assert_eq!(recorder.steps, vec![0, 1, 2, 3, 4]);
        assert_eq!(recorder.exits, vec![5]);
    }

    #[test]
    fn test_finished_table_completes_without_steps() {
        let mut table = TimeTable::with_segments(0i64, [(1, 1)]);
        while table.advance().is_some() {}
        let outcome = Marcher::new(NoOpMonitor)
            .run(&mut table, |_| Err("must not be called"))
            .unwrap();
        assert!(outcome.is_completed());
        assert_eq!(outcome.statistics.steps_taken, 0);
        assert_eq!(outcome.statistics.final_time, None);
    }

    #[test]
    fn test_step_limit_then_resume() {
        let mut table = TimeTable::with_segments(0i64, [(9, 1)]);
        let mut marcher = Marcher::new(StepLimitMonitor::new(4));

        let first = marcher.run(&mut table, |_| Ok::<_, ()>(())).unwrap();
        assert_eq!(
            first.reason,
            TerminationReason::Aborted("step limit reached".to_string())
        );
        assert_eq!(first.statistics.final_time, Some(3));
        assert_eq!(table.time(), Some(4));

        let second = marcher.run(&mut table, |_| Ok::<_, ()>(())).unwrap();
        assert!(second.is_aborted());
        assert_eq!(second.statistics.final_time, Some(7));

        let third = marcher.run(&mut table, |_| Ok::<_, ()>(())).unwrap();
        assert!(third.is_completed());
        assert_eq!(third.statistics.steps_taken, 2);
        assert!(table.is_finished());
    }

    #[test]
    fn test_error_is_propagated_and_cursor_kept() {
        let mut table = TimeTable::with_segments(0.0, [(10, 0.5)]);
        let mut marcher = Marcher::new(NoOpMonitor);
        let err = marcher
            .run(&mut table, |ctx| {
                if ctx.time > 1.9 {
                    Err(format!("diverged at {}", ctx.time))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();
        assert_eq!(err, "diverged at 2");
        assert_eq!(table.step(), 4);
        assert_eq!(table.time(), Some(2.0));
    }

    #[test]
    fn test_error_still_calls_on_exit() {
        let mut table = TimeTable::with_segments(0i64, [(5, 1)]);
        let mut marcher = Marcher::new(Recorder::default());
        let res = marcher.run(&mut table, |ctx| if ctx.step == 2 { Err(()) } else { Ok(()) });
        assert!(res.is_err());
        assert_eq!(marcher.monitor().exits, vec![2]);
    }

    #[test]
    fn test_horizon_stops_after_reaching_point() {
        let mut table = TimeTable::with_segments(0.0, [(10, 0.5)]);
        let mut last = 0.0;
        let outcome = Marcher::new(SimulationTimeMonitor::new(1.0))
            .run(&mut table, |ctx| {
                last = ctx.time;
                Ok::<_, ()>(())
            })
            .unwrap();
        assert!(outcome.is_aborted());
        assert_eq!(last, 1.0);
        assert_eq!(table.time(), Some(1.5));
    }

    #[test]
    fn test_interrupt_before_first_step() {
        let flag = AtomicBool::new(true);
        let mut table = TimeTable::with_segments(0i64, [(3, 1)]);
        let outcome = Marcher::new(InterruptMonitor::new(&flag))
            .run(&mut table, |_| Ok::<_, ()>(()))
            .unwrap();
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("Interrupt signal received".to_string())
        );
        assert_eq!(outcome.statistics.steps_taken, 0);
        assert!(table.is_at_start());
    }

    #[test]
    fn test_composite_monitor_drives_march() {
        let mut table = TimeTable::with_segments(0i64, [(100, 1)]);
        let monitor = CompositeMonitor::new()
            .with_monitor(NoOpMonitor)
            .with_monitor(StepLimitMonitor::new(10))
            .with_monitor(SimulationTimeMonitor::new(5));
        let outcome = Marcher::new(monitor)
            .run(&mut table, |_| Ok::<_, ()>(()))
            .unwrap();
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("simulation horizon 5 reached".to_string())
        );
        assert_eq!(outcome.statistics.steps_taken, 6);
    }
}
