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

/// Emits `tracing` progress lines every `interval` visited points.
///
/// Never terminates the march.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMonitor {
    interval: usize,
    steps: usize,
}

impl LogMonitor {
    /// Creates a monitor logging every `interval` points; `0` is treated as `1`.
    #[inline]
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            steps: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(100)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor(interval: {} steps)", self.interval)
    }
}

impl<T> StepMonitor<T> for LogMonitor
where
    T: TimeScalar,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter(&mut self, table: &TimeTable<T>) {
        self.steps = 0;
        tracing::info!(
            start = %table.start_time(),
            end = %table.end_time(),
            steps = table.num_steps(),
            "march started"
        );
    }

    fn on_step(&mut self, context: &StepContext<T>) {
        self.steps += 1;
        if self.steps % self.interval == 0 {
            tracing::info!(
                step = context.step,
                time = %context.time,
                delta = %context.delta,
                "march progress"
            );
        }
    }

    fn on_exit(&mut self, statistics: &MarchStatistics<T>) {
        tracing::info!(
            steps = statistics.steps_taken,
            elapsed_secs = statistics.duration.as_secs_f64(),
            "march finished"
        );
    }

    #[inline(always)]
    fn command(&self) -> MarchCommand {
        MarchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::march::marcher::Marcher;
    use std::{
        io,
        sync::{Arc, Mutex},
    };
    use timetable_model::index::SegmentIndex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted events in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn march_captured(table: &mut TimeTable<i64>, monitor: LogMonitor) -> Vec<String> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            Marcher::new(monitor)
                .run(table, |_| Ok::<(), ()>(()))
                .unwrap();
        });
        captured.lines()
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(LogMonitor::new(0).interval(), 1);
        assert_eq!(LogMonitor::default().interval(), 100);
        assert_eq!(LogMonitor::new(5).to_string(), "LogMonitor(interval: 5 steps)");
    }

    #[test]
    fn test_never_terminates() {
        let mut mon = LogMonitor::new(2);
        let ctx = StepContext {
            step: 1,
            time: 1,
            delta: 1,
            segment: SegmentIndex::new(0),
        };
        for _ in 0..5 {
            mon.on_step(&ctx);
            assert_eq!(StepMonitor::<i32>::command(&mon), MarchCommand::Continue);
        }
        assert_eq!(mon.steps, 5);
    }

    #[test]
    fn test_progress_follows_interval() {
        let mut table = TimeTable::with_segments(0i64, [(9, 1)]);
        let lines = march_captured(&mut table, LogMonitor::new(3));

        let count = |message: &str| lines.iter().filter(|l| l.contains(message)).count();
        assert_eq!(count("march started"), 1);
        assert_eq!(count("march finished"), 1);

        let progress: Vec<&String> = lines.iter().filter(|l| l.contains("march progress")).collect();
        assert_eq!(progress.len(), 3);
        for (line, step) in progress.iter().zip([2, 5, 8]) {
            assert!(line.contains(&format!("step={step}")), "{line}");
            assert!(line.contains("INFO"), "{line}");
        }
    }

    #[test]
    fn test_progress_restarts_each_march() {
        let mut table = TimeTable::with_segments(0i64, [(4, 1)]);
        let mut monitor = LogMonitor::new(2);
        monitor.steps = 1;
        let lines = march_captured(&mut table, monitor);
        let progress = lines.iter().filter(|l| l.contains("march progress")).count();
        assert_eq!(progress, 2);
    }
}
