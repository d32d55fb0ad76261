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

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on a march. The clock is read only when
//! `(steps & clock_check_mask) == 0`, so cheap steps do not pay for a
//! syscall each. The default mask (`0x3FFF`) checks about every 16,384
//! points; FEM steps are usually expensive enough to warrant a mask of `0`.
//!
//! ```rust
//! use timetable::march::time_limit::TimeLimitMonitor;
//! use timetable::march::step_monitor::{MarchCommand, StepMonitor};
//! use std::time::Duration;
//!
//! let mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! assert_eq!(StepMonitor::<f64>::command(&mon), MarchCommand::Continue);
//! ```

use crate::{
    march::step_monitor::{MarchCommand, StepContext, StepMonitor},
    stats::MarchStatistics,
    table::TimeTable,
};
use timetable_core::num::scalar::TimeScalar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
}

impl TimeLimitMonitor {
    /// Default mask: Check every 16,384 steps (2^14).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }

    /// Returns the configured budget.
    #[inline]
    pub fn time_limit(&self) -> std::time::Duration {
        self.time_limit
    }
}

impl<T> StepMonitor<T> for TimeLimitMonitor
where
    T: TimeScalar,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter(&mut self, _table: &TimeTable<T>) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self, _context: &StepContext<T>) {
        self.steps = self.steps.wrapping_add(1);
    }

    fn on_exit(&mut self, _statistics: &MarchStatistics<T>) {}

    #[inline(always)]
    fn command(&self) -> MarchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return MarchCommand::Terminate("time limit reached".to_string());
        }
        MarchCommand::Continue
    }
}
