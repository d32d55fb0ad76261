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
    march::{
        index::MonitorIndex,
        step_monitor::{MarchCommand, StepContext, StepMonitor},
    },
    stats::MarchStatistics,
    table::TimeTable,
};
use timetable_core::num::scalar::TimeScalar;

/// A composite monitor that forwards every event to all of its monitors.
///
/// The first monitor asking to terminate decides the reason.
pub struct CompositeMonitor<'a, T> {
    monitors: Vec<Box<dyn StepMonitor<T> + 'a>>,
}

impl<T> std::fmt::Debug for CompositeMonitor<'_, T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl<T> std::fmt::Display for CompositeMonitor<'_, T>
where
    T: TimeScalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl<T> Default for CompositeMonitor<'_, T>
where
    T: TimeScalar,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: TimeScalar,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Creates a new `CompositeMonitor` from a vector of boxed monitors.
    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn StepMonitor<T> + 'a>>) -> Self {
        Self { monitors }
    }

    /// Adds a monitor and returns its index.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M) -> MonitorIndex
    where
        M: StepMonitor<T> + 'a,
    {
        self.add_monitor_boxed(Box::new(monitor))
    }

    /// Adds a boxed monitor and returns its index.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn StepMonitor<T> + 'a>) -> MonitorIndex {
        let index = MonitorIndex::new(self.monitors.len());
        self.monitors.push(monitor);
        index
    }

    /// Adds a monitor, builder style.
    #[inline]
    pub fn with_monitor<M>(mut self, monitor: M) -> Self
    where
        M: StepMonitor<T> + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    /// Returns the number of monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if there are no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Returns the monitor at `monitor_index`, or `None` if out of bounds.
    #[inline]
    pub fn monitor(&self, monitor_index: MonitorIndex) -> Option<&(dyn StepMonitor<T> + 'a)> {
        self.monitors.get(monitor_index.get()).map(|m| m.as_ref())
    }

    fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a, T> FromIterator<Box<dyn StepMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: TimeScalar,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn StepMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<T> StepMonitor<T> for CompositeMonitor<'_, T>
where
    T: TimeScalar,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter(&mut self, table: &TimeTable<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter(table);
        }
    }

    fn on_step(&mut self, context: &StepContext<T>) {
        for monitor in &mut self.monitors {
            monitor.on_step(context);
        }
    }

    fn on_exit(&mut self, statistics: &MarchStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_exit(statistics);
        }
    }

    fn command(&self) -> MarchCommand {
        // Plain loop; this runs once per visited point.
        for monitor in &self.monitors {
            if let MarchCommand::Terminate(reason) = monitor.command() {
                return MarchCommand::Terminate(reason);
            }
        }
        MarchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::march::{
        horizon::SimulationTimeMonitor, no_op::NoOpMonitor, step_limit::StepLimitMonitor,
    };
    use timetable_model::index::SegmentIndex;

    fn ctx(time: f64) -> StepContext<f64> {
        StepContext {
            step: 0,
            time,
            delta: 1.0,
            segment: SegmentIndex::new(0),
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let mon = CompositeMonitor::<f64>::new();
        assert!(mon.is_empty());
        assert_eq!(mon.command(), MarchCommand::Continue);
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut mon = CompositeMonitor::<f64>::new()
            .with_monitor(NoOpMonitor)
            .with_monitor(SimulationTimeMonitor::new(1.0))
            .with_monitor(StepLimitMonitor::new(1));
        assert_eq!(mon.len(), 3);

        mon.on_step(&ctx(2.0));
        assert_eq!(
            mon.command(),
            MarchCommand::Terminate("simulation horizon 1 reached".to_string())
        );
    }

    #[test]
    fn test_add_monitor_returns_indices() {
        let mut mon = CompositeMonitor::<f64>::with_capacity(2);
        let a = mon.add_monitor(NoOpMonitor);
        let b = mon.add_monitor(StepLimitMonitor::new(3));
        assert_eq!(a, MonitorIndex::new(0));
        assert_eq!(b, MonitorIndex::new(1));
        assert_eq!(mon.monitor(b).map(|m| m.name()), Some("StepLimitMonitor"));
        assert!(mon.monitor(MonitorIndex::new(2)).is_none());
    }

    #[test]
    fn test_display_lists_monitor_names() {
        let boxed: Vec<Box<dyn StepMonitor<f64>>> =
            vec![Box::new(NoOpMonitor), Box::new(StepLimitMonitor::new(1))];
        let mon: CompositeMonitor<'_, f64> = boxed.into_iter().collect();
        assert_eq!(
            mon.to_string(),
            "CompositeMonitor([NoOpMonitor, StepLimitMonitor])"
        );
    }
}
