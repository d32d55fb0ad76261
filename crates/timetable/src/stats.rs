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

/// Statistics collected during a march.
#[derive(Debug, Clone, PartialEq)]
pub struct MarchStatistics<T> {
    /// Number of points handed to the step closure.
    pub steps_taken: usize,
    /// Time of the last visited point, `None` if no point was visited.
    pub final_time: Option<T>,
    /// Wall-clock duration of the march.
    pub duration: std::time::Duration,
}

impl<T> std::fmt::Display for MarchStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "March Statistics:")?;
        writeln!(f, "  Steps Taken: {}", self.steps_taken)?;
        match &self.final_time {
            Some(time) => writeln!(f, "  Final Time: {}", time)?,
            None => writeln!(f, "  Final Time: -")?,
        }
        writeln!(
            f,
            "  Duration (secs): {:.3}",
            self.duration.as_secs_f64()
        )
    }
}

/// Builder for `MarchStatistics`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarchStatisticsBuilder<T> {
    steps_taken: usize,
    final_time: Option<T>,
    duration: std::time::Duration,
}

impl<T> Default for MarchStatisticsBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MarchStatisticsBuilder<T> {
    /// Creates a new `MarchStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            steps_taken: 0,
            final_time: None,
            duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the number of visited points.
    #[inline]
    pub fn steps_taken(mut self, steps_taken: usize) -> Self {
        self.steps_taken = steps_taken;
        self
    }

    /// Sets the time of the last visited point.
    #[inline]
    pub fn final_time(mut self, final_time: Option<T>) -> Self {
        self.final_time = final_time;
        self
    }

    /// Sets the wall-clock duration.
    #[inline]
    pub fn duration(mut self, duration: std::time::Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Builds the `MarchStatistics` instance.
    #[inline]
    pub fn build(self) -> MarchStatistics<T> {
        MarchStatistics {
            steps_taken: self.steps_taken,
            final_time: self.final_time,
            duration: self.duration,
        }
    }
}
