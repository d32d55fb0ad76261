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

use crate::stats::MarchStatistics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every remaining point of the table was visited.
    Completed,
    /// A monitor stopped the march early.
    /// The string carries the monitor's reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "Completed"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarchOutcome<T> {
    pub reason: TerminationReason,
    pub statistics: MarchStatistics<T>,
}

impl<T> MarchOutcome<T> {
    #[inline]
    pub fn new(reason: TerminationReason, statistics: MarchStatistics<T>) -> Self {
        Self { reason, statistics }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.reason, TerminationReason::Completed)
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.reason, TerminationReason::Aborted(_))
    }
}

impl<T> std::fmt::Display for MarchOutcome<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MarchStatisticsBuilder;

    #[test]
    fn test_reason_display() {
        assert_eq!(TerminationReason::Completed.to_string(), "Completed");
        assert_eq!(
            TerminationReason::Aborted("step limit reached".into()).to_string(),
            "Aborted: step limit reached"
        );
    }

    #[test]
    fn test_outcome_predicates_and_display() {
        let stats = MarchStatisticsBuilder::new()
            .steps_taken(2)
            .final_time(Some(1))
            .build();
        let outcome = MarchOutcome::new(TerminationReason::Completed, stats);
        assert!(outcome.is_completed());
        assert!(!outcome.is_aborted());
        let rendered = outcome.to_string();
        assert!(rendered.starts_with("Termination: Completed\n"));
        assert!(rendered.contains("Steps Taken: 2"));
    }
}
