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

//! # Timetable
//!
//! A data structure for iterative discrete time, mainly for FEM analysis.
//!
//! An analysis describes its time axis as a start instant followed by runs of
//! equal steps. `TimeTable` is a cursor over that axis: it reports the current
//! time and step size, moves forward and backward, and answers tolerance-aware
//! questions such as "is this instant already in the past?".
//!
//! ## Modules
//!
//! - `table`: The stepping cursor `TimeTable<T>`.
//! - `march`: A driver that runs the stepping loop with pluggable monitors
//!   (step/time limits, simulation horizon, interrupts, progress logging).
//! - `stats`, `result`: What a march reports back.
//!
//! The value types live in `timetable_model` and the numeric foundations in
//! `timetable_core`; both are re-exported here.
//!
//! ```rust
//! use timetable::TimeTable;
//!
//! let mut table = TimeTable::new(0.0);
//! table.insert(10, 0.1);
//! table.insert(5, 0.2);
//!
//! let mut steps = 0;
//! while !table.is_finished() {
//!     steps += 1;
//!     table.advance();
//! }
//! assert_eq!(steps, 16);
//! ```

pub mod march;
pub mod result;
pub mod stats;
pub mod table;

pub use table::TimeTable;
pub use timetable_core::{math::window::TimeWindow, num::constants::Tolerance, num::scalar::TimeScalar};
pub use timetable_model::{
    config::{ConfigError, SegmentConfig, TimeLineConfig},
    index::SegmentIndex,
    loading::{TimeLineLoader, TimeLineLoaderError},
    segment::{Segment, SegmentError},
    timeline::{TimeLine, TimePoint, TimePoints},
};

pub use timetable_core;
pub use timetable_model;
