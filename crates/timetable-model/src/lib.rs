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

//! # Timetable Model
//!
//! **Segmented discrete time lines.**
//!
//! A time line starts at a given instant and is divided into segments, each a
//! run of equally sized time steps. This is the schedule an incremental
//! finite element analysis marches through: ten steps of `0.1`, then four of
//! `0.3`, and so on.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed `SegmentIndex`.
//! * **`segment`**: `Segment<T>`, a validated `(steps, delta)` run, and its `SegmentError`.
//! * **`timeline`**: `TimeLine<T>`, random access to every time point and the
//!   double-ended `TimePoints` iterator.
//! * **`loading`**: `TimeLineLoader`, a whitespace-token text format with `#` comments.
//! * **`config`**: `TimeLineConfig<T>`, the serde layer for JSON and TOML files.
//!
//! ## Design Philosophy
//!
//! 1.  **No drift**: Time points are computed from segment origins, never by
//!     repeated addition, so stepping forward and back again lands on the
//!     same value bit for bit.
//! 2.  **Fail-Fast**: Segments validate on construction; a time line never
//!     holds an empty segment or a non-positive step.

pub mod config;
pub mod index;
pub mod loading;
pub mod segment;
pub mod timeline;
