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

//! # Marching
//!
//! Drives a `TimeTable` from its current point to the end, calling user code
//! once per point. Step monitors observe the march and may stop it early.
//!
//! ## Submodules
//!
//! - `step_monitor`: Core trait (`StepMonitor<T>`), `MarchCommand` and the
//!   per-point `StepContext`.
//! - `composite`: Aggregate multiple monitors into one.
//! - `index`: Strongly typed monitor indices.
//! - `no_op`: A monitor that never interferes.
//! - `step_limit`: Stop after a fixed number of visited points.
//! - `time_limit`: Wall-clock budget with step-filtered clock checks.
//! - `horizon`: Stop once the simulated time reaches a horizon.
//! - `interrupt`: Atomically driven stop flag for cross-thread cancellation.
//! - `log`: Progress lines through `tracing`.
//! - `marcher`: The driver loop itself.

pub mod composite;
pub mod horizon;
pub mod index;
pub mod interrupt;
pub mod log;
pub mod marcher;
pub mod no_op;
pub mod step_limit;
pub mod step_monitor;
pub mod time_limit;
