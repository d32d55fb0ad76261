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

//! # Numeric Foundations
//!
//! Traits describing what a time value must support and how loosely two time
//! values may be compared.
//!
//! ## Submodules
//!
//! - `checked`: `CheckedTime`, overflow-aware addition and multiplication
//!   for integer and float time types.
//! - `constants`: The `Tolerance` trait with its per-type `MIN_EPSILON`
//!   floor, implemented for every primitive integer and float.
//! - `scalar`: The `TimeScalar` umbrella bound and `steps_to_time`, the
//!   checked conversion of a step count into the time domain.
//!
//! ## Motivation
//!
//! Time stepping accumulates rounding error on floating point types while
//! integer clocks are exact. Keeping the tolerance next to the type lets
//! generic code compare times correctly without per-type branches.

pub mod checked;
pub mod constants;
pub mod scalar;
