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

use core::ops::{Add, Mul};

/// Addition and multiplication that report when the result leaves the
/// representable range of a time type.
///
/// Integers delegate to their `checked_*` methods. Floats only fail when the
/// result is no longer finite.
///
/// # Examples
///
/// ```rust
/// # use timetable_core::num::checked::CheckedTime;
///
/// assert_eq!(100_000_i32.checked_time_mul(100_000), None);
/// assert_eq!(300_i32.checked_time_mul(2), Some(600));
/// assert_eq!(250_u8.checked_time_add(10), None);
/// assert_eq!(f64::MAX.checked_time_mul(2.0), None);
/// assert_eq!(1.5_f64.checked_time_add(2.0), Some(3.5));
/// ```
pub trait CheckedTime: Sized + Add<Self, Output = Self> + Mul<Self, Output = Self> {
    /// Returns `self + v`, or `None` if the sum is not representable.
    fn checked_time_add(self, v: Self) -> Option<Self>;

    /// Returns `self * v`, or `None` if the product is not representable.
    fn checked_time_mul(self, v: Self) -> Option<Self>;
}

macro_rules! impl_integer_checked_time_for {
    ($($t:ty),*) => {
        $(
            impl CheckedTime for $t {
                #[inline(always)]
                fn checked_time_add(self, v: $t) -> Option<$t> {
                    <$t>::checked_add(self, v)
                }

                #[inline(always)]
                fn checked_time_mul(self, v: $t) -> Option<$t> {
                    <$t>::checked_mul(self, v)
                }
            }
        )*
    };
}

macro_rules! impl_float_checked_time_for {
    ($($t:ty),*) => {
        $(
            impl CheckedTime for $t {
                #[inline(always)]
                fn checked_time_add(self, v: $t) -> Option<$t> {
                    Some(self + v).filter(|r| r.is_finite())
                }

                #[inline(always)]
                fn checked_time_mul(self, v: $t) -> Option<$t> {
                    Some(self * v).filter(|r| r.is_finite())
                }
            }
        )*
    };
}

impl_integer_checked_time_for!(i8, i16, i32, i64, i128, isize);
impl_integer_checked_time_for!(u8, u16, u32, u64, u128, usize);
impl_float_checked_time_for!(f32, f64);
