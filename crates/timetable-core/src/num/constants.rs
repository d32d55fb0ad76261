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

/// A trait for time types that carry a comparison tolerance.
///
/// Integer types compare exactly, so their tolerance is always zero.
/// Floating point types carry a small positive floor below which a
/// requested tolerance is never allowed to drop.
///
/// # Examples
///
/// ```rust
/// # use timetable_core::num::constants::Tolerance;
///
/// assert_eq!(<i32 as Tolerance>::MIN_EPSILON, 0);
/// assert_eq!(f64::clamp_epsilon(0.0), 1e-14);
/// assert_eq!(f32::clamp_epsilon(0.5), 0.5);
/// assert_eq!(i64::clamp_epsilon(3), 0);
/// ```
pub trait Tolerance: Sized {
    /// The smallest tolerance used when comparing values of this type.
    const MIN_EPSILON: Self;

    /// Returns the tolerance actually used when `requested` is asked for.
    fn clamp_epsilon(requested: Self) -> Self;
}

macro_rules! impl_exact_tolerance_for {
    ($($t:ty),*) => {
        $(
            impl Tolerance for $t {
                const MIN_EPSILON: Self = 0;

                #[inline]
                fn clamp_epsilon(_requested: Self) -> Self {
                    Self::MIN_EPSILON
                }
            }
        )*
    };
}

macro_rules! impl_float_tolerance_for {
    ($t:ty, $floor:expr) => {
        impl Tolerance for $t {
            const MIN_EPSILON: Self = $floor;

            #[inline]
            fn clamp_epsilon(requested: Self) -> Self {
                if requested > Self::MIN_EPSILON {
                    requested
                } else {
                    Self::MIN_EPSILON
                }
            }
        }
    };
}

impl_exact_tolerance_for!(i8, i16, i32, i64, i128, isize);
impl_exact_tolerance_for!(u8, u16, u32, u64, u128, usize);

impl_float_tolerance_for!(f32, 0.00001);
impl_float_tolerance_for!(f64, 0.00000000000001);
