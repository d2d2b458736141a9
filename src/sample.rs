//! Floating-point widths a [`SampleRing`](crate::SampleRing) can hold.

use core::fmt::Debug;
use core::ops::Sub;

use rand::distributions::uniform::SampleUniform;

/// A floating-point type that can be drawn uniformly and stored in a ring.
///
/// Run parameters and error reports travel as `f64`; `from_f64` narrows a
/// bound to the sample width (rounding to nearest for `f32`).
pub trait RingSample:
    Copy + Default + PartialOrd + Debug + Sub<Output = Self> + SampleUniform + 'static
{
    fn is_finite(self) -> bool;
    fn to_f64(self) -> f64;
    fn from_f64(x: f64) -> Self;
}

impl RingSample for f32 {
    #[inline(always)]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl RingSample for f64 {
    #[inline(always)]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x
    }
}
