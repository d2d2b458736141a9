//! Sign-extraction techniques under measurement.
//!
//! Every technique answers "is this value negative?" and they agree on all
//! non-zero, non-NaN inputs. `branch` follows IEEE ordering, so `-0.0` and
//! negative NaNs read as non-negative there; the other techniques read the
//! sign bit.

const F32_SIGN_SHIFT: u32 = 31;
const F64_SIGN_SHIFT: u32 = 63;

#[inline(always)]
pub fn is_negative_branch_f32(x: f32) -> bool {
    x < 0.0
}

#[inline(always)]
pub fn is_negative_bits_f32(x: f32) -> bool {
    (x.to_bits() >> F32_SIGN_SHIFT) != 0
}

/// Reinterprets the bytes as a signed integer, whose sign is the float's sign bit.
#[inline(always)]
pub fn is_negative_bytes_f32(x: f32) -> bool {
    i32::from_ne_bytes(x.to_ne_bytes()) < 0
}

#[inline(always)]
pub fn is_negative_signbit_f32(x: f32) -> bool {
    x.is_sign_negative()
}

#[inline(always)]
pub fn is_negative_branch_f64(x: f64) -> bool {
    x < 0.0
}

#[inline(always)]
pub fn is_negative_bits_f64(x: f64) -> bool {
    (x.to_bits() >> F64_SIGN_SHIFT) != 0
}

#[inline(always)]
pub fn is_negative_bytes_f64(x: f64) -> bool {
    i64::from_ne_bytes(x.to_ne_bytes()) < 0
}

#[inline(always)]
pub fn is_negative_signbit_f64(x: f64) -> bool {
    x.is_sign_negative()
}

/// Named handle on one technique, for filtering and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Technique {
    Branch,
    Bits,
    Bytes,
    Signbit,
}

impl Technique {
    pub const ALL: [Technique; 4] = [
        Technique::Branch,
        Technique::Bits,
        Technique::Bytes,
        Technique::Signbit,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Technique::Branch => "branch",
            Technique::Bits => "bits",
            Technique::Bytes => "bytes",
            Technique::Signbit => "signbit",
        }
    }

    pub fn apply_f32(self, x: f32) -> bool {
        match self {
            Technique::Branch => is_negative_branch_f32(x),
            Technique::Bits => is_negative_bits_f32(x),
            Technique::Bytes => is_negative_bytes_f32(x),
            Technique::Signbit => is_negative_signbit_f32(x),
        }
    }

    pub fn apply_f64(self, x: f64) -> bool {
        match self {
            Technique::Branch => is_negative_branch_f64(x),
            Technique::Bits => is_negative_bits_f64(x),
            Technique::Bytes => is_negative_bytes_f64(x),
            Technique::Signbit => is_negative_signbit_f64(x),
        }
    }
}
