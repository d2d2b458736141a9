//! Pre-filled wrap-around sample ring.
//!
//! The ring is filled once at construction and only read afterwards. Reads
//! index the backing array with a power-of-two mask, so the hot path is a
//! load, an add and an AND. Anything more would be timed together with the
//! sign-extraction technique under test.

use core::fmt;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::sample::RingSample;

/// Number of slots in a ring unless the caller picks another capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Number of samples handed out by one [`SampleRing::get_8`] call.
pub const BATCH: usize = 8;

/// Where a ring's random source gets its initial state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Seed {
    /// Fresh OS entropy on every construction.
    #[default]
    Entropy,
    /// Fixed state, for reproducible runs.
    Fixed(u64),
}

impl Seed {
    pub fn rng(self) -> StdRng {
        match self {
            Seed::Entropy => StdRng::from_entropy(),
            Seed::Fixed(state) => StdRng::seed_from_u64(state),
        }
    }
}

/// Rejected construction range. Bounds are reported widened to `f64`.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum RingError {
    #[error("sample range [{from}, {to}) has a non-finite bound")]
    NonFinite { from: f64, to: f64 },
    #[error("sample range [{from}, {to}) is empty")]
    EmptyRange { from: f64, to: f64 },
    #[error("sample range [{from}, {to}) is wider than the sample type can represent")]
    SpanOverflow { from: f64, to: f64 },
}

/// Checks that `[from, to)` can be sampled uniformly at width `T`.
pub fn check_range<T: RingSample>(from: T, to: T) -> Result<(), RingError> {
    let (lo, hi) = (from.to_f64(), to.to_f64());
    if !from.is_finite() || !to.is_finite() {
        return Err(RingError::NonFinite { from: lo, to: hi });
    }
    if to <= from {
        return Err(RingError::EmptyRange { from: lo, to: hi });
    }
    if !(to - from).is_finite() {
        return Err(RingError::SpanOverflow { from: lo, to: hi });
    }
    Ok(())
}

/// Fixed-capacity ring of uniform samples over `[from, to)`.
///
/// `N` must be a power of two and at least [`BATCH`]; other capacities fail
/// to compile as soon as a ring of that size is built.
///
/// # Read styles
///
/// A ring is read either through [`get`](Self::get) or through
/// [`get_8`](Self::get_8), never both. `get` leaves the cursor running freely
/// and masks on every read; `get_8` relies on the cursor being a batch-aligned
/// slot index on entry and only reduces it after the batch. Mixing the two on
/// one instance is a contract violation: debug builds assert on it, release
/// builds hand out unspecified (but in-range, in-bounds) samples.
#[derive(Clone)]
pub struct SampleRing<T, const N: usize = DEFAULT_CAPACITY> {
    values: [T; N],
    cursor: usize,
}

impl<T: RingSample, const N: usize> SampleRing<T, N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "sample ring capacity must be a power of two");
        assert!(N >= BATCH, "sample ring capacity must hold at least one batch");
        N - 1
    };

    // Largest batch-aligned start whose batch still fits in the array.
    const BATCH_MASK: usize = Self::MASK & !(BATCH - 1);

    /// Fills a ring from OS entropy.
    pub fn new(from: T, to: T) -> Result<Self, RingError> {
        Self::with_seed(from, to, Seed::Entropy)
    }

    /// Fills a ring from a random source initialised per `seed`.
    ///
    /// The range is validated before any entropy is consumed.
    pub fn with_seed(from: T, to: T, seed: Seed) -> Result<Self, RingError> {
        check_range(from, to)?;
        debug!(
            capacity = N,
            from = from.to_f64(),
            to = to.to_f64(),
            seed = ?seed,
            "filling sample ring"
        );
        Self::from_rng(from, to, &mut seed.rng())
    }

    /// Fills a ring by drawing `N` samples from a caller-owned generator.
    pub fn from_rng<R: Rng + ?Sized>(from: T, to: T, rng: &mut R) -> Result<Self, RingError> {
        let _ = Self::MASK;
        check_range(from, to)?;
        let dist = Uniform::new(from, to);
        let mut values = [T::default(); N];
        for slot in values.iter_mut() {
            *slot = dist.sample(rng);
        }
        Ok(Self { values, cursor: 0 })
    }

    /// Returns the sample under the cursor and advances it by one.
    #[inline(always)]
    pub fn get(&mut self) -> T {
        let at = self.cursor;
        self.cursor = at.wrapping_add(1);
        self.values[at & Self::MASK]
    }

    /// Copies the next [`BATCH`] samples into `out` and advances by one batch.
    ///
    /// The eight slots are read at consecutive unmasked offsets from the
    /// cursor; the cursor is reduced modulo the capacity afterwards. Must not
    /// be mixed with [`get`](Self::get) on the same ring.
    #[inline(always)]
    pub fn get_8(&mut self, out: &mut [T; BATCH]) {
        let at = self.cursor;
        debug_assert!(
            at % BATCH == 0 && at < N,
            "get_8 on a ring that was also read with get (cursor {at})"
        );
        // No-op for a cursor that only get_8 has moved.
        let at = at & Self::BATCH_MASK;
        out.copy_from_slice(&self.values[at..at + BATCH]);
        self.cursor = (at + BATCH) & Self::MASK;
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Raw cursor; grows without bound under `get`, stays below `N` under `get_8`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Slot the next read starts at.
    pub fn position(&self) -> usize {
        self.cursor & Self::MASK
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T, const N: usize> fmt::Debug for SampleRing<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleRing")
            .field("capacity", &N)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
