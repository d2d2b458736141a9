//! Floating-point sign extraction benchmarks.
//!
//! The benchmarks feed each technique in [`sign`] from a [`SampleRing`], a
//! pre-filled wrap-around buffer whose reads cost a load and a mask.

pub mod config;
pub mod ring;
pub mod sample;
pub mod sign;

pub use config::{BenchConfig, ConfigError, RangeCase, DEFAULT_CASES};
pub use ring::{RingError, SampleRing, Seed, BATCH, DEFAULT_CAPACITY};
pub use sample::RingSample;
pub use sign::Technique;
