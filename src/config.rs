//! Run parameters for the benchmarks: value ranges, seeding and name filter.
//!
//! Everything is read from the environment and the bench binary's arguments:
//!
//! * `FASTSIGN_RANGES` — comma-separated `from:to` pairs replacing
//!   [`DEFAULT_CASES`], e.g. `-1000000:-1024,1024:1000000`.
//! * `FASTSIGN_SEED` — decimal or `0x`-prefixed `u64`; rings are filled
//!   from OS entropy when unset.
//! * `FASTSIGN_BENCH_ONLY`, `--only <name>` or the first positional
//!   argument — substring filter on benchmark names.

use std::env;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ring::{check_range, RingError, SampleRing, Seed};
use crate::sample::RingSample;

pub const RANGES_ENV: &str = "FASTSIGN_RANGES";
pub const SEED_ENV: &str = "FASTSIGN_SEED";
pub const ONLY_ENV: &str = "FASTSIGN_BENCH_ONLY";

/// Half-open `[from, to)` value range one benchmark case draws from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeCase {
    pub from: f64,
    pub to: f64,
}

/// All-negative, all-positive and mixed-sign inputs.
pub const DEFAULT_CASES: [RangeCase; 3] = [
    RangeCase::new(-1_000_000.0, -1024.0),
    RangeCase::new(1024.0, 1_000_000.0),
    RangeCase::new(-1_000_000.0, 1_000_000.0),
];

impl RangeCase {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn label(&self) -> String {
        format!("{}..{}", self.from, self.to)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(self.from, self.to)?;
        Ok(())
    }

    /// Builds a ring for this case, narrowing the bounds to `T`.
    ///
    /// Narrowing can collapse a valid `f64` range, so the check is repeated
    /// at sample width.
    pub fn ring<T: RingSample, const N: usize>(
        &self,
        seed: Seed,
    ) -> Result<SampleRing<T, N>, RingError> {
        SampleRing::with_seed(T::from_f64(self.from), T::from_f64(self.to), seed)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("malformed range `{0}`, expected `from:to`")]
    MalformedRange(String),
    #[error("range `{range}` has an unparsable bound `{bound}`")]
    InvalidBound { range: String, bound: String },
    #[error(transparent)]
    Range(#[from] RingError),
    #[error("invalid seed `{0}`, expected a decimal or 0x-prefixed u64")]
    InvalidSeed(String),
    #[error("FASTSIGN_RANGES is set but lists no ranges")]
    NoRanges,
}

pub fn parse_ranges(spec: &str) -> Result<Vec<RangeCase>, ConfigError> {
    let mut cases = Vec::new();
    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (from, to) = item
            .split_once(':')
            .ok_or_else(|| ConfigError::MalformedRange(item.to_string()))?;
        let bound = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidBound {
                    range: item.to_string(),
                    bound: raw.trim().to_string(),
                })
        };
        let case = RangeCase::new(bound(from)?, bound(to)?);
        case.validate()?;
        cases.push(case);
    }
    if cases.is_empty() {
        return Err(ConfigError::NoRanges);
    }
    Ok(cases)
}

pub fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => raw.replace('_', "").parse::<u64>(),
    };
    parsed.map_err(|_| ConfigError::InvalidSeed(raw.to_string()))
}

/// Name filter from `--only <name>` or the first positional argument.
pub fn only_from_args<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--only" {
            if let Some(value) = iter.next() {
                let value = value.trim().to_lowercase();
                if !value.is_empty() {
                    return Some(value);
                }
            }
        } else if !arg.starts_with('-') {
            let value = arg.trim().to_lowercase();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    pub cases: Vec<RangeCase>,
    pub seed: Seed,
    pub only: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            cases: DEFAULT_CASES.to_vec(),
            seed: Seed::Entropy,
            only: None,
        }
    }
}

impl BenchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(|key| env::var(key).ok(), env::args().skip(1))
    }

    /// Same as [`from_env`](Self::from_env) over explicit lookups, so tests
    /// don't have to touch the process environment.
    pub fn from_sources<F, I>(var: F, args: I) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();

        if let Some(raw) = var(RANGES_ENV) {
            config.cases = parse_ranges(&raw)?;
            debug!(count = config.cases.len(), "using ranges from FASTSIGN_RANGES");
        }

        if let Some(raw) = var(SEED_ENV).filter(|v| !v.trim().is_empty()) {
            config.seed = Seed::Fixed(parse_seed(&raw)?);
        }

        config.only = var(ONLY_ENV)
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .or_else(|| only_from_args(args));

        if let Seed::Fixed(state) = config.seed {
            warn!(seed = state, "sample rings use a fixed seed; inputs repeat across runs");
        }
        Ok(config)
    }

    pub fn enabled(&self, name: &str) -> bool {
        match &self.only {
            Some(filter) => name.to_lowercase().contains(filter),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_environment() {
        let config = BenchConfig::from_sources(vars(&[]), args(&["--bench"])).unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.cases.len(), 3);
        assert!(config.enabled("anything"));
    }

    #[test]
    fn parses_range_list() {
        let cases = parse_ranges(" -1:1 , 1e3:2e3,").unwrap();
        assert_eq!(
            cases,
            vec![RangeCase::new(-1.0, 1.0), RangeCase::new(1000.0, 2000.0)]
        );
    }

    #[test]
    fn rejects_bad_ranges() {
        assert_eq!(
            parse_ranges("5"),
            Err(ConfigError::MalformedRange("5".into()))
        );
        assert_eq!(
            parse_ranges("a:1"),
            Err(ConfigError::InvalidBound {
                range: "a:1".into(),
                bound: "a".into()
            })
        );
        assert_eq!(
            parse_ranges("3:3"),
            Err(ConfigError::Range(RingError::EmptyRange { from: 3.0, to: 3.0 }))
        );
        assert!(matches!(
            parse_ranges("NaN:1"),
            Err(ConfigError::Range(RingError::NonFinite { .. }))
        ));
        assert_eq!(parse_ranges(" , "), Err(ConfigError::NoRanges));
    }

    #[test]
    fn parses_seeds() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert_eq!(parse_seed("0xdead_beef"), Ok(0xdead_beef));
        assert_eq!(parse_seed(" 1_000 "), Ok(1000));
        assert_eq!(
            parse_seed("-1"),
            Err(ConfigError::InvalidSeed("-1".into()))
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = BenchConfig::from_sources(
            vars(&[
                (RANGES_ENV, "0:1"),
                (SEED_ENV, "0x10"),
                (ONLY_ENV, " Signbit "),
            ]),
            args(&["branch"]),
        )
        .unwrap();
        assert_eq!(config.cases, vec![RangeCase::new(0.0, 1.0)]);
        assert_eq!(config.seed, Seed::Fixed(16));
        assert_eq!(config.only.as_deref(), Some("signbit"));
        assert!(config.enabled("single/SIGNBIT"));
        assert!(!config.enabled("single/branch"));
    }

    #[test]
    fn filter_from_arguments() {
        assert_eq!(
            only_from_args(args(&["--bench", "--only", "Bits"])),
            Some("bits".into())
        );
        assert_eq!(only_from_args(args(&["--bench", "read"])), Some("read".into()));
        assert_eq!(only_from_args(args(&["--bench", "--only"])), None);
    }

    #[test]
    fn labels_and_narrowing() {
        assert_eq!(DEFAULT_CASES[0].label(), "-1000000..-1024");
        let ring = DEFAULT_CASES[2]
            .ring::<f32, 64>(Seed::Fixed(9))
            .unwrap();
        assert!(ring
            .as_slice()
            .iter()
            .all(|&x| (-1_000_000.0..1_000_000.0).contains(&x)));

        let collapsed = RangeCase::new(1.0, 1.0 + 1e-12);
        assert!(collapsed.validate().is_ok());
        assert!(matches!(
            collapsed.ring::<f32, 8>(Seed::Fixed(0)),
            Err(RingError::EmptyRange { .. })
        ));
    }
}
