//! JSON workload descriptions.
//!
//! A workload file names a full simulation — the level tuples, the
//! processes to admit (a count with random bursts, or an explicit burst
//! list), and the run seed — so one file reproduces one run exactly.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "levels": [
//!     { "capacity": 4, "quantum": 8,  "serve_budget": 32 },
//!     { "capacity": 8, "quantum": 0,  "serve_budget": 128 }
//!   ],
//!   "processes": 20
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::types::Ticks;

/// Default PRNG seed used when no seed is specified.
pub const DEFAULT_SEED: u32 = 42;

/// Errors from parsing or validating a workload description.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// JSON syntax or shape error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The workload defines no levels.
    #[error("workload defines no levels")]
    NoLevels,

    /// A level with capacity 0 can never promote admitted work, so a run
    /// holding any processes would never terminate.
    #[error("level {index}: capacity 0 can never serve admitted work")]
    ZeroCapacity { index: usize },

    /// An explicit burst list contains a zero entry.
    #[error("process burst times must be positive")]
    ZeroBurst,

    /// Seed string was neither a u32 integer nor `"entropy"`.
    #[error("invalid seed {seed:?}: expected a u32 integer or \"entropy\"")]
    InvalidSeed { seed: String },
}

/// One level tuple: admission capacity, quantum (0 = FCFS), and serve
/// budget per scheduling pass.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelSpec {
    pub capacity: usize,
    pub quantum: Ticks,
    pub serve_budget: Ticks,
}

/// The processes to admit: a count (bursts drawn from the factory) or an
/// explicit burst list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProcessesSpec {
    Count(u32),
    Bursts(Vec<Ticks>),
}

/// A complete simulation description.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadSpec {
    /// Run seed; `None` defers to CLI/env/default resolution.
    #[serde(default)]
    pub seed: Option<u32>,
    /// Levels in priority order (index 0 = highest).
    pub levels: Vec<LevelSpec>,
    pub processes: ProcessesSpec,
}

impl WorkloadSpec {
    /// Parse and validate a workload from JSON text.
    pub fn from_json(json: &str) -> Result<Self, WorkloadError> {
        let spec: WorkloadSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), WorkloadError> {
        if self.levels.is_empty() {
            return Err(WorkloadError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.capacity == 0 {
                return Err(WorkloadError::ZeroCapacity { index });
            }
        }
        if let ProcessesSpec::Bursts(bursts) = &self.processes {
            if bursts.iter().any(|&b| b == 0) {
                return Err(WorkloadError::ZeroBurst);
            }
        }
        Ok(())
    }

    /// Number of processes this workload admits.
    pub fn nr_processes(&self) -> usize {
        match &self.processes {
            ProcessesSpec::Count(n) => *n as usize,
            ProcessesSpec::Bursts(bursts) => bursts.len(),
        }
    }
}

/// Parse a seed string: a u32 integer or `"entropy"` for OS randomness.
///
/// Returns [`DEFAULT_SEED`] for `None` or empty strings. An entropy seed
/// is logged so the run can be reproduced later.
pub fn parse_seed(s: Option<&str>) -> Result<u32, WorkloadError> {
    match s {
        None | Some("") => Ok(DEFAULT_SEED),
        Some(s) if s.eq_ignore_ascii_case("entropy") => {
            let seed = entropy_seed();
            // Avoid seed 0, a fixed point for xorshift.
            let seed = if seed == 0 { 1 } else { seed };
            warn!(
                seed,
                "seed=entropy: seeding PRNG from OS randomness \
                 (set seed={seed} to reproduce this run)"
            );
            Ok(seed)
        }
        Some(s) => s
            .parse::<u32>()
            .map_err(|_| WorkloadError::InvalidSeed { seed: s.to_string() }),
    }
}

/// Four bytes from /dev/urandom, with a pid-xor-timestamp fallback.
fn entropy_seed() -> u32 {
    use std::io::Read;
    let mut buf = [0u8; 4];
    std::fs::File::open("/dev/urandom")
        .and_then(|mut f| f.read_exact(&mut buf).map(|_| u32::from_le_bytes(buf)))
        .unwrap_or_else(|_| {
            let pid = std::process::id();
            let ts = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32)
                .unwrap_or(0);
            pid ^ ts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_workload() {
        let spec = WorkloadSpec::from_json(
            r#"{
                "seed": 7,
                "levels": [
                    { "capacity": 2, "quantum": 4, "serve_budget": 16 },
                    { "capacity": 4, "quantum": 0, "serve_budget": 64 }
                ],
                "processes": 10
            }"#,
        )
        .unwrap();
        assert_eq!(spec.seed, Some(7));
        assert_eq!(spec.levels.len(), 2);
        assert!(matches!(spec.processes, ProcessesSpec::Count(10)));
        assert_eq!(spec.nr_processes(), 10);
    }

    #[test]
    fn test_parse_burst_list_workload() {
        let spec = WorkloadSpec::from_json(
            r#"{
                "levels": [{ "capacity": 1, "quantum": 0, "serve_budget": 100 }],
                "processes": [30, 12, 5]
            }"#,
        )
        .unwrap();
        assert_eq!(spec.seed, None);
        assert_eq!(spec.nr_processes(), 3);
    }

    #[test]
    fn test_empty_levels_rejected() {
        let err = WorkloadSpec::from_json(r#"{ "levels": [], "processes": 1 }"#).unwrap_err();
        assert!(matches!(err, WorkloadError::NoLevels));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = WorkloadSpec::from_json(
            r#"{
                "levels": [{ "capacity": 0, "quantum": 4, "serve_budget": 16 }],
                "processes": 1
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, WorkloadError::ZeroCapacity { index: 0 }));
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = WorkloadSpec::from_json(
            r#"{
                "levels": [{ "capacity": 1, "quantum": 0, "serve_budget": 10 }],
                "processes": [5, 0, 3]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, WorkloadError::ZeroBurst));
    }

    #[test]
    fn test_parse_seed_values() {
        assert_eq!(parse_seed(None).unwrap(), DEFAULT_SEED);
        assert_eq!(parse_seed(Some("")).unwrap(), DEFAULT_SEED);
        assert_eq!(parse_seed(Some("123")).unwrap(), 123);
        assert!(parse_seed(Some("not-a-seed")).is_err());
    }

    #[test]
    fn test_entropy_seed_never_zero() {
        let seed = parse_seed(Some("entropy")).unwrap();
        assert_ne!(seed, 0);
    }
}
