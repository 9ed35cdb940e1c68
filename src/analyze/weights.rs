//! Weight normalization and runtime-tunable scoring constants.
//!
//! Constants hot-reload from config/scoring.json. Any subset of keys may be
//! given; missing keys keep their defaults:
//! {
//!   "entry_saturation_multiple": 2.0,
//!   "apr_saturation": 0.30,
//!   "dev_commits_half_saturation": 100.0,
//!   "influence_top10": 0.5, "influence_gini": 0.25, "influence_hhi": 0.25,
//!   "gov_pass_rate": 0.4, "gov_turnout": 0.3, "gov_dev": 0.3
//! }
//!
//! On each `current()` call we check the file's modified time and reload if changed.

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::SystemTime,
};

use crate::params::WeightInput;

pub const DEFAULT_SCORING_PATH: &str = "config/scoring.json";

/// Output of the normalizer when every weight is zero.
pub const EQUAL_SPLIT_PCT: f64 = 33.33;

/// Weight percentages. Sum to 100 unless the equal-split fallback applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub pct_revenue: f64,
    pub pct_stability: f64,
    pub pct_market_barriers: f64,
}

impl NormalizedWeights {
    pub fn sum(&self) -> f64 {
        self.pct_revenue + self.pct_stability + self.pct_market_barriers
    }
}

/// `weight_i / sum * 100`; all-zero input falls back to 33.33 each.
pub fn normalize(weights: &WeightInput) -> NormalizedWeights {
    let w = WeightInput::new(weights.revenue, weights.stability, weights.market_barriers);
    let total = (w.revenue + w.stability + w.market_barriers) as f64;
    if total <= 0.0 {
        return NormalizedWeights {
            pct_revenue: EQUAL_SPLIT_PCT,
            pct_stability: EQUAL_SPLIT_PCT,
            pct_market_barriers: EQUAL_SPLIT_PCT,
        };
    }
    NormalizedWeights {
        pct_revenue: w.revenue as f64 / total * 100.0,
        pct_stability: w.stability as f64 / total * 100.0,
        pct_market_barriers: w.market_barriers as f64 / total * 100.0,
    }
}

/// Undo the weighting of one category: `weighted / pct * 100`.
/// A zero percentage carries no information and recovers as 0.
pub fn recover_raw_pct(weighted: f64, pct: f64) -> f64 {
    if pct > 0.0 {
        weighted / pct * 100.0
    } else {
        0.0
    }
}

/// Domain-tuned constants of the sub-score formulas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Entry saturates at `capital = multiple * cutoff`.
    pub entry_saturation_multiple: f64,
    /// APR at which profit saturates.
    pub apr_saturation: f64,
    /// `commits / (commits + k)`.
    pub dev_commits_half_saturation: f64,
    pub influence_top10: f64,
    pub influence_gini: f64,
    pub influence_hhi: f64,
    pub gov_pass_rate: f64,
    pub gov_turnout: f64,
    pub gov_dev: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            entry_saturation_multiple: 2.0,
            apr_saturation: 0.30,
            dev_commits_half_saturation: 100.0,
            influence_top10: 0.5,
            influence_gini: 0.25,
            influence_hhi: 0.25,
            gov_pass_rate: 0.4,
            gov_turnout: 0.3,
            gov_dev: 0.3,
        }
    }
}

impl ScoringParams {
    /// Non-positive divisors would make the formulas meaningless; fall back.
    fn sanitized(mut self) -> Self {
        let d = Self::default();
        if self.entry_saturation_multiple.is_nan() || self.entry_saturation_multiple <= 0.0 {
            self.entry_saturation_multiple = d.entry_saturation_multiple;
        }
        if self.apr_saturation.is_nan() || self.apr_saturation <= 0.0 {
            self.apr_saturation = d.apr_saturation;
        }
        if self.dev_commits_half_saturation.is_nan() || self.dev_commits_half_saturation <= 0.0 {
            self.dev_commits_half_saturation = d.dev_commits_half_saturation;
        }
        self
    }
}

/// Hot-reload wrapper: reloads when the config file mtime changes.
#[derive(Debug)]
pub struct HotReloadScoring {
    path: PathBuf,
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    params: ScoringParams,
    last_modified: Option<SystemTime>,
}

impl HotReloadScoring {
    /// Create with a path (defaults to "config/scoring.json" if `None`).
    pub fn new(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORING_PATH));
        Self {
            path,
            inner: RwLock::new(State {
                params: ScoringParams::default(),
                last_modified: None,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }

    /// Get the latest constants, reloading if the config file changed.
    pub fn current(&self) -> ScoringParams {
        let needs_reload = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(mtime) => self.read().last_modified != Some(mtime),
            // If file isn't there, we keep what we have.
            Err(_) => false,
        };

        if !needs_reload {
            return self.read().params;
        }

        let mut guard = self.write();
        // Double-check in case of races.
        if let Ok(mtime) = fs::metadata(&self.path).and_then(|m| m.modified()) {
            if guard.last_modified != Some(mtime) {
                match load_scoring_file(&self.path) {
                    Ok(p) => {
                        tracing::info!(target: "scoring", path = %self.path.display(), "scoring constants reloaded");
                        guard.params = p;
                    }
                    Err(e) => {
                        tracing::warn!(target: "scoring", error = %e, "scoring constants rejected; keeping previous");
                    }
                }
                guard.last_modified = Some(mtime);
            }
        }
        guard.params
    }
}

/// Load constants directly (no caching). Public for tests/tools.
pub fn load_scoring_file(path: &Path) -> io::Result<ScoringParams> {
    let bytes = fs::read(path)?;
    let p: ScoringParams = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(p.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Write, thread, time::Duration};

    #[test]
    fn normalized_weights_sum_to_100() {
        for (r, s, m) in [(50, 30, 20), (1, 0, 0), (7, 13, 99), (100, 100, 100), (0, 3, 0)] {
            let n = normalize(&WeightInput::new(r, s, m));
            assert!((n.sum() - 100.0).abs() < 1e-9, "{r},{s},{m} -> {}", n.sum());
        }
    }

    #[test]
    fn all_zero_weights_fall_back_to_equal_split() {
        let n = normalize(&WeightInput::new(0, 0, 0));
        assert_eq!(n.pct_revenue, 33.33);
        assert_eq!(n.pct_stability, 33.33);
        assert_eq!(n.pct_market_barriers, 33.33);
    }

    #[test]
    fn unclamped_weights_are_clamped_before_normalizing() {
        let raw = WeightInput {
            revenue: 300,
            stability: 100,
            market_barriers: 0,
        };
        let n = normalize(&raw);
        assert!((n.pct_revenue - 50.0).abs() < 1e-9);
    }

    #[test]
    fn recover_inverts_weighting() {
        let n = normalize(&WeightInput::new(50, 30, 20));
        let weighted = 0.745 * n.pct_stability;
        assert!((recover_raw_pct(weighted, n.pct_stability) - 74.5).abs() < 1e-9);
        assert_eq!(recover_raw_pct(12.0, 0.0), 0.0);
    }

    #[test]
    fn partial_json_keeps_defaults_and_rejects_zero_divisors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoring.json");
        fs::write(&path, r#"{"apr_saturation": 0.0, "gov_dev": 0.5}"#).unwrap();
        let p = load_scoring_file(&path).unwrap();
        assert_eq!(p.apr_saturation, 0.30);
        assert_eq!(p.gov_dev, 0.5);
        assert_eq!(p.entry_saturation_multiple, 2.0);
    }

    #[test]
    fn loads_and_hot_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoring.json");

        let hot = HotReloadScoring::new(Some(path.as_path()));
        // No file yet → defaults
        assert_eq!(hot.current(), ScoringParams::default());

        {
            let mut f = fs::File::create(&path).unwrap();
            write!(f, r#"{{"apr_saturation":0.25}}"#).unwrap();
            f.sync_all().unwrap();
        }
        assert!((hot.current().apr_saturation - 0.25).abs() < f64::EPSILON);

        // Ensure different mtime (coarse filesystems).
        thread::sleep(Duration::from_millis(1100));

        {
            let mut f = fs::File::create(&path).unwrap();
            write!(f, r#"{{"apr_saturation":0.40}}"#).unwrap();
            f.sync_all().unwrap();
        }
        assert!((hot.current().apr_saturation - 0.40).abs() < f64::EPSILON);
    }
}
