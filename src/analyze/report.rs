//! Detail view of one network: everything the single-network panels show.

use serde::{Deserialize, Serialize};

use super::scoring::{profit_estimate, CategoryScores, RawScoresForStats};
use super::stats::ZScoreSet;
use super::weights::{recover_raw_pct, NormalizedWeights};

/// Each of the five raw scores as a rounded share of their total, in %.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreShares {
    pub entry: u32,
    pub influence: u32,
    pub network: u32,
    pub gov_dev: u32,
    pub profit: u32,
}

/// All-zero when the total is zero (empty donut).
pub fn score_shares(raw: &RawScoresForStats) -> ScoreShares {
    let total: f64 = raw.channels().iter().sum();
    if total <= 0.0 {
        return ScoreShares::default();
    }
    let pct = |v: f64| (v / total * 100.0).round().max(0.0) as u32;
    ScoreShares {
        entry: pct(raw.entry),
        influence: pct(raw.influence),
        network: pct(raw.network),
        gov_dev: pct(raw.gov_dev),
        profit: pct(raw.profit),
    }
}

/// Category scores with the user weighting undone, each in [0,100].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategoryPct {
    pub market_barriers: f64,
    pub network_governance: f64,
    pub profitability: f64,
}

pub fn recover_categories(c: &CategoryScores, w: &NormalizedWeights) -> RawCategoryPct {
    RawCategoryPct {
        market_barriers: display_pct(recover_raw_pct(c.market_barriers, w.pct_market_barriers)),
        network_governance: display_pct(recover_raw_pct(c.network_governance, w.pct_stability)),
        profitability: display_pct(recover_raw_pct(c.profitability, w.pct_revenue)),
    }
}

/// Clamp for bar displays.
pub fn display_pct(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub name: String,
    pub categories: CategoryScores,
    pub raw_scores: RawScoresForStats,
    pub z_scores: ZScoreSet,
    pub shares: ScoreShares,
    pub raw_categories: RawCategoryPct,
    pub apr: f64,
    pub profit_estimate: f64,
    pub population: usize,
}

impl NetworkReport {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        name: &str,
        categories: CategoryScores,
        raw_scores: RawScoresForStats,
        z_scores: ZScoreSet,
        weights: &NormalizedWeights,
        capital: f64,
        apr: f64,
        population: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            categories,
            raw_scores,
            z_scores,
            shares: score_shares(&raw_scores),
            raw_categories: recover_categories(&categories, weights),
            apr,
            profit_estimate: profit_estimate(capital, apr),
            population,
        }
    }
}
