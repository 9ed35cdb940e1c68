//! Per-network scoring.
//!
//! Five sub-scores in [0,1] are computed from one metric row:
//! - `entry`     : comfort margin of the capital above the stake cutoff
//! - `influence` : how decentralized stake is (room for a newcomer)
//! - `network`   : block production health
//! - `gov_dev`   : governance activity + developer momentum
//! - `profit`    : APR, saturating at `apr_saturation`
//!
//! Pairs are averaged into three categories, each scaled by its normalized
//! weight percentage. Categories are independent; their sum is not capped.

use serde::{Deserialize, Serialize};

use super::weights::{NormalizedWeights, ScoringParams};
use crate::ingest::types::RawMetricRow;

fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Five independent component scores in [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub entry: f64,
    pub influence: f64,
    pub network: f64,
    pub gov_dev: f64,
    pub profit: f64,
}

impl SubScores {
    pub fn to_stats_scale(&self) -> RawScoresForStats {
        RawScoresForStats {
            entry: self.entry * 100.0,
            influence: self.influence * 100.0,
            network: self.network * 100.0,
            gov_dev: self.gov_dev * 100.0,
            profit: self.profit * 100.0,
        }
    }
}

/// Sub-scores on a 0–100 scale, unweighted. Population statistics are
/// computed on these so user weights never leak into the distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScoresForStats {
    pub entry: f64,
    pub influence: f64,
    pub network: f64,
    pub gov_dev: f64,
    pub profit: f64,
}

impl RawScoresForStats {
    /// Channel values in a fixed order: entry, influence, network, gov_dev, profit.
    pub fn channels(&self) -> [f64; 5] {
        [
            self.entry,
            self.influence,
            self.network,
            self.gov_dev,
            self.profit,
        ]
    }
}

/// Weighted category scores; each lies in `[0, weight%]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub market_barriers: f64,
    pub network_governance: f64,
    pub profitability: f64,
}

impl CategoryScores {
    pub fn total(&self) -> f64 {
        self.market_barriers + self.network_governance + self.profitability
    }
}

/// Everything one scoring pass yields for a network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sub: SubScores,
    pub categories: CategoryScores,
    pub raw: RawScoresForStats,
}

pub fn entry_score(cutoff: f64, capital: f64, p: &ScoringParams) -> f64 {
    if cutoff <= 0.0 || capital < cutoff {
        return 0.0;
    }
    clamp01(capital / (p.entry_saturation_multiple * cutoff))
}

pub fn influence_score(row: &RawMetricRow, p: &ScoringParams) -> f64 {
    clamp01(
        p.influence_top10 * (1.0 - row.top10_share)
            + p.influence_gini * (1.0 - row.gini_token)
            + p.influence_hhi * (1.0 - row.hhi_token),
    )
}

pub fn network_score(row: &RawMetricRow) -> f64 {
    clamp01(1.0 - row.miss_ratio)
}

/// Diminishing returns: 100 commits → 0.5, 300 → 0.75.
pub fn dev_score(commits: f64, p: &ScoringParams) -> f64 {
    if commits > 0.0 {
        commits / (commits + p.dev_commits_half_saturation)
    } else {
        0.0
    }
}

pub fn gov_dev_score(row: &RawMetricRow, p: &ScoringParams) -> f64 {
    clamp01(
        p.gov_pass_rate * row.proposal_pass_rate
            + p.gov_turnout * row.gov_turnout_ratio_est
            + p.gov_dev * dev_score(row.dev_commits_30d, p),
    )
}

pub fn profit_score(apr: f64, p: &ScoringParams) -> f64 {
    clamp01(apr / p.apr_saturation)
}

pub fn sub_scores(row: &RawMetricRow, capital: f64, p: &ScoringParams) -> SubScores {
    SubScores {
        entry: entry_score(row.cutoff_token, capital, p),
        influence: influence_score(row, p),
        network: network_score(row),
        gov_dev: gov_dev_score(row, p),
        profit: profit_score(row.apr, p),
    }
}

/// Average sub-score pairs into categories and scale by weight percentage.
pub fn category_scores(sub: &SubScores, w: &NormalizedWeights) -> CategoryScores {
    CategoryScores {
        market_barriers: (sub.entry + sub.influence) / 2.0 * w.pct_market_barriers,
        network_governance: (sub.network + sub.gov_dev) / 2.0 * w.pct_stability,
        profitability: sub.profit * w.pct_revenue,
    }
}

/// Score one network under the given capital and weights. Pure.
pub fn compute_scores(
    row: &RawMetricRow,
    capital: f64,
    weights: &NormalizedWeights,
    p: &ScoringParams,
) -> ScoreBreakdown {
    let sub = sub_scores(row, capital, p);
    ScoreBreakdown {
        sub,
        categories: category_scores(&sub, weights),
        raw: sub.to_stats_scale(),
    }
}

/// Annual reward in currency units for staking `capital` at `apr`.
pub fn profit_estimate(capital: f64, apr: f64) -> f64 {
    (capital * apr).max(0.0)
}
