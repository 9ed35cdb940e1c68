//! Cross-network statistics over unweighted 0–100 sub-scores.
//!
//! Population standard deviation (divide by N). Zero variance yields z = 0.
//! The `entry` channel is reported with its sign inverted: a comfortable
//! margin is shown as a *low* barrier.

use serde::{Deserialize, Serialize};

use super::scoring::RawScoresForStats;
use crate::network::same_network;

/// Mean and population standard deviation of one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl ChannelStats {
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        // Identical values: summing then dividing can drift the mean by an
        // ulp, which would turn "no spread" into z = ±1.
        let first = values[0];
        if values.iter().all(|v| *v == first) {
            return Self {
                mean: first,
                std_dev: 0.0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: var.sqrt(),
        }
    }

    /// `(value - mean) / std_dev`, or 0 when there is no spread.
    pub fn z(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }
}

/// Per-channel statistics for the whole population.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub entry: ChannelStats,
    pub influence: ChannelStats,
    pub network: ChannelStats,
    pub gov_dev: ChannelStats,
    pub profit: ChannelStats,
    pub count: usize,
}

impl PopulationStats {
    pub fn of(all: &[RawScoresForStats]) -> Self {
        let column = |f: fn(&RawScoresForStats) -> f64| -> ChannelStats {
            let v: Vec<f64> = all.iter().map(f).collect();
            ChannelStats::of(&v)
        };
        Self {
            entry: column(|r| r.entry),
            influence: column(|r| r.influence),
            network: column(|r| r.network),
            gov_dev: column(|r| r.gov_dev),
            profit: column(|r| r.profit),
            count: all.len(),
        }
    }

    /// z-scores of one network, with the entry sign flip applied.
    pub fn z_scores(&self, raw: &RawScoresForStats) -> ZScoreSet {
        ZScoreSet {
            entry: invert_entry(self.entry.z(raw.entry)),
            influence: self.influence.z(raw.influence),
            network: self.network.z(raw.network),
            gov_dev: self.gov_dev.z(raw.gov_dev),
            profit: self.profit.z(raw.profit),
        }
    }
}

/// Standard scores of one network; `entry` is already sign-inverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZScoreSet {
    pub entry: f64,
    pub influence: f64,
    pub network: f64,
    pub gov_dev: f64,
    pub profit: f64,
}

/// Entry is a negatively oriented indicator. Involution: `invert(invert(z)) == z`.
/// Zero stays `+0.0` so clients never see `-0`.
pub fn invert_entry(z: f64) -> f64 {
    if z == 0.0 {
        0.0
    } else {
        -z
    }
}

/// z-scores of `selected` against all of `population`. `None` when the
/// population is empty or does not contain `selected`.
pub fn compute_z_scores(
    population: &[(String, RawScoresForStats)],
    selected: &str,
) -> Option<ZScoreSet> {
    let (_, raw) = population.iter().find(|(n, _)| same_network(n, selected))?;
    let all: Vec<RawScoresForStats> = population.iter().map(|(_, r)| *r).collect();
    Some(PopulationStats::of(&all).z_scores(raw))
}
