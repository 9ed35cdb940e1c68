// src/analyze/mod.rs
//! Scoring pipeline entry: population → per-network scores → ranking,
//! and population → statistics → single-network report.
//!
//! Every function here is pure over its inputs; callers pass the search
//! parameters and scoring constants explicitly on each recomputation.

pub mod rank;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod weights;

use serde::Serialize;

use crate::params::SearchParameters;
use crate::store::Population;

// Re-export convenient types.
pub use crate::analyze::rank::{rank, RankedNetwork, RankingMode};
pub use crate::analyze::report::NetworkReport;
pub use crate::analyze::scoring::{compute_scores, CategoryScores, RawScoresForStats, ScoreBreakdown};
pub use crate::analyze::stats::{compute_z_scores, PopulationStats, ZScoreSet};
pub use crate::analyze::weights::{normalize, HotReloadScoring, NormalizedWeights, ScoringParams};

/// One network after a scoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredNetwork {
    pub name: String,
    pub apr: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score every network of the population, in population order.
pub fn score_population(
    population: &Population,
    params: &SearchParameters,
    sp: &ScoringParams,
) -> Vec<ScoredNetwork> {
    let weights = normalize(&params.weights);
    population
        .networks
        .iter()
        .map(|n| ScoredNetwork {
            name: n.name.clone(),
            apr: n.row.apr,
            breakdown: compute_scores(&n.row, params.capital, &weights, sp),
        })
        .collect()
}

/// Ranked sequence for the current mode. `None` parameters means no search
/// has been submitted yet.
pub fn ranking(
    population: &Population,
    params: Option<&SearchParameters>,
    sp: &ScoringParams,
) -> Vec<RankedNetwork> {
    match params {
        None => {
            let unscored = population
                .networks
                .iter()
                .map(|n| RankedNetwork {
                    name: n.name.clone(),
                    scores: CategoryScores::default(),
                })
                .collect();
            rank(unscored, RankingMode::Uninitialized)
        }
        Some(p) => {
            let scored = score_population(population, p, sp)
                .into_iter()
                .map(|s| RankedNetwork {
                    name: s.name,
                    scores: s.breakdown.categories,
                })
                .collect();
            let out = rank(scored, RankingMode::Computed);
            tracing::debug!(
                target: "scoring",
                networks = out.len(),
                capital = p.capital,
                top = out.first().map(|n| n.name.as_str()).unwrap_or(""),
                "ranking recomputed"
            );
            out
        }
    }
}

/// Detail report for `name`, with z-scores against the whole population.
/// `None` when the network is not part of the population.
pub fn network_report(
    population: &Population,
    name: &str,
    params: &SearchParameters,
    sp: &ScoringParams,
) -> Option<NetworkReport> {
    let scored = score_population(population, params, sp);
    let raw: Vec<(String, RawScoresForStats)> =
        scored.iter().map(|s| (s.name.clone(), s.breakdown.raw)).collect();
    let z = compute_z_scores(&raw, name)?;
    let hit = scored
        .iter()
        .find(|s| crate::network::same_network(&s.name, name))?;

    Some(NetworkReport::build(
        &hit.name,
        hit.breakdown.categories,
        hit.breakdown.raw,
        z,
        &normalize(&params.weights),
        params.capital,
        hit.apr,
        scored.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::{NetworkMetrics, RawMetricRow};
    use crate::params::WeightInput;

    fn pop() -> Population {
        let mk = |name: &str, apr: f64| NetworkMetrics {
            name: name.into(),
            row: RawMetricRow {
                apr,
                ..Default::default()
            },
        };
        Population::new(vec![mk("OSMOSIS", 0.05), mk("AKASH", 0.30), mk("KAVA", 0.15)])
    }

    #[test]
    fn ranking_without_search_is_alphabetical() {
        let out = ranking(&pop(), None, &ScoringParams::default());
        let names: Vec<_> = out.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["AKASH", "KAVA", "OSMOSIS"]);
    }

    #[test]
    fn ranking_with_search_orders_by_total() {
        let p = SearchParameters::new(500.0, WeightInput::new(100, 0, 0));
        let out = ranking(&pop(), Some(&p), &ScoringParams::default());
        let names: Vec<_> = out.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["AKASH", "KAVA", "OSMOSIS"]);
        assert!((out[0].total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn report_for_unknown_network_is_none() {
        let p = SearchParameters::default();
        assert!(network_report(&pop(), "juno", &p, &ScoringParams::default()).is_none());
        let r = network_report(&pop(), "kava", &p, &ScoringParams::default()).unwrap();
        assert_eq!(r.name, "KAVA");
        assert_eq!(r.population, 3);
    }
}
