//! Ranking of scored networks.
//!
//! - Uninitialized (no search submitted): by name ascending, all scores zero.
//! - Computed: by category total descending. `sort_by` is stable, so exact
//!   ties keep their input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::scoring::CategoryScores;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    Uninitialized,
    Computed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedNetwork {
    pub name: String,
    pub scores: CategoryScores,
}

impl RankedNetwork {
    pub fn total(&self) -> f64 {
        self.scores.total()
    }
}

/// Rebuild the ordered sequence from scratch.
pub fn rank(mut networks: Vec<RankedNetwork>, mode: RankingMode) -> Vec<RankedNetwork> {
    match mode {
        RankingMode::Uninitialized => {
            for n in networks.iter_mut() {
                n.scores = CategoryScores::default();
            }
            networks.sort_by(|a, b| a.name.cmp(&b.name));
        }
        RankingMode::Computed => {
            networks.sort_by(|a, b| b.total().partial_cmp(&a.total()).unwrap_or(Ordering::Equal));
        }
    }
    networks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rn(name: &str, total: f64) -> RankedNetwork {
        RankedNetwork {
            name: name.into(),
            scores: CategoryScores {
                market_barriers: total,
                network_governance: 0.0,
                profitability: 0.0,
            },
        }
    }

    fn names(v: &[RankedNetwork]) -> Vec<&str> {
        v.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn uninitialized_sorts_by_name_and_zeroes_scores() {
        let out = rank(
            vec![rn("OSMOSIS", 9.0), rn("ATOMONE", 1.0), rn("COSMOS HUB", 5.0)],
            RankingMode::Uninitialized,
        );
        assert_eq!(names(&out), vec!["ATOMONE", "COSMOS HUB", "OSMOSIS"]);
        assert!(out.iter().all(|n| n.total() == 0.0));
    }

    #[test]
    fn computed_sorts_descending_with_stable_ties() {
        let out = rank(
            vec![rn("B", 10.0), rn("A", 30.0), rn("D", 10.0), rn("C", 10.0)],
            RankingMode::Computed,
        );
        assert_eq!(names(&out), vec!["A", "B", "D", "C"]);
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(rank(Vec::new(), RankingMode::Computed).is_empty());
    }
}
