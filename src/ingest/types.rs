// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Metrics the scoring engine reads. Keys outside this set are ignored;
/// a missing key, empty cell or non-numeric cell reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetricRow {
    pub cutoff_token: f64,
    pub top10_share: f64,
    pub gini_token: f64,
    pub hhi_token: f64,
    pub miss_ratio: f64,
    pub proposal_pass_rate: f64,
    pub gov_turnout_ratio_est: f64,
    pub dev_commits_30d: f64,
    pub apr: f64,
}

impl RawMetricRow {
    /// Build a row from `(metric-name, cell)` pairs. Values are validated here,
    /// once, so no read site needs to guard against NaN or garbage.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = Self::default();
        for (key, cell) in pairs {
            let v = parse_cell(cell);
            match key.trim().to_ascii_lowercase().as_str() {
                "cutoff_token" => row.cutoff_token = v,
                "top10_share" => row.top10_share = v,
                "gini_token" => row.gini_token = v,
                "hhi_token" => row.hhi_token = v,
                "miss_ratio" => row.miss_ratio = v,
                "proposal_pass_rate" => row.proposal_pass_rate = v,
                "gov_turnout_ratio_est" => row.gov_turnout_ratio_est = v,
                "dev_commits_30d" => row.dev_commits_30d = v,
                "apr" => row.apr = v,
                _ => {}
            }
        }
        row
    }
}

/// Empty, non-numeric and non-finite cells all map to 0.
pub fn parse_cell(cell: &str) -> f64 {
    let t = cell.trim().trim_matches('"').trim();
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// One successfully ingested network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub name: String,
    pub row: RawMetricRow,
}

/// A source of one network's metric row.
#[async_trait::async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn fetch_row(&self) -> Result<NetworkMetrics>;
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_ignored_and_garbage_is_zero() {
        let row = RawMetricRow::from_pairs([
            ("apr", "0.12"),
            ("cutoff_token", ""),
            ("miss_ratio", "n/a"),
            ("gini_token", "NaN"),
            ("validators", "180"),
        ]);
        assert_eq!(row.apr, 0.12);
        assert_eq!(row.cutoff_token, 0.0);
        assert_eq!(row.miss_ratio, 0.0);
        assert_eq!(row.gini_token, 0.0);
    }

    #[test]
    fn missing_keys_default_to_zero() {
        let row = RawMetricRow::from_pairs([("apr", "0.2")]);
        assert_eq!(row.dev_commits_30d, 0.0);
        assert_eq!(row.top10_share, 0.0);
    }

    #[test]
    fn quoted_cells_and_infinity() {
        assert_eq!(parse_cell(" \"1500\" "), 1500.0);
        assert_eq!(parse_cell("inf"), 0.0);
        assert_eq!(parse_cell("-0.5"), -0.5);
    }
}
