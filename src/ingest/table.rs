// src/ingest/table.rs
//! Two-line metric tables: a header of metric names and a single data line,
//! positionally aligned.
//!
//! ```text
//! cutoff_token,top10_share,gini_token,...,apr
//! 1000,0.5,0.4,...,0.15
//! ```

use anyhow::{anyhow, Context, Result};

use crate::ingest::types::RawMetricRow;

/// Parse one network's table. Errors when the header or the data line is
/// missing; individual bad cells never fail the row.
pub fn parse_metric_table(body: &str) -> Result<RawMetricRow> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers().context("reading metric header line")?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(anyhow!("metric table has no header line"));
    }

    let record = reader
        .records()
        .next()
        .ok_or_else(|| anyhow!("metric table has no data line"))?
        .context("reading metric data line")?;

    // Short data lines leave trailing metrics absent (→ 0).
    let pairs = headers.iter().zip(record.iter());
    Ok(RawMetricRow::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_data_line() {
        let body = "cutoff_token,top10_share,apr\n1000,0.5,0.15\n";
        let row = parse_metric_table(body).unwrap();
        assert_eq!(row.cutoff_token, 1000.0);
        assert_eq!(row.top10_share, 0.5);
        assert_eq!(row.apr, 0.15);
    }

    #[test]
    fn empty_and_text_cells_become_zero() {
        let body = "cutoff_token,miss_ratio,apr\n,abc,0.2";
        let row = parse_metric_table(body).unwrap();
        assert_eq!(row.cutoff_token, 0.0);
        assert_eq!(row.miss_ratio, 0.0);
        assert_eq!(row.apr, 0.2);
    }

    #[test]
    fn missing_data_line_is_rejected() {
        assert!(parse_metric_table("cutoff_token,apr\n").is_err());
        assert!(parse_metric_table("").is_err());
    }

    #[test]
    fn short_data_line_leaves_trailing_metrics_zero() {
        let row = parse_metric_table("apr,cutoff_token\n0.1").unwrap();
        assert_eq!(row.apr, 0.1);
        assert_eq!(row.cutoff_token, 0.0);
    }
}
