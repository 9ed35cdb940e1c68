//! # Search Parameters
//! The user's capital and weight inputs, sanitized once and then passed by
//! value into every recomputation.
//!
//! Sanitization never rejects: blank or unparsable text falls back to the
//! documented default, numbers are clamped into range.

use serde::{Deserialize, Serialize};

pub const CAPITAL_MIN: f64 = 50.0;
pub const CAPITAL_MAX: f64 = 2000.0;
pub const DEFAULT_CAPITAL: f64 = CAPITAL_MIN;

pub const WEIGHT_MIN: u32 = 0;
pub const WEIGHT_MAX: u32 = 100;
/// A blank weight field means "no preference": three blanks normalize to an
/// equal split.
pub const DEFAULT_WEIGHT_INPUT: u32 = 33;

/// Raw weight inputs, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightInput {
    pub revenue: u32,
    pub stability: u32,
    pub market_barriers: u32,
}

impl WeightInput {
    /// Clamp each field into `[0, 100]`.
    pub fn new(revenue: u32, stability: u32, market_barriers: u32) -> Self {
        fn c(x: u32) -> u32 {
            x.clamp(WEIGHT_MIN, WEIGHT_MAX)
        }
        Self {
            revenue: c(revenue),
            stability: c(stability),
            market_barriers: c(market_barriers),
        }
    }
}

impl Default for WeightInput {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_INPUT, DEFAULT_WEIGHT_INPUT, DEFAULT_WEIGHT_INPUT)
    }
}

/// Everything a scoring pass needs from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub capital: f64,
    pub weights: WeightInput,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            capital: DEFAULT_CAPITAL,
            weights: WeightInput::default(),
        }
    }
}

impl SearchParameters {
    pub fn new(capital: f64, weights: WeightInput) -> Self {
        Self {
            capital: clamp_capital(capital),
            weights,
        }
    }

    /// Build from free-text form fields.
    pub fn from_text(capital: &str, revenue: &str, stability: &str, market_barriers: &str) -> Self {
        Self {
            capital: sanitize_capital(capital),
            weights: WeightInput::new(
                sanitize_weight(revenue),
                sanitize_weight(stability),
                sanitize_weight(market_barriers),
            ),
        }
    }
}

fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Non-finite capital falls back to the default; finite values are clamped.
pub fn clamp_capital(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(CAPITAL_MIN, CAPITAL_MAX)
    } else {
        DEFAULT_CAPITAL
    }
}

/// Numeric weight entry: fractions truncate, then clamp into `[0, 100]`.
pub fn clamp_weight(x: f64) -> u32 {
    if x.is_nan() {
        return DEFAULT_WEIGHT_INPUT;
    }
    x.trunc().clamp(WEIGHT_MIN as f64, WEIGHT_MAX as f64) as u32
}

/// `"$1,500"` → 1500. Every non-digit is stripped before parsing.
pub fn sanitize_capital(raw: &str) -> f64 {
    match digits_only(raw).parse::<f64>() {
        // Overlong digit strings parse to infinity.
        Ok(v) if v.is_infinite() => CAPITAL_MAX,
        Ok(v) => clamp_capital(v),
        Err(_) => DEFAULT_CAPITAL,
    }
}

/// `"40%"` → 40; blank → [`DEFAULT_WEIGHT_INPUT`]; values above 100 → 100;
/// a leading minus clamps to 0.
pub fn sanitize_weight(raw: &str) -> u32 {
    let d = digits_only(raw);
    if d.is_empty() {
        return DEFAULT_WEIGHT_INPUT;
    }
    if raw.trim_start().starts_with('-') {
        return WEIGHT_MIN;
    }
    // Overlong digit strings saturate rather than fail.
    d.parse::<u64>()
        .map(|v| v.min(WEIGHT_MAX as u64) as u32)
        .unwrap_or(WEIGHT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_strips_non_digits_and_clamps() {
        assert_eq!(sanitize_capital("$1,500"), 1500.0);
        assert_eq!(sanitize_capital("10"), CAPITAL_MIN);
        assert_eq!(sanitize_capital("99999"), CAPITAL_MAX);
        assert_eq!(sanitize_capital(""), DEFAULT_CAPITAL);
        assert_eq!(sanitize_capital("abc"), DEFAULT_CAPITAL);
    }

    #[test]
    fn overlong_capital_saturates_like_weights() {
        let huge = "9".repeat(400);
        assert_eq!(sanitize_capital(&huge), CAPITAL_MAX);
        assert_eq!(sanitize_weight(&huge), WEIGHT_MAX);
    }

    #[test]
    fn negative_weights_clamp_to_zero_whatever_the_form() {
        assert_eq!(sanitize_weight("-5"), 0);
        assert_eq!(sanitize_weight(" -40%"), 0);
        assert_eq!(clamp_weight(-5.0), 0);
        assert_eq!(clamp_weight(42.9), 42);
        assert_eq!(clamp_weight(1e12), 100);
    }

    #[test]
    fn weights_clamp_and_default() {
        assert_eq!(sanitize_weight("40%"), 40);
        assert_eq!(sanitize_weight("250"), 100);
        assert_eq!(sanitize_weight(""), DEFAULT_WEIGHT_INPUT);
        assert_eq!(sanitize_weight("0"), 0);
        assert_eq!(sanitize_weight("99999999999999999999999"), 100);
    }

    #[test]
    fn numeric_constructor_clamps() {
        let w = WeightInput::new(150, 20, 0);
        assert_eq!(w.revenue, 100);
        let p = SearchParameters::new(f64::NAN, w);
        assert_eq!(p.capital, DEFAULT_CAPITAL);
        assert_eq!(SearchParameters::new(5000.0, w).capital, CAPITAL_MAX);
    }
}
