//! Lenient numeric parsing for values typed into editable cells.
//!
//! Cell edits never fail on bad text. The longest numeric prefix is used
//! (`"450mm"` reads as 450) and anything without one reads as zero.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("leading float pattern is valid")
});

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("leading integer pattern is valid"));

/// Parse a floating-point cell value; unparsable or non-finite text becomes `0.0`.
/// `-0` reads as plain zero.
pub fn parse_decimal(raw: &str) -> f64 {
    let parsed = LEADING_FLOAT
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    match parsed {
        Some(value) if value == 0.0 => 0.0,
        Some(value) => value,
        None => {
            warn!(input = raw, "non-numeric cell value treated as 0");
            0.0
        }
    }
}

/// Parse a whole-millimeter cell value; unparsable text becomes `0`.
pub fn parse_whole(raw: &str) -> i64 {
    match LEADING_INT
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
    {
        Some(value) => value,
        None => {
            warn!(input = raw, "non-numeric cell value treated as 0");
            0
        }
    }
}
