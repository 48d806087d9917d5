//! Confidence scores.
//!
//! Lower is better. A composite's confidence is the geometric mean of its
//! parts, so these only matter relative to each other.

/// Value already has the target type.
pub const IDENTITY: f64 = 0.5;

/// Lossless or narrowing conversion between representations (int/float,
/// decimal text, base64 text).
pub const COERCION: f64 = 2.0;

/// Parsing a date or datetime out of text or an epoch number.
pub const TEMPORAL: f64 = 3.0;

/// Wildcard accepted the value verbatim.
pub const ANY: f64 = 1.0;

/// Default score for a literal match; see `ConverterOptions::literal_confidence`.
pub const LITERAL: f64 = 1.0;

/// Empty sequence, set, tuple or mapping.
pub const EMPTY_CONTAINER: f64 = 2.0;

/// Record-like value with no member contributing a score.
pub const EMPTY_RECORD: f64 = 1.0;

/// Failure sentinel.
pub const FAILED: f64 = f64::INFINITY;

/// Geometric mean of `scores`, `empty` when there are none.
///
/// Computed in log space so long composites neither overflow nor underflow.
/// The result is infinite only when some score is.
pub fn geometric_mean(scores: &[f64], empty: f64) -> f64 {
    if scores.is_empty() {
        return empty;
    }
    if scores.iter().any(|s| s.is_infinite()) {
        return FAILED;
    }
    let log_sum: f64 = scores.iter().map(|s| s.ln()).sum();
    (log_sum / scores.len() as f64).exp()
}
