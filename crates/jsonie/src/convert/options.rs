use serde::{Deserialize, Serialize};

use crate::constants;

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Materialize abstract (non-mutable) sequences as tuples instead of lists.
    pub prefer_immutable_types_for_nonmutable_sequence: bool,
    /// Confidence of a successful literal match.
    pub literal_confidence: f64,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            prefer_immutable_types_for_nonmutable_sequence: false,
            literal_confidence: constants::LITERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_options_fill_defaults() {
        let opts: ConverterOptions = serde_json::from_value(json!({
            "prefer_immutable_types_for_nonmutable_sequence": true
        }))
        .unwrap_or_default();
        assert!(opts.prefer_immutable_types_for_nonmutable_sequence);
        assert_eq!(opts.literal_confidence, constants::LITERAL);
    }
}
