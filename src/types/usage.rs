//! Token usage types.

use serde::{Deserialize, Serialize};

/// Usage metadata carried by a single trace event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
}

impl UsageFragment {
    pub fn new(input_tokens: Option<u32>, output_tokens: Option<u32>) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none() && self.output_tokens.is_none()
    }
}

/// Token usage for one agent invocation.
///
/// All fields stay `None` until a trace reports usage. Serialized with
/// explicit nulls so callers always see the three keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl TokenUsage {
    /// Fold a usage fragment into this summary.
    ///
    /// Each fragment already holds the invocation's cumulative counts, so a
    /// later fragment replaces the earlier one instead of adding to it.
    /// Empty fragments are ignored.
    pub fn fold(&mut self, fragment: &UsageFragment) {
        if fragment.is_empty() {
            return;
        }
        self.input_tokens = fragment.input_tokens;
        self.output_tokens = fragment.output_tokens;
        self.total_tokens = Some(
            fragment
                .input_tokens
                .unwrap_or(0)
                .saturating_add(fragment.output_tokens.unwrap_or(0)),
        );
    }

    /// Consuming form of [`TokenUsage::fold`].
    pub fn folded(mut self, fragment: &UsageFragment) -> Self {
        self.fold(fragment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_overwrites_instead_of_summing() {
        let usage = TokenUsage::default()
            .folded(&UsageFragment::new(Some(10), Some(5)))
            .folded(&UsageFragment::new(Some(30), Some(7)));

        assert_eq!(usage.input_tokens, Some(30));
        assert_eq!(usage.output_tokens, Some(7));
        assert_eq!(usage.total_tokens, Some(37));
    }

    #[test]
    fn fold_keeps_missing_fields_absent_but_counts_them_as_zero() {
        let usage = TokenUsage::default().folded(&UsageFragment::new(Some(12), None));

        assert_eq!(usage.input_tokens, Some(12));
        assert_eq!(usage.output_tokens, None);
        assert_eq!(usage.total_tokens, Some(12));
    }

    #[test]
    fn empty_fragment_leaves_summary_unchanged() {
        let before = TokenUsage::default().folded(&UsageFragment::new(Some(1), Some(2)));
        let after = before.folded(&UsageFragment::default());
        assert_eq!(before, after);
        assert_eq!(after.total_tokens, Some(3));
    }

    #[test]
    fn serializes_nulls_in_camel_case() {
        let value = serde_json::to_value(TokenUsage::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "inputTokens": null, "outputTokens": null, "totalTokens": null })
        );
    }
}
