//! Final-answer extraction from a marked-up model transcript.

use std::sync::OnceLock;

use regex::Regex;

const THINKING_CLOSE: &str = "</thinking>";

static ANSWER_RE: OnceLock<Regex> = OnceLock::new();

fn answer_regex() -> &'static Regex {
    ANSWER_RE.get_or_init(|| {
        Regex::new(r"(?s)<answer>(.*?)</answer>").expect("answer pattern is valid")
    })
}

/// Extract the user-facing answer from a raw transcript.
///
/// First match wins:
/// 1. interior of the first `<answer>...</answer>` region,
/// 2. everything after the first `</thinking>`,
/// 3. the whole input.
///
/// The result is always trimmed. Missing or malformed markup is not an
/// error; the caller just gets the best-effort text.
pub fn extract_answer(raw: &str) -> String {
    if let Some(inner) = answer_regex().captures(raw).and_then(|c| c.get(1)) {
        return inner.as_str().trim().to_string();
    }

    if let Some((_, after)) = raw.split_once(THINKING_CLOSE) {
        return after.trim().to_string();
    }

    if !raw.trim().is_empty() {
        tracing::debug!(len = raw.len(), "no answer markup, returning raw text");
    }
    raw.trim().to_string()
}
