//! Shared helpers for turning GitHub error bodies into diagnostics.

/// Maximum characters of a raw body kept in an error message.
pub(crate) const MAX_PAYLOAD_CHARS: usize = 500;

/// Summarises an error body: the GitHub `message` field when present,
/// otherwise the raw text truncated to [`MAX_PAYLOAD_CHARS`].
pub(crate) fn describe_payload(body: &str) -> String {
    extract_github_message(body)
        .unwrap_or_else(|| truncate_for_message(body.trim(), MAX_PAYLOAD_CHARS))
}

pub(crate) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

pub(crate) fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{describe_payload, truncate_for_message};

    #[rstest]
    #[case::github_json(r#"{"message":"Not Found","documentation_url":"x"}"#, "Not Found")]
    #[case::plain_text("upstream timeout\n", "upstream timeout")]
    #[case::json_without_message(r#"{"error":"boom"}"#, r#"{"error":"boom"}"#)]
    fn describe_payload_prefers_github_message(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(describe_payload(body), expected);
    }

    #[test]
    fn truncation_marks_elided_text() {
        assert_eq!(truncate_for_message("abcdef", 3), "abc...");
        assert_eq!(truncate_for_message("abc", 3), "abc");
    }
}
