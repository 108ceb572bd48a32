// Cross-cutting prompt fragments for the model client.
// Task-specific templates live next to the module that uses them.

/// Prefix placed in front of every prompt to force JSON-only output.
pub const JSON_ONLY_PREFIX: &str =
    "Respond ONLY with valid JSON. No other text, explanations, or formatting.";

/// Prepends the JSON-only instruction to a prompt.
pub fn with_json_only_prefix(prompt: &str) -> String {
    format!("{JSON_ONLY_PREFIX}\n{prompt}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_separated_by_newline() {
        let full = with_json_only_prefix("Analyze this");
        assert_eq!(
            full,
            "Respond ONLY with valid JSON. No other text, explanations, or formatting.\nAnalyze this"
        );
    }
}
