//! Tolerant parser for the model's analysis reply.
//!
//! `parse_response` is total: whatever the model sent, the caller gets a
//! schema-complete `AnalysisResult`. What went wrong along the way is
//! reported as `ParseDegraded` diagnostics next to the result.
//!
//! Steps, each tolerant of the one before:
//! 1. slice from the first `{` to the last `}`
//! 2. undo double escaping (`\"` -> `"`, `\n` -> space)
//! 3. drop trailing commas before `}` and `]`
//! 4. decode as a JSON object (a single attempt, no second repair pass)
//! 5. on any failure above, return the default analysis
//! 6. otherwise fill missing top-level keys from the default analysis

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::result::AnalysisResult;

static TRAILING_COMMA_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("Invalid trailing comma regex"));
static TRAILING_COMMA_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("Invalid trailing bracket regex"));

/// Characters shown either side of a JSON decode failure.
const ERROR_CONTEXT_CHARS: usize = 10;

/// Why a reply was not taken as-is. Never surfaced as a hard error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseDegraded {
    #[error("No response received from the model")]
    EmptyResponse,

    #[error("No valid JSON object found in response")]
    NoJsonObject,

    #[error("JSON parse error at line {line}, column {column}: {message} (near `{context}`)")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
        context: String,
    },

    #[error("Response JSON is not an object")]
    NotAnObject,

    #[error("Missing keys in response: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

impl ParseDegraded {
    /// True when the whole reply was replaced by the default analysis.
    pub fn is_total(&self) -> bool {
        !matches!(self, ParseDegraded::MissingKeys(_))
    }
}

/// Result of parsing one model reply.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub result: AnalysisResult,
    pub diagnostics: Vec<ParseDegraded>,
    /// Text that was handed to the JSON decoder, when cleaning got that far.
    pub cleaned: Option<String>,
}

impl ParseOutcome {
    fn fallback(diagnostic: ParseDegraded, cleaned: Option<String>) -> Self {
        warn!("{diagnostic}; using default analysis");
        ParseOutcome {
            result: AnalysisResult::fallback(),
            diagnostics: vec![diagnostic],
            cleaned,
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Parses a raw model reply into a complete analysis. Never fails.
pub fn parse_response(raw: &str) -> ParseOutcome {
    if raw.trim().is_empty() {
        return ParseOutcome::fallback(ParseDegraded::EmptyResponse, None);
    }

    let Some(cleaned) = clean_json_text(raw) else {
        return ParseOutcome::fallback(ParseDegraded::NoJsonObject, None);
    };
    debug!(raw_len = raw.len(), cleaned_len = cleaned.len(), "Cleaned model reply");

    let object = match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(object)) => object,
        Ok(_) => return ParseOutcome::fallback(ParseDegraded::NotAnObject, Some(cleaned)),
        Err(e) => {
            let diagnostic = ParseDegraded::InvalidJson {
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
                context: error_context(&cleaned, e.line(), e.column()),
            };
            return ParseOutcome::fallback(diagnostic, Some(cleaned));
        }
    };

    let (result, missing) = AnalysisResult::completed(object);
    let mut diagnostics = Vec::new();
    if !missing.is_empty() {
        let diagnostic = ParseDegraded::MissingKeys(missing);
        warn!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    ParseOutcome {
        result,
        diagnostics,
        cleaned: Some(cleaned),
    }
}

/// Boundary extraction, de-escaping and trailing-comma repair.
/// Returns `None` when the text has no `{ ... }` span.
pub fn clean_json_text(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    let sliced = &raw[start..=end];
    let unescaped = sliced.replace("\\\"", "\"").replace("\\n", " ");
    let repaired = TRAILING_COMMA_BRACE.replace_all(&unescaped, "}");
    let repaired = TRAILING_COMMA_BRACKET.replace_all(&repaired, "]");

    Some(repaired.into_owned())
}

/// Up to `ERROR_CONTEXT_CHARS` characters either side of a decoder position
/// (1-based line and column, as reported by serde_json).
fn error_context(text: &str, line: usize, column: usize) -> String {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut pos = (line_start + column.saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }

    let before: Vec<char> = text[..pos].chars().rev().take(ERROR_CONTEXT_CHARS).collect();
    let before: String = before.into_iter().rev().collect();
    let after: String = text[pos..].chars().take(ERROR_CONTEXT_CHARS).collect();
    format!("{before}{after}")
}
