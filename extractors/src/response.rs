//! Locating the JSON payload inside free-form model output.
//!
//! Models rarely return bare JSON even when asked to. The [`ResponseExtractor`] runs an
//! ordered chain of [`ExtractionStrategy`] implementations and takes the first one that
//! produces a parsed value:
//!
//! 1. [`FencedJsonBlock`]: contents of the first ```` ```json ```` fenced block
//! 2. [`BracketedArray`]: the first `[` through the last `]` in the text
//! 3. [`WholeText`]: the whole response parsed as JSON

use regex::Regex;
use serde_json::Value;
use shared_types::LeadGenError;
use std::sync::LazyLock;

static FENCED_JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced block pattern is valid")
});

/// Why a single strategy did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyFailure {
    #[error("no candidate found")]
    NotFound,

    #[error("candidate is not valid JSON: {0}")]
    InvalidJson(String),
}

pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// The slice of `text` this strategy would parse, if it finds one.
    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str>;

    fn extract(&self, text: &str) -> Result<Value, StrategyFailure> {
        let candidate = self.candidate(text).ok_or(StrategyFailure::NotFound)?;
        serde_json::from_str(candidate).map_err(|e| StrategyFailure::InvalidJson(e.to_string()))
    }
}

pub struct FencedJsonBlock;

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced-json-block"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        FENCED_JSON_BLOCK
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

pub struct BracketedArray;

impl ExtractionStrategy for BracketedArray {
    fn name(&self) -> &'static str {
        "bracketed-array"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find('[')?;
        let end = text.rfind(']')?;
        if end < start {
            return None;
        }
        Some(&text[start..=end])
    }
}

pub struct WholeText;

impl ExtractionStrategy for WholeText {
    fn name(&self) -> &'static str {
        "whole-text"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

pub struct ResponseExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ResponseExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Fenced block, then bracketed array, then the whole text.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            Box::new(FencedJsonBlock),
            Box::new(BracketedArray),
            Box::new(WholeText),
        ])
    }

    pub fn extract(&self, text: &str) -> Result<Value, LeadGenError> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            match strategy.extract(text) {
                Ok(value) => {
                    tracing::debug!(strategy = strategy.name(), "Extracted JSON from response");
                    return Ok(value);
                }
                Err(failure) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        %failure,
                        "Extraction strategy failed"
                    );
                    failures.push(format!("{}: {}", strategy.name(), failure));
                }
            }
        }

        tracing::warn!(
            response_len = text.len(),
            "No extraction strategy produced valid JSON"
        );
        Err(LeadGenError::MalformedResponse {
            reason: failures.join("; "),
        })
    }
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}
