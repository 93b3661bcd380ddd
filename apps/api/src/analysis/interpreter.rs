//! Response Interpreter: recovers structured results from free-text LLM output.
//!
//! Extraction is a two-tier heuristic, not a grammar:
//! 1. the whole text as JSON,
//! 2. the span from the first `{` to the last `}`.
//!
//! Field access is lenient on top of that. The model's output shape is not
//! guaranteed, so every field is optional and falls back to a default instead
//! of failing the whole result.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("No JSON object could be recovered from the LLM response")]
pub struct ExtractionError;

/// Returns the first JSON object recoverable from `text`.
pub fn extract_structured(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return Ok(map);
    }

    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(ExtractionError);
    };
    if start > end {
        return Err(ExtractionError);
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ExtractionError),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typed views over the extracted object
// ────────────────────────────────────────────────────────────────────────────

/// Applicant-tracking-system auto-reject risk, as the model phrased it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HardFilterRisk {
    Text(String),
    Detailed { level: String, reasoning: String },
}

impl Default for HardFilterRisk {
    fn default() -> Self {
        HardFilterRisk::Text("low".to_string())
    }
}

impl HardFilterRisk {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => HardFilterRisk::Text(s.clone()),
            Some(Value::Number(n)) => HardFilterRisk::Text(n.to_string()),
            Some(Value::Object(obj)) => HardFilterRisk::Detailed {
                level: str_field(obj, "level").unwrap_or("low").to_string(),
                reasoning: str_field(obj, "reasoning").unwrap_or_default().to_string(),
            },
            _ => HardFilterRisk::default(),
        }
    }
}

/// One suggested change, either free text or attached to a résumé section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Improvement {
    Text(String),
    Sectioned { section: String, comment: String },
}

impl Improvement {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Improvement::Text(s.clone())),
            Value::Object(obj) => Some(Improvement::Sectioned {
                section: str_field(obj, "section").unwrap_or("General").to_string(),
                comment: str_field(obj, "comment").unwrap_or_default().to_string(),
            }),
            _ => None,
        }
    }
}

/// Result of a `Full` analysis. Defaults: score 0, risk "low", empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FullAnalysis {
    pub score: i64,
    pub missing_keywords: Vec<String>,
    pub hard_filter_risk: HardFilterRisk,
    pub improvements: Vec<Improvement>,
}

impl FullAnalysis {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            score: lenient_score(map.get("score")),
            missing_keywords: map
                .get("missing_keywords")
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|k| k.as_str().map(String::from))
                        .collect()
                })
                .unwrap_or_default(),
            hard_filter_risk: HardFilterRisk::from_value(map.get("hard_filter_risk")),
            improvements: map
                .get("improvements")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().filter_map(Improvement::from_value).collect())
                .unwrap_or_default(),
        }
    }
}

/// Result of a `Score` re-evaluation. Defaults: score 0, no fixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreAnalysis {
    pub score: i64,
    pub main_fixes: String,
}

impl ScoreAnalysis {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let main_fixes = match map.get("main_fixes") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            _ => String::new(),
        };

        Self {
            score: lenient_score(map.get("score")),
            main_fixes,
        }
    }
}

/// Integer, float (truncated), or numeric string; anything else is 0.
fn lenient_score(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim().trim_end_matches('%').trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(|v| v.as_str())
}
