//! The analysis record handed from the parser to the presentation layer.
//!
//! Nested shapes are whatever the model sent. Only the nine top-level keys
//! are guaranteed, so every read goes through the tolerant accessors below.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Top-level keys every analysis must carry, in display order.
pub const REQUIRED_KEYS: [&str; 9] = [
    "Industry_Context",
    "JD_Match",
    "Match_Analysis",
    "Keywords_Analysis",
    "Profile_Summary",
    "Resume_Enhancement",
    "Interview_Prep",
    "Role_Analysis",
    "Industry_Specific_Metrics",
];

/// The fallback analysis used to patch missing keys or replace an
/// unparseable response.
pub fn default_analysis() -> Map<String, Value> {
    let value = json!({
        "Industry_Context": {
            "Domain": "Unknown",
            "Role_Type": "Unknown",
            "Industry_Specific_Requirements": []
        },
        "JD_Match": "0%",
        "Match_Analysis": {
            "Score": "0%",
            "Reasoning": "Unable to analyze resume",
            "Strength_Areas": [],
            "Improvement_Areas": []
        },
        "Keywords_Analysis": {
            "Missing_Keywords": [
                {
                    "keyword": "Unable to analyze",
                    "category": "unknown",
                    "importance": "medium"
                }
            ],
            "Present_Keywords": []
        },
        "Profile_Summary": "Error in analysis",
        "Resume_Enhancement": {
            "Industry_Alignment": [],
            "Strategic_Tips": [],
            "Keyword_Placement": [],
            "Format_Suggestions": []
        },
        "Interview_Prep": {
            "Industry_Knowledge": [],
            "Technical_Topics": [],
            "Common_Questions": [],
            "Study_Resources": [],
            "Practice_Tips": []
        },
        "Role_Analysis": {
            "Core_Responsibilities": [],
            "Required_Skills": [],
            "Present_Skills": [],
            "Learning_Path": [],
            "Industry_Insights": [],
            "Career_Growth": []
        },
        "Industry_Specific_Metrics": {
            "Key_Performance_Indicators": [],
            "Certifications": [],
            "Tools_And_Software": []
        }
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Fills every required key missing from `object` with the value from
/// `defaults`. Present keys are never touched, whatever their shape.
/// Returns the names of the keys that were filled.
pub fn complete_with_defaults(
    object: &mut Map<String, Value>,
    defaults: &Map<String, Value>,
) -> Vec<String> {
    let mut missing = Vec::new();
    for key in REQUIRED_KEYS {
        if object.contains_key(key) {
            continue;
        }
        let fallback = defaults.get(key).cloned().unwrap_or(Value::Null);
        object.insert(key.to_string(), fallback);
        missing.push(key.to_string());
    }
    missing
}

/// A schema-complete analysis. All nine required keys are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    /// The full default analysis.
    pub fn fallback() -> Self {
        AnalysisResult(default_analysis())
    }

    /// Completes a decoded object against the default analysis.
    pub(crate) fn completed(mut object: Map<String, Value>) -> (Self, Vec<String>) {
        let missing = complete_with_defaults(&mut object, &default_analysis());
        (AnalysisResult(object), missing)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String at `section.field`, or at `section` itself when `field` is `None`.
    pub fn text_at(&self, section: &str, field: Option<&str>) -> Option<&str> {
        self.lookup(section, field)?.as_str()
    }

    /// String items of a list at `section.field`. Non-string items are skipped.
    pub fn list_at(&self, section: &str, field: &str) -> Vec<String> {
        self.lookup(section, Some(field))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Object items of a list at `section.field`. Non-object items are skipped.
    pub fn records_at(&self, section: &str, field: &str) -> Vec<&Map<String, Value>> {
        self.lookup(section, Some(field))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    fn lookup(&self, section: &str, field: Option<&str>) -> Option<&Value> {
        let top = self.0.get(section)?;
        match field {
            Some(field) => top.get(field),
            None => Some(top),
        }
    }
}
