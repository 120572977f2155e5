use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency tier assigned to a symptom description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying free-text symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Candidate conditions, each listed once.
    pub possible_conditions: Vec<String>,
    pub severity: Severity,
    pub needs_medical_attention: bool,
}

impl Default for Assessment {
    fn default() -> Self {
        Self {
            possible_conditions: Vec::new(),
            severity: Severity::Mild,
            needs_medical_attention: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_keys() {
        let assessment = Assessment {
            possible_conditions: vec!["Flu".to_string()],
            severity: Severity::Moderate,
            needs_medical_attention: false,
        };

        assert_eq!(
            serde_json::to_value(&assessment).unwrap(),
            json!({
                "possibleConditions": ["Flu"],
                "severity": "moderate",
                "needsMedicalAttention": false
            })
        );
    }
}
