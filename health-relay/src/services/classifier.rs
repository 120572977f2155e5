//! Keyword-based symptom classifier.
//!
//! Matching is plain substring containment over the lowercased input, so
//! "feverish" matches "fever" and "pain" matches most injury descriptions.
//! That behaviour is kept as-is; it is a known source of false positives.

use crate::models::{Assessment, Severity};
use std::collections::HashSet;

/// A lexicon keyword and the conditions it suggests, in display order.
pub type LexiconEntry = (&'static str, &'static [&'static str]);

/// Keyword to candidate-condition table.
pub const SYMPTOM_LEXICON: &[LexiconEntry] = &[
    (
        "headache",
        &["Tension headache", "Migraine", "Dehydration", "Stress"],
    ),
    ("fever", &["Common cold", "Flu", "Infection", "COVID-19"]),
    (
        "cough",
        &["Common cold", "Flu", "Bronchitis", "Allergies", "COVID-19"],
    ),
    ("sore throat", &["Common cold", "Strep throat", "Tonsillitis"]),
    ("runny nose", &["Common cold", "Allergies", "Sinusitis"]),
    (
        "nausea",
        &["Food poisoning", "Gastroenteritis", "Migraine", "Pregnancy"],
    ),
    ("vomit", &["Food poisoning", "Gastroenteritis"]),
    (
        "diarrhea",
        &["Food poisoning", "Gastroenteritis", "Irritable bowel syndrome"],
    ),
    (
        "fatigue",
        &["Anemia", "Sleep deprivation", "Depression", "Hypothyroidism"],
    ),
    (
        "dizziness",
        &["Dehydration", "Low blood pressure", "Inner ear infection", "Anemia"],
    ),
    ("rash", &["Allergic reaction", "Eczema", "Contact dermatitis"]),
    ("pain", &["Muscle strain", "Injury", "Inflammation"]),
    ("insomnia", &["Stress", "Anxiety", "Sleep disorder"]),
];

/// Phrases that always escalate to [`Severity::Severe`].
pub const SEVERE_SYMPTOMS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "severe bleeding",
    "unconscious",
    "seizure",
    "stroke",
    "heart attack",
    "suicidal",
];

/// Matched keywords above this count raise the tier to moderate.
const MODERATE_INDICATOR_THRESHOLD: usize = 2;

/// Stateless classifier over two immutable lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct SymptomClassifier {
    lexicon: &'static [LexiconEntry],
    severe_phrases: &'static [&'static str],
}

impl Default for SymptomClassifier {
    fn default() -> Self {
        Self::new(SYMPTOM_LEXICON, SEVERE_SYMPTOMS)
    }
}

impl SymptomClassifier {
    pub fn new(
        lexicon: &'static [LexiconEntry],
        severe_phrases: &'static [&'static str],
    ) -> Self {
        Self {
            lexicon,
            severe_phrases,
        }
    }

    /// Classify free-text symptoms. Never fails; unmatched text yields an
    /// empty, mild assessment.
    pub fn classify(&self, symptoms: &str) -> Assessment {
        let text = symptoms.to_lowercase();

        let mut conditions: Vec<&'static str> = Vec::new();
        let mut indicators = 0usize;

        for (keyword, associated) in self.lexicon {
            if text.contains(keyword) {
                conditions.extend_from_slice(associated);
                indicators += 1;
            }
        }

        let mut assessment = Assessment::default();

        if self.severe_phrases.iter().any(|phrase| text.contains(phrase)) {
            assessment.severity = Severity::Severe;
            assessment.needs_medical_attention = true;
        } else if indicators > MODERATE_INDICATOR_THRESHOLD {
            assessment.severity = Severity::Moderate;
        }

        let mut seen = HashSet::new();
        assessment.possible_conditions = conditions
            .into_iter()
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect();

        tracing::debug!(
            indicators,
            severity = %assessment.severity,
            condition_count = assessment.possible_conditions.len(),
            "Classified symptoms"
        );

        assessment
    }
}
