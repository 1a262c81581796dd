use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Built-in concern catalog matching the shipped review dataset.
///
/// Trigger terms are lowercase substrings; several are deliberate stems
/// ("diabet", "constipat") so they match inflected forms in review text.
const BUILTIN_CONCERNS: &[(&str, &[&str])] = &[
    (
        "diabetes",
        &["diabet", "sugar", "blood sugar", "glucose", "glycemic", "insulin"],
    ),
    (
        "heart",
        &["heart", "cholesterol", "blood pressure", "cardio", "hypertension"],
    ),
    (
        "digestive",
        &["digest", "constipat", "stomach", "gut", "bowel", "fiber"],
    ),
    (
        "anemia",
        &["anemia", "iron", "hemoglobin", "blood", "fatigue"],
    ),
    (
        "weight",
        &["weight", "obesity", "diet", "fat", "slim", "calorie"],
    ),
    ("bones", &["bone", "calcium", "osteoporosis", "fracture"]),
    ("gluten", &["gluten", "celiac", "allerg", "intolerance"]),
];

/// A named health concern with its trigger keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcernEntry {
    pub name: String,
    pub triggers: Vec<String>,
}

/// Ordered catalog of known health concerns.
///
/// Lookup is case-insensitive on the concern name. Unknown concerns resolve
/// to an empty trigger set rather than an error, so a partially-unrecognized
/// concern list still scores.
#[derive(Debug, Clone)]
pub struct ConcernCatalog {
    concerns: Vec<ConcernEntry>,
}

impl ConcernCatalog {
    /// The compiled-in catalog used when no YAML override is configured.
    #[must_use]
    pub fn builtin() -> Self {
        let concerns = BUILTIN_CONCERNS
            .iter()
            .map(|(name, triggers)| ConcernEntry {
                name: (*name).to_string(),
                triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
            })
            .collect();
        Self { concerns }
    }

    fn new(concerns: Vec<ConcernEntry>) -> Self {
        Self { concerns }
    }

    /// Trigger keywords for a concern; empty for unknown labels.
    #[must_use]
    pub fn triggers(&self, concern: &str) -> &[String] {
        let wanted = concern.trim();
        self.concerns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .map_or(&[], |c| c.triggers.as_slice())
    }

    /// Whether the concern label is in the catalog.
    #[must_use]
    pub fn contains(&self, concern: &str) -> bool {
        !self.triggers(concern).is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.concerns.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concerns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concerns.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ConcernsFile {
    concerns: Vec<ConcernEntry>,
}

/// Load and validate a concern catalog from a YAML file.
///
/// Trigger terms are lowercased and trimmed at load so matching can assume
/// normalized needles.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty names, empty trigger lists, duplicate concerns).
pub fn load_concerns(path: &Path) -> Result<ConcernCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ContentFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut file: ConcernsFile = serde_yaml::from_str(&content)?;

    for concern in &mut file.concerns {
        concern.name = concern.name.trim().to_lowercase();
        for trigger in &mut concern.triggers {
            *trigger = trigger.trim().to_lowercase();
        }
        concern.triggers.retain(|t| !t.is_empty());
    }

    validate_concerns(&file)?;

    Ok(ConcernCatalog::new(file.concerns))
}

fn validate_concerns(file: &ConcernsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for concern in &file.concerns {
        if concern.name.is_empty() {
            return Err(ConfigError::Validation(
                "concern name must be non-empty".to_string(),
            ));
        }

        if concern.triggers.is_empty() {
            return Err(ConfigError::Validation(format!(
                "concern '{}' has no trigger keywords",
                concern.name
            )));
        }

        if !seen.insert(concern.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate concern: '{}'",
                concern.name
            )));
        }
    }

    Ok(())
}
