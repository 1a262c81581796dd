use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Built-in goal→entity bonus rules.
///
/// Membership is a content decision backed by the nutrition literature the
/// catalog ships with, which is why the table is data rather than code.
const BUILTIN_RULES: &[(&str, &[&str])] = &[
    ("weight_loss", &["foxtail-millet", "barnyard-millet"]),
    ("diabetes", &["foxtail-millet", "kodo-millet"]),
];

/// One health-goal rule: entities that earn the health-score bonus when the
/// user states this goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRule {
    pub goal: String,
    pub entities: Vec<String>,
}

/// Pluggable allow-list mapping health goals to favored entities.
#[derive(Debug, Clone)]
pub struct GoalRuleTable {
    rules: Vec<GoalRule>,
}

impl GoalRuleTable {
    /// The compiled-in rule table used when no YAML override is configured.
    #[must_use]
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(goal, entities)| GoalRule {
                goal: (*goal).to_string(),
                entities: entities.iter().map(|e| (*e).to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// An empty table: no goal ever grants a bonus.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Whether the entity is on the allow-list for the given goal.
    ///
    /// Unknown goals match nothing; comparison is case-insensitive.
    #[must_use]
    pub fn applies(&self, goal: &str, entity_id: &str) -> bool {
        let wanted = goal.trim();
        self.rules
            .iter()
            .find(|r| r.goal.eq_ignore_ascii_case(wanted))
            .is_some_and(|r| {
                r.entities
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(entity_id))
            })
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    rules: Vec<GoalRule>,
}

/// Load and validate a goal rule table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty goals, empty entity lists, duplicate goals).
pub fn load_goal_rules(path: &Path) -> Result<GoalRuleTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ContentFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut file: RulesFile = serde_yaml::from_str(&content)?;

    for rule in &mut file.rules {
        rule.goal = rule.goal.trim().to_lowercase();
        for entity in &mut rule.entities {
            *entity = entity.trim().to_lowercase();
        }
        rule.entities.retain(|e| !e.is_empty());
    }

    validate_rules(&file)?;

    Ok(GoalRuleTable { rules: file.rules })
}

fn validate_rules(file: &RulesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for rule in &file.rules {
        if rule.goal.is_empty() {
            return Err(ConfigError::Validation(
                "rule goal must be non-empty".to_string(),
            ));
        }

        if rule.entities.is_empty() {
            return Err(ConfigError::Validation(format!(
                "rule '{}' lists no entities",
                rule.goal
            )));
        }

        if !seen.insert(rule.goal.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate rule goal: '{}'",
                rule.goal
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_apply_to_listed_entities() {
        let table = GoalRuleTable::builtin();
        assert!(table.applies("weight_loss", "foxtail-millet"));
        assert!(table.applies("diabetes", "kodo-millet"));
        assert!(!table.applies("diabetes", "barnyard-millet"));
    }

    #[test]
    fn unknown_goal_matches_nothing() {
        let table = GoalRuleTable::builtin();
        assert!(!table.applies("sleep", "foxtail-millet"));
    }

    #[test]
    fn applies_is_case_insensitive() {
        let table = GoalRuleTable::builtin();
        assert!(table.applies("Weight_Loss", "Foxtail-Millet"));
    }

    #[test]
    fn empty_table_never_applies() {
        let table = GoalRuleTable::empty();
        assert!(!table.applies("weight_loss", "foxtail-millet"));
    }

    #[test]
    fn validate_rejects_rule_without_entities() {
        let file = RulesFile {
            rules: vec![GoalRule {
                goal: "sleep".to_string(),
                entities: vec![],
            }],
        };
        let err = validate_rules(&file).unwrap_err();
        assert!(err.to_string().contains("lists no entities"));
    }

    #[test]
    fn load_goal_rules_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("goal_rules.yaml");
        assert!(
            path.exists(),
            "goal_rules.yaml missing at {path:?} — required for this test"
        );
        let table = load_goal_rules(&path).expect("load goal_rules.yaml");
        assert!(table.applies("weight_loss", "foxtail-millet"));
    }
}
