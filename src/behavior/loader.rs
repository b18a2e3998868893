//! Load behavior rules from TOML files
//!
//! ```toml
//! [[rules]]
//! id = "attack_adjacent"
//! priority = 2
//! condition = { type = "enemy_adjacent" }
//! action = { type = "attack", target = "weakest" }
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::behavior::rules::BehaviorRule;
use crate::core::error::{Result, SimError};

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<BehaviorRule>,
}

/// Parse a rule book from TOML text
pub fn parse_rules(content: &str) -> Result<Vec<BehaviorRule>> {
    let file: RuleFile =
        toml::from_str(content).map_err(|e| SimError::RuleParse(e.to_string()))?;
    validate_rules(&file.rules)?;
    Ok(file.rules)
}

/// Load a rule book from a TOML file
pub fn load_rules(path: &Path) -> Result<Vec<BehaviorRule>> {
    let content = fs::read_to_string(path)?;
    let rules = parse_rules(&content)?;
    tracing::debug!(path = %path.display(), count = rules.len(), "loaded behavior rules");
    Ok(rules)
}

/// Ids must be present and unique within a book
pub fn validate_rules(rules: &[BehaviorRule]) -> Result<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        if rule.id.trim().is_empty() {
            return Err(SimError::RuleParse("rule with empty id".into()));
        }
        if !seen.insert(rule.id.as_str()) {
            return Err(SimError::RuleParse(format!("duplicate rule id '{}'", rule.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::presets::default_process_rules;
    use crate::behavior::rules::{Action, Condition, TargetPriority};

    #[test]
    fn test_parse_minimal_rule() {
        let rules = parse_rules(
            r#"
            [[rules]]
            id = "bite"
            priority = 1
            condition = { type = "enemy_adjacent" }
            action = { type = "attack", target = "strongest" }
            "#,
        )
        .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].condition, Condition::EnemyAdjacent);
        assert_eq!(
            rules[0].action,
            Action::Attack {
                target: TargetPriority::Strongest
            }
        );
        assert!(rules[0].enabled);
        assert_eq!(rules[0].cooldown, 0);
        assert_eq!(rules[0].last_triggered_tick, None);
    }

    #[test]
    fn test_unknown_condition_rejected() {
        let err = parse_rules(
            r#"
            [[rules]]
            id = "odd"
            priority = 1
            condition = { type = "full_moon" }
            action = { type = "hold" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::RuleParse(_)));
    }

    #[test]
    fn test_missing_threshold_rejected() {
        let result = parse_rules(
            r#"
            [[rules]]
            id = "low"
            priority = 1
            condition = { type = "health_below" }
            action = { type = "flee" }
            "#,
        );
        assert!(matches!(result, Err(SimError::RuleParse(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = parse_rules(
            r#"
            [[rules]]
            id = "a"
            priority = 1
            condition = { type = "always" }
            action = { type = "hold" }

            [[rules]]
            id = "a"
            priority = 2
            condition = { type = "always" }
            action = { type = "explore" }
            "#,
        );
        assert!(matches!(result, Err(SimError::RuleParse(_))));
    }

    #[test]
    fn test_empty_file_is_empty_book() {
        assert!(parse_rules("").unwrap().is_empty());
    }

    #[test]
    fn test_shipped_rules_match_presets() {
        let shipped = parse_rules(include_str!("../../data/rules/default_process_rules.toml")).unwrap();
        let presets = default_process_rules();
        assert_eq!(shipped.len(), presets.len());
        for (file_rule, preset) in shipped.iter().zip(&presets) {
            assert_eq!(file_rule.id, preset.id);
            assert_eq!(file_rule.priority, preset.priority);
            assert_eq!(file_rule.condition, preset.condition);
            assert_eq!(file_rule.action, preset.action);
        }
    }
}
