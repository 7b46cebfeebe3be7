//! Rule model.
//!
//! Rules are authored and persisted by external layers; the engine only ever
//! receives read-only snapshots at evaluation time and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::condition::{Condition, LogicalOperator};

/// Action vocabulary understood by the file-operation executor.
///
/// The engine never interprets the action; it is carried through to the
/// executor together with the opaque destination reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Move,
    Copy,
    Rename,
    Trash,
    Tag,
}

fn default_max_chain_depth() -> u32 {
    10
}

/// One user-defined organization rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: Uuid,
    /// Display name chosen by the author
    pub name: String,
    /// Evaluation order; lower values are evaluated earlier
    pub priority: i32,
    /// When the rule was authored; tie-breaker for duplicate priorities
    pub created_at: DateTime<Utc>,
    /// Disabled rules never match
    pub enabled: bool,
    /// Primary match conditions. The single source of truth: a rule with an
    /// empty list never matches.
    pub conditions: Vec<Condition>,
    /// How `conditions` are combined
    pub logical_operator: LogicalOperator,
    /// Veto conditions, combined as an implicit OR; any match disqualifies
    /// the rule even when the primary conditions hold
    #[serde(default)]
    pub exclusion_conditions: Vec<Condition>,
    /// What the executor should do with a matched file
    pub action: ActionKind,
    /// Opaque destination reference resolved by the executor
    #[serde(default)]
    pub destination: Option<String>,
    /// Whether evaluation re-runs against the updated file after this rule's
    /// action is applied
    #[serde(default)]
    pub chaining_enabled: bool,
    /// How many further chain steps this rule permits once applied
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: u32,
}

impl Rule {
    /// Create an enabled rule with no conditions yet.
    ///
    /// The result is structurally inert until conditions are added; the
    /// authoring layer fills in the rest.
    pub fn new(name: impl Into<String>, action: ActionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            priority: 0,
            created_at: Utc::now(),
            enabled: true,
            conditions: Vec::new(),
            logical_operator: LogicalOperator::And,
            exclusion_conditions: Vec::new(),
            action,
            destination: None,
            chaining_enabled: false,
            max_chain_depth: default_max_chain_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::Condition;

    #[test]
    fn test_new_rule_is_inert_but_enabled() {
        let rule = Rule::new("Archive installers", ActionKind::Move);
        assert!(rule.enabled);
        assert!(rule.conditions.is_empty());
        assert!(!rule.chaining_enabled);
        assert_eq!(rule.max_chain_depth, 10);
    }

    #[test]
    fn test_serde_round_trip_with_defaults() {
        let mut rule = Rule::new("Old downloads", ActionKind::Trash);
        rule.conditions = vec![Condition::ExtensionEquals {
            value: "dmg".to_string(),
        }];
        let json = serde_json::to_string(&rule).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, back);
    }

    #[test]
    fn test_optional_fields_default_on_deserialize() {
        // A minimal persisted rule from an older authoring layer: no
        // exclusions, no chaining fields.
        let json = r#"{
            "id": "5f8b1a2e-3c4d-4e5f-8a9b-0c1d2e3f4a5b",
            "name": "PDFs",
            "priority": 10,
            "createdAt": "2026-01-01T00:00:00Z",
            "enabled": true,
            "conditions": [{"type": "extensionEquals", "value": "pdf"}],
            "logicalOperator": "single",
            "action": "move"
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.exclusion_conditions.is_empty());
        assert!(!rule.chaining_enabled);
        assert_eq!(rule.max_chain_depth, 10);
        assert_eq!(rule.destination, None);
    }
}
