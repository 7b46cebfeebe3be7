//! Condition model for the rule DSL.
//!
//! A condition is an atomic or composite predicate over a file's attribute
//! snapshot. The variant set is closed and exhaustively matched by the
//! evaluator; anything the engine does not recognize deserializes to
//! [`Condition::Unsupported`], which never matches (fail-closed).

use serde::{Deserialize, Serialize};

use super::file::FileKind;

/// Which timestamp a date condition reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    Created,
    Modified,
    Accessed,
}

/// How a rule combines its condition list.
///
/// `Single` requires exactly one condition and means the same thing as `And`
/// over one element. It exists so the authoring layer can distinguish "one
/// deliberate condition" from "a conjunction that currently has one entry";
/// the evaluator treats both identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicalOperator {
    Single,
    And,
    Or,
}

/// A predicate over one file snapshot.
///
/// Conditions compare equal when built from identical parameters (value
/// semantics), so the authoring layer can de-duplicate and diff them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    /// Extension equality, always case-insensitive; tolerates a leading dot
    /// in the authored value
    ExtensionEquals {
        value: String,
    },
    /// Substring match on the full file name
    NameContains {
        value: String,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// Prefix match on the full file name
    NameStartsWith {
        value: String,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// Suffix match on the full file name
    NameEndsWith {
        value: String,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// Strictly larger than the given size
    SizeLargerThan {
        bytes: u64,
    },
    /// Age of the chosen timestamp is at least `days` whole days
    DateOlderThan {
        days: u32,
        field: DateField,
    },
    /// Category tag equality
    KindEquals {
        kind: FileKind,
    },
    /// Source-location tag equality (case-insensitive)
    SourceLocationEquals {
        location: String,
    },
    /// Local negation of a nested condition
    Not {
        condition: Box<Condition>,
    },
    /// Nested boolean group; nesting forms a tree, never a cycle
    Group {
        conditions: Vec<Condition>,
        operator: LogicalOperator,
    },
    /// Fallback for condition variants this engine version does not know.
    /// Always evaluates to false.
    #[serde(other)]
    Unsupported,
}

impl Condition {
    /// Wrap a condition in a negation without spelling out the `Box`.
    pub fn not(inner: Condition) -> Self {
        Condition::Not {
            condition: Box::new(inner),
        }
    }

    /// Build a nested group.
    pub fn group(conditions: Vec<Condition>, operator: LogicalOperator) -> Self {
        Condition::Group {
            conditions,
            operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_semantics() {
        let a = Condition::NameContains {
            value: "invoice".to_string(),
            case_sensitive: false,
        };
        let b = Condition::NameContains {
            value: "invoice".to_string(),
            case_sensitive: false,
        };
        assert_eq!(a, b);

        let c = Condition::NameContains {
            value: "invoice".to_string(),
            case_sensitive: true,
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_serde_round_trip() {
        let condition = Condition::group(
            vec![
                Condition::ExtensionEquals {
                    value: "pdf".to_string(),
                },
                Condition::not(Condition::DateOlderThan {
                    days: 30,
                    field: DateField::Modified,
                }),
            ],
            LogicalOperator::And,
        );
        let json = serde_json::to_string(&condition).unwrap();
        let back: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(condition, back);
    }

    #[test]
    fn test_unknown_variant_deserializes_to_unsupported() {
        let json = r#"{"type": "contentMatches", "pattern": "secret"}"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(condition, Condition::Unsupported);
    }

    #[test]
    fn test_case_sensitive_defaults_to_false() {
        let json = r#"{"type": "nameContains", "value": "draft"}"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(
            condition,
            Condition::NameContains {
                value: "draft".to_string(),
                case_sensitive: false,
            }
        );
    }

    #[test]
    fn test_operator_serialization() {
        assert_eq!(
            serde_json::to_string(&LogicalOperator::Single).unwrap(),
            "\"single\""
        );
        assert_eq!(serde_json::to_string(&LogicalOperator::Or).unwrap(), "\"or\"");
    }
}
