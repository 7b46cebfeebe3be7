//! Single-rule matching.

use crate::models::condition::LogicalOperator;
use crate::models::file::FileDescriptor;
use crate::models::rule::Rule;

use super::evaluator::ConditionEvaluator;

/// Decides whether one rule applies to one file.
///
/// Exclusion conditions are an implicit OR: any exclusion match vetoes the
/// rule regardless of the primary conditions. Inclusion is checked first as a
/// performance choice; the contract fixes only the outcome.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    evaluator: ConditionEvaluator,
}

impl Default for RuleMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleMatcher {
    pub fn new() -> Self {
        Self {
            evaluator: ConditionEvaluator::new(),
        }
    }

    pub fn with_evaluator(evaluator: ConditionEvaluator) -> Self {
        Self { evaluator }
    }

    pub fn matches(&self, rule: &Rule, file: &FileDescriptor) -> bool {
        if !rule.enabled {
            return false;
        }
        // A rule with no primary conditions is structurally inert.
        if rule.conditions.is_empty() {
            return false;
        }
        if !self
            .evaluator
            .evaluate_all(&rule.conditions, rule.logical_operator, file)
        {
            return false;
        }
        if !rule.exclusion_conditions.is_empty()
            && self
                .evaluator
                .evaluate_all(&rule.exclusion_conditions, LogicalOperator::Or, file)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::Condition;
    use crate::models::file::FileKind;
    use crate::models::rule::ActionKind;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn pdf_file(name: &str) -> FileDescriptor {
        FileDescriptor {
            name: name.to_string(),
            extension: Some("pdf".to_string()),
            size: 4096,
            created_at: None,
            modified_at: None,
            accessed_at: None,
            kind: FileKind::Document,
            source_location: "downloads".to_string(),
        }
    }

    fn pdf_rule() -> Rule {
        Rule {
            id: Uuid::new_v4(),
            name: "File PDFs".to_string(),
            priority: 10,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            enabled: true,
            conditions: vec![Condition::ExtensionEquals {
                value: "pdf".to_string(),
            }],
            logical_operator: LogicalOperator::Single,
            exclusion_conditions: Vec::new(),
            action: ActionKind::Move,
            destination: Some("documents".to_string()),
            chaining_enabled: false,
            max_chain_depth: 10,
        }
    }

    #[test]
    fn test_disabled_rule_never_matches() {
        let mut rule = pdf_rule();
        rule.enabled = false;
        assert!(!RuleMatcher::new().matches(&rule, &pdf_file("report.pdf")));
    }

    #[test]
    fn test_empty_conditions_never_match() {
        let mut rule = pdf_rule();
        rule.conditions.clear();
        assert!(!RuleMatcher::new().matches(&rule, &pdf_file("report.pdf")));
    }

    #[test]
    fn test_exclusion_vetoes_matching_rule() {
        let mut rule = pdf_rule();
        rule.exclusion_conditions = vec![Condition::NameContains {
            value: "draft".to_string(),
            case_sensitive: false,
        }];
        let matcher = RuleMatcher::new();
        assert!(!matcher.matches(&rule, &pdf_file("draft_report.pdf")));
        assert!(matcher.matches(&rule, &pdf_file("report.pdf")));
    }

    #[test]
    fn test_any_exclusion_vetoes() {
        let mut rule = pdf_rule();
        rule.exclusion_conditions = vec![
            Condition::NameContains {
                value: "draft".to_string(),
                case_sensitive: false,
            },
            Condition::NameContains {
                value: "wip".to_string(),
                case_sensitive: false,
            },
        ];
        let matcher = RuleMatcher::new();
        assert!(!matcher.matches(&rule, &pdf_file("notes_wip.pdf")));
    }

    #[test]
    fn test_and_rule_with_age_condition() {
        use crate::models::condition::DateField;
        use chrono::Duration;

        let now = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
        let matcher = RuleMatcher::with_evaluator(ConditionEvaluator::at(now));

        let mut rule = pdf_rule();
        rule.conditions = vec![
            Condition::ExtensionEquals {
                value: "dmg".to_string(),
            },
            Condition::DateOlderThan {
                days: 7,
                field: DateField::Modified,
            },
        ];
        rule.logical_operator = LogicalOperator::And;

        let mut file = pdf_file("installer.dmg");
        file.extension = Some("dmg".to_string());

        file.modified_at = Some(now - Duration::days(6));
        assert!(!matcher.matches(&rule, &file));

        file.modified_at = Some(now - Duration::days(7));
        assert!(matcher.matches(&rule, &file));
    }

    #[test]
    fn test_or_rule_matches_on_either_condition() {
        let mut rule = pdf_rule();
        rule.conditions = vec![
            Condition::ExtensionEquals {
                value: "doc".to_string(),
            },
            Condition::ExtensionEquals {
                value: "pdf".to_string(),
            },
        ];
        rule.logical_operator = LogicalOperator::Or;
        assert!(RuleMatcher::new().matches(&rule, &pdf_file("report.pdf")));
    }
}
