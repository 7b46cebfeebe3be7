//! Condition evaluation.
//!
//! Pure predicates over (condition, file snapshot). Compound lists are
//! evaluated cheapest-first with short-circuiting; reordering only changes
//! the amount of work performed, never the boolean result.

use chrono::{DateTime, Duration, Utc};

use crate::models::condition::{Condition, DateField, LogicalOperator};
use crate::models::file::FileDescriptor;

/// Pure evaluator for conditions against a file snapshot.
///
/// Date arithmetic is relative to a reference instant captured once at
/// construction, so every file in one pass sees the same notion of "now" and
/// repeated evaluation of identical inputs is deterministic.
#[derive(Debug, Clone)]
pub struct ConditionEvaluator {
    now: DateTime<Utc>,
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionEvaluator {
    /// Create an evaluator whose reference instant is the current time.
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Create an evaluator with a pinned reference instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Evaluate a single condition. Total: malformed or unrecognized input
    /// evaluates to false, never panics.
    pub fn evaluate(&self, condition: &Condition, file: &FileDescriptor) -> bool {
        match condition {
            Condition::ExtensionEquals { value } => {
                let wanted = value.trim_start_matches('.');
                match file.extension.as_deref() {
                    Some(ext) => ext.eq_ignore_ascii_case(wanted),
                    None => false,
                }
            }
            Condition::NameContains {
                value,
                case_sensitive,
            } => string_match(&file.name, value, *case_sensitive, |name, needle| {
                name.contains(needle)
            }),
            Condition::NameStartsWith {
                value,
                case_sensitive,
            } => string_match(&file.name, value, *case_sensitive, |name, needle| {
                name.starts_with(needle)
            }),
            Condition::NameEndsWith {
                value,
                case_sensitive,
            } => string_match(&file.name, value, *case_sensitive, |name, needle| {
                name.ends_with(needle)
            }),
            Condition::SizeLargerThan { bytes } => file.size > *bytes,
            Condition::DateOlderThan { days, field } => self.is_older_than(file, *field, *days),
            Condition::KindEquals { kind } => file.kind == *kind,
            Condition::SourceLocationEquals { location } => {
                file.source_location.eq_ignore_ascii_case(location)
            }
            Condition::Not { condition } => !self.evaluate(condition, file),
            Condition::Group {
                conditions,
                operator,
            } => self.evaluate_all(conditions, *operator, file),
            Condition::Unsupported => {
                tracing::warn!("[Evaluator] Unsupported condition variant, treating as non-match");
                false
            }
        }
    }

    /// Evaluate a condition list under a logical operator.
    ///
    /// `Single` is `And` over one element; the empty list never matches
    /// (callers guard this, defended here too).
    pub fn evaluate_all(
        &self,
        conditions: &[Condition],
        operator: LogicalOperator,
        file: &FileDescriptor,
    ) -> bool {
        if conditions.is_empty() {
            return false;
        }
        let order = cost_order(conditions);
        match operator {
            LogicalOperator::Single | LogicalOperator::And => order
                .into_iter()
                .all(|i| self.evaluate(&conditions[i], file)),
            LogicalOperator::Or => order
                .into_iter()
                .any(|i| self.evaluate(&conditions[i], file)),
        }
    }

    /// Inclusive boundary: "older than N days" matches an age of exactly N
    /// days. A missing timestamp never matches.
    fn is_older_than(&self, file: &FileDescriptor, field: DateField, days: u32) -> bool {
        let stamp = match field {
            DateField::Created => file.created_at,
            DateField::Modified => file.modified_at,
            DateField::Accessed => file.accessed_at,
        };
        match stamp {
            Some(ts) => self.now.signed_duration_since(ts) >= Duration::days(i64::from(days)),
            None => false,
        }
    }
}

fn string_match(
    name: &str,
    needle: &str,
    case_sensitive: bool,
    test: impl Fn(&str, &str) -> bool,
) -> bool {
    if case_sensitive {
        test(name, needle)
    } else {
        test(&name.to_lowercase(), &needle.to_lowercase())
    }
}

/// Indices of `conditions` in ascending estimated-cost order.
///
/// The sort is stable, so ties keep declaration order.
fn cost_order(conditions: &[Condition]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..conditions.len()).collect();
    order.sort_by_key(|&i| estimated_cost(&conditions[i]));
    order
}

/// Rough cost tiers: direct field compares first, string scans and date
/// arithmetic later, nested groups last.
fn estimated_cost(condition: &Condition) -> u32 {
    match condition {
        Condition::Unsupported => 0,
        Condition::SizeLargerThan { .. } | Condition::KindEquals { .. } => 1,
        Condition::ExtensionEquals { .. } | Condition::SourceLocationEquals { .. } => 2,
        Condition::NameContains { .. }
        | Condition::NameStartsWith { .. }
        | Condition::NameEndsWith { .. } => 3,
        Condition::DateOlderThan { .. } => 4,
        Condition::Not { condition } => estimated_cost(condition),
        Condition::Group { conditions, .. } => {
            5 + conditions.iter().map(estimated_cost).sum::<u32>()
        }
    }
}
