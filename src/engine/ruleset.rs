//! First-match-wins evaluation over a rule set.

use chrono::{DateTime, Utc};

use crate::models::file::FileDescriptor;
use crate::models::rule::Rule;

use super::evaluator::ConditionEvaluator;
use super::matcher::RuleMatcher;
use super::sorter;

/// Scans a rule list in priority order and returns the first match.
///
/// The priority order is re-derived on every call rather than assumed, so a
/// caller handing over an unsorted list still gets deterministic results. No
/// match leaves the file unclassified; the engine never substitutes a default
/// action.
#[derive(Debug, Clone)]
pub struct RuleSetEvaluator {
    matcher: RuleMatcher,
}

impl Default for RuleSetEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSetEvaluator {
    pub fn new() -> Self {
        Self {
            matcher: RuleMatcher::new(),
        }
    }

    /// Pin the reference instant used for date conditions.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            matcher: RuleMatcher::with_evaluator(ConditionEvaluator::at(now)),
        }
    }

    pub fn with_matcher(matcher: RuleMatcher) -> Self {
        Self { matcher }
    }

    /// Return the first rule in priority order that matches, or None.
    pub fn evaluate<'a>(&self, file: &FileDescriptor, rules: &'a [Rule]) -> Option<&'a Rule> {
        for index in sorter::priority_order(rules) {
            let rule = &rules[index];
            if self.matcher.matches(rule, file) {
                tracing::debug!("[RuleSet] Rule '{}' matched '{}'", rule.name, file.name);
                return Some(rule);
            }
        }
        tracing::debug!("[RuleSet] No rule matched '{}'", file.name);
        None
    }
}
