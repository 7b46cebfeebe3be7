//! Rule ordering.
//!
//! The single home of rule ordering logic. Any caller that needs a
//! consistently ordered rule list (the evaluator, a persistence-layer query)
//! goes through here, so two callers can never disagree about order.

use std::cmp::Ordering;

use crate::models::rule::Rule;

/// Compare two rules at their original positions: priority ascending, then
/// creation time, then original index. The index tie-breaker makes the order
/// strict and total even when priorities and timestamps collide.
pub fn compare(a: &Rule, index_a: usize, b: &Rule, index_b: usize) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| index_a.cmp(&index_b))
}

/// Indices of `rules` in evaluation order, without cloning the rules.
pub fn priority_order(rules: &[Rule]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by(|&a, &b| compare(&rules[a], a, &rules[b], b));
    order
}

/// Return the rules sorted into evaluation order.
pub fn sort_rules(rules: &[Rule]) -> Vec<Rule> {
    priority_order(rules)
        .into_iter()
        .map(|i| rules[i].clone())
        .collect()
}
