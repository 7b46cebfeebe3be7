//! Chained re-evaluation.
//!
//! Applying an action changes a file's attributes, which can make further
//! rules apply. The orchestrator re-runs first-match evaluation after each
//! applied action, bounded by two independent safety nets:
//!
//! - the set of already-applied rule ids, which catches rules re-triggering
//!   each other (a 2-cycle terminates within two steps)
//! - a numeric depth bound, which catches long chains that never repeat a
//!   single rule
//!
//! Neither alone is sufficient, so both are implemented and separately
//! tested. The orchestrator performs no I/O; the injected [`ActionApplier`]
//! is the only suspension point.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::file::FileDescriptor;
use crate::models::rule::Rule;

use super::cancel::CancellationFlag;
use super::ruleset::RuleSetEvaluator;

/// Upper bound on any rule's `max_chain_depth` claim.
pub const HARD_DEPTH_CAP: u32 = 64;

/// Failure reported by an action applier.
///
/// The orchestrator never retries; retry policy belongs to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "details")]
pub enum ActionError {
    #[error("Destination unavailable: {0}")]
    DestinationUnavailable(String),
    #[error("Source file missing: {0}")]
    SourceMissing(String),
    #[error("Operation rejected: {0}")]
    Rejected(String),
    #[error("Action failed: {0}")]
    Failed(String),
}

/// Applies a rule's action to a file and returns the updated snapshot.
///
/// Implemented by the file-operation executor. The orchestrator hands over
/// the current snapshot and the matched rule and takes back the post-action
/// snapshot; it never touches the file system itself.
#[async_trait]
pub trait ActionApplier: Send + Sync {
    async fn apply(&self, file: &FileDescriptor, rule: &Rule)
        -> Result<FileDescriptor, ActionError>;
}

/// Why a chain stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "reason", content = "details")]
pub enum TerminationReason {
    /// At least one rule was applied and no further rule matched.
    Matched,
    /// No rule ever matched; the file is left unclassified.
    NoMatch,
    /// An unvisited rule still matched, but the depth bound cut the chain off.
    DepthLimited,
    /// The next winning rule had already been applied in this chain.
    CycleTerminated,
    /// The action applier failed; the outcome carries the last good state.
    ActionFailed(ActionError),
    /// The surrounding batch was cancelled between steps.
    Cancelled,
}

/// Result of a chained evaluation, handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    /// The last rule applied, if any
    pub matched_rule: Option<Rule>,
    /// File state after the last successfully applied action
    pub final_file: FileDescriptor,
    /// Ids of applied rules, in application order
    pub applied_rule_ids: Vec<Uuid>,
    pub termination: TerminationReason,
}

/// Bounded state machine driving evaluate → apply → re-evaluate.
pub struct ChainOrchestrator {
    evaluator: RuleSetEvaluator,
    cancellation: Option<CancellationFlag>,
}

impl Default for ChainOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainOrchestrator {
    pub fn new() -> Self {
        Self {
            evaluator: RuleSetEvaluator::new(),
            cancellation: None,
        }
    }

    pub fn with_evaluator(evaluator: RuleSetEvaluator) -> Self {
        Self {
            evaluator,
            cancellation: None,
        }
    }

    /// Observe a cancellation flag between chain steps.
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Run the chain to termination.
    ///
    /// Each step evaluates the full rule set against the current snapshot,
    /// applies the winning rule's action through `applier`, and loops while
    /// the applied rule has chaining enabled and the depth bound permits.
    /// Rules are read-only input throughout.
    pub async fn chain_evaluate<A>(
        &self,
        file: FileDescriptor,
        rules: &[Rule],
        applier: &A,
    ) -> MatchOutcome
    where
        A: ActionApplier + ?Sized,
    {
        let mut current = file;
        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut applied_rule_ids: Vec<Uuid> = Vec::new();
        let mut matched_rule: Option<Rule> = None;
        let mut depth: u32 = 0;
        // No bound applies before the first action; each applied rule sets
        // the bound for the steps after it.
        let mut depth_bound: u32 = HARD_DEPTH_CAP;

        loop {
            if self.is_cancelled() {
                tracing::info!("[Chain] Cancelled after {} steps", applied_rule_ids.len());
                return finish(
                    matched_rule,
                    current,
                    applied_rule_ids,
                    TerminationReason::Cancelled,
                );
            }

            let Some(rule) = self.evaluator.evaluate(&current, rules) else {
                let reason = if applied_rule_ids.is_empty() {
                    TerminationReason::NoMatch
                } else {
                    TerminationReason::Matched
                };
                return finish(matched_rule, current, applied_rule_ids, reason);
            };

            if visited.contains(&rule.id) {
                tracing::info!(
                    "[Chain] Rule '{}' already applied in this chain, terminating",
                    rule.name
                );
                return finish(
                    matched_rule,
                    current,
                    applied_rule_ids,
                    TerminationReason::CycleTerminated,
                );
            }

            if depth >= depth_bound {
                tracing::info!(
                    "[Chain] Depth bound {} reached with rule '{}' still pending",
                    depth_bound,
                    rule.name
                );
                return finish(
                    matched_rule,
                    current,
                    applied_rule_ids,
                    TerminationReason::DepthLimited,
                );
            }

            match applier.apply(&current, rule).await {
                Err(error) => {
                    tracing::warn!("[Chain] Action for rule '{}' failed: {}", rule.name, error);
                    // The chain stops immediately with the last good state.
                    return finish(
                        matched_rule,
                        current,
                        applied_rule_ids,
                        TerminationReason::ActionFailed(error),
                    );
                }
                Ok(updated) => {
                    tracing::debug!(
                        "[Chain] Applied rule '{}' at depth {}",
                        rule.name,
                        depth
                    );
                    visited.insert(rule.id);
                    applied_rule_ids.push(rule.id);
                    matched_rule = Some(rule.clone());
                    current = updated;

                    if !rule.chaining_enabled {
                        return finish(
                            matched_rule,
                            current,
                            applied_rule_ids,
                            TerminationReason::Matched,
                        );
                    }
                    depth += 1;
                    depth_bound = rule.max_chain_depth.min(HARD_DEPTH_CAP);
                }
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(CancellationFlag::is_cancelled)
            .unwrap_or(false)
    }
}

fn finish(
    matched_rule: Option<Rule>,
    final_file: FileDescriptor,
    applied_rule_ids: Vec<Uuid>,
    termination: TerminationReason,
) -> MatchOutcome {
    MatchOutcome {
        matched_rule,
        final_file,
        applied_rule_ids,
        termination,
    }
}
