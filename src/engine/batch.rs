//! Parallel batch classification.
//!
//! Single-pass evaluation of many files against one frozen rule snapshot.
//! Evaluation is pure, so files fan out across tokio tasks with no locking;
//! the snapshot is immutable and reference-counted, so a user reordering
//! rules mid-scan is never observable inside a batch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::file::FileDescriptor;
use crate::models::rule::Rule;

use super::cancel::CancellationFlag;
use super::ruleset::RuleSetEvaluator;

/// Classification of one file in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub file: FileDescriptor,
    /// Winning rule id, None when no rule matched
    pub matched_rule_id: Option<Uuid>,
    /// True when the batch was cancelled before this file was evaluated
    pub cancelled: bool,
}

/// Evaluates batches of files against a frozen rule snapshot.
pub struct BatchClassifier {
    rules: Arc<[Rule]>,
    cancellation: CancellationFlag,
}

impl BatchClassifier {
    /// Freeze a snapshot of the rule list. Every file classified through
    /// this instance sees exactly this rule set.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: rules.into(),
            cancellation: CancellationFlag::new(),
        }
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    /// Handle the caller can use to cancel the batch.
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    /// Classify a batch of files in parallel. Results come back in input
    /// order. Files not yet started when cancellation is observed are
    /// returned unclassified with `cancelled` set.
    pub async fn classify(&self, files: Vec<FileDescriptor>) -> Vec<Classification> {
        // One evaluator for the whole batch: every file sees the same
        // reference instant for date conditions.
        let evaluator = Arc::new(RuleSetEvaluator::new());

        let mut handles = Vec::with_capacity(files.len());
        for file in files {
            let rules = Arc::clone(&self.rules);
            let evaluator = Arc::clone(&evaluator);
            let cancellation = self.cancellation.clone();
            handles.push(tokio::spawn(async move {
                if cancellation.is_cancelled() {
                    return Classification {
                        file,
                        matched_rule_id: None,
                        cancelled: true,
                    };
                }
                let matched_rule_id = evaluator.evaluate(&file, &rules).map(|rule| rule.id);
                Classification {
                    file,
                    matched_rule_id,
                    cancelled: false,
                }
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(classification) => results.push(classification),
                Err(join_error) => {
                    tracing::warn!("[Batch] Classification task failed: {}", join_error);
                }
            }
        }
        results
    }
}
