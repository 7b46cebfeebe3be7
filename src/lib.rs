//! Decision core of the Curator file organizer.
//!
//! Given a file's attribute snapshot and an ordered collection of
//! user-defined rules, the engine decides deterministically which single rule
//! (if any) applies, and can re-run that decision after an action is applied
//! to the file (chaining), bounded against cycles and unbounded depth.
//!
//! Data flow:
//!
//! ```text
//! file + rules → RuleSetEvaluator → matched rule or none
//!              → [external action execution]
//!              → ChainOrchestrator loop → MatchOutcome
//! ```
//!
//! The engine consumes read-only snapshots produced by the scanner and the
//! rule store, performs no I/O of its own, and hands file operations to an
//! injected [`ActionApplier`].

pub mod engine;
pub mod models;

pub use engine::batch::{BatchClassifier, Classification};
pub use engine::cancel::CancellationFlag;
pub use engine::chain::{
    ActionApplier, ActionError, ChainOrchestrator, MatchOutcome, TerminationReason,
};
pub use engine::evaluator::ConditionEvaluator;
pub use engine::matcher::RuleMatcher;
pub use engine::ruleset::RuleSetEvaluator;
pub use engine::sorter::sort_rules;
pub use models::condition::{Condition, DateField, LogicalOperator};
pub use models::file::{FileDescriptor, FileKind};
pub use models::rule::{ActionKind, Rule};
