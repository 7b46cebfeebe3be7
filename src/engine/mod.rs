//! Rule Matching Engine
//!
//! Pure condition evaluation, priority-ordered first-match selection, and
//! the bounded chaining state machine. Everything except the injected action
//! applier is side-effect-free and safe to run concurrently over a shared
//! read-only rule snapshot.

pub mod batch;
pub mod cancel;
pub mod chain;
pub mod evaluator;
pub mod matcher;
pub mod ruleset;
pub mod sorter;

pub use batch::*;
pub use cancel::*;
pub use chain::*;
pub use evaluator::*;
pub use matcher::*;
pub use ruleset::*;
pub use sorter::*;
