//! Data model consumed and produced by the engine.
//!
//! All types serialize as camelCase JSON, the shape the persistence and shell
//! layers exchange with the engine.

pub mod condition;
pub mod file;
pub mod rule;

pub use condition::*;
pub use file::*;
pub use rule::*;
