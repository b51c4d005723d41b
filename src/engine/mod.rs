//! engine
//!
//! Drives a single in-memory repository from a script.
//!
//! # Architecture
//!
//! There is no persistence, so every CLI invocation starts from a fresh
//! repository and applies a sequence of instructions to it:
//!
//! ```text
//! Parse line -> Execute -> Render -> ... -> Verify
//! ```
//!
//! - [`script`] - Turns text lines into [`script::Instruction`]s
//! - [`exec`] - Applies instructions and renders their results
//!
//! # Invariants
//!
//! - The executor is the only component that mutates the repository
//! - A failed instruction leaves the repository unchanged
//! - Verification failure after a run indicates a bug

pub mod exec;
pub mod script;

use std::path::PathBuf;

pub use exec::{ExecError, Executor, RunSummary, StepError};
pub use script::{Instruction, ParseError};

/// Global flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Explicit config file path.
    pub config: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Machine-readable JSON output.
    pub json: bool,
}
