//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.

use std::fmt::Display;

use crate::core::commit::Commit;
use crate::core::types::{BranchName, CommitId};

/// Characters of a commit id shown in abbreviated output.
pub const SHORT_ID_LEN: usize = 7;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format an optional head for display.
pub fn format_head(head: Option<&CommitId>) -> String {
    match head {
        Some(id) => id.to_string(),
        None => "(none)".to_string(),
    }
}

/// Format one line of a branch listing; the current branch is starred.
pub fn format_branch(name: &BranchName, head: Option<&CommitId>, current: bool) -> String {
    let marker = if current { "* " } else { "  " };
    let head = head
        .map(|id| id.short(SHORT_ID_LEN).to_string())
        .unwrap_or_else(|| "(none)".to_string());
    format!("{}{} {}", marker, name, head)
}

/// Format a commit as `<short-id> <summary>`.
pub fn format_commit_oneline(commit: &Commit) -> String {
    format!("{} {}", commit.id().short(SHORT_ID_LEN), commit.summary())
}

/// Format a commit with its full header and indented message.
pub fn format_commit(commit: &Commit) -> String {
    let mut out = format!(
        "commit {}\nAuthor: {}\nDate:   {}\n",
        commit.id(),
        commit.author(),
        commit.timestamp()
    );
    if let Some(parent) = commit.parent_id() {
        out = out.replacen('\n', &format!("\nParent: {}\n", parent), 1);
    }
    out.push('\n');
    for line in commit.message().lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}
