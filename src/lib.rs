//! Twig - an in-memory commit graph with named branches
//!
//! Twig models the core of a version-control system: authored commits linked
//! to their parents, organized into named branches, with branch creation,
//! switching, committing, and history traversal. There is no persistence,
//! merging, diffing, or networking.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, the commit graph, and the repository
//! - [`engine`] - Script interpreter driving a single repository
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`ui`] - Output formatting utilities
//!
//! # Correctness Invariants
//!
//! 1. The `main` branch always exists
//! 2. The current branch always exists
//! 3. Every branch head and its full ancestry resolve
//! 4. Failed operations leave the repository unchanged

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
