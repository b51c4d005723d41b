//! core
//!
//! Core domain types and operations for Twig.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, CommitId, UtcTimestamp
//! - [`error`] - The error kinds surfaced by core operations
//! - [`author`] - Validated commit author
//! - [`commit`] - Immutable commit nodes and identity derivation
//! - [`graph`] - Commit arena and ancestry traversal
//! - [`repository`] - Branches, current branch, commit and log
//! - [`verify`] - Repository invariant checks
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Validation happens before mutation
//! - All identities are deterministic

pub mod author;
pub mod commit;
pub mod config;
pub mod error;
pub mod graph;
pub mod repository;
pub mod types;
pub mod verify;

pub use error::RepoError;
