//! core::repository
//!
//! Branches, the current branch pointer, and the commit protocol.
//!
//! # State
//!
//! - `branches`: branch name to head identity (`None` while headless)
//! - `current`: the branch new commits are appended to
//! - `graph`: every recorded commit, keyed by identity
//!
//! # Invariants
//!
//! - `branches` always contains `main`
//! - `current` is always a key of `branches`
//! - Every non-`None` head resolves in `graph`, as does its full parent chain
//! - Branch heads are copied on create; commits on one branch never move another
//!
//! Every mutating operation validates its input before touching state, so a
//! returned error leaves the repository exactly as it was. Mutation requires
//! `&mut self`, which gives each operation an exclusive critical section.

use std::collections::BTreeMap;

use super::author::Author;
use super::commit::Commit;
use super::error::RepoError;
use super::graph::CommitGraph;
use super::types::{BranchName, CommitId};

/// An in-memory repository.
///
/// # Example
///
/// ```
/// use twig::core::author::Author;
/// use twig::core::repository::Repository;
///
/// let mut repo = Repository::new();
/// let jane = Author::new("Jane", "jane@example.com").unwrap();
///
/// let c1 = repo.commit("first", &jane).unwrap();
/// repo.create_branch("feature").unwrap();
/// repo.switch("feature").unwrap();
/// let c2 = repo.commit("second", &jane).unwrap();
///
/// assert_eq!(repo.branch("main").unwrap(), Some(c1.id()));
/// assert_eq!(repo.branch("feature").unwrap(), Some(c2.id()));
/// assert_eq!(repo.log(None).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    branches: BTreeMap<BranchName, Option<CommitId>>,
    current: BranchName,
    graph: CommitGraph,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Create a repository with a single headless `main` branch.
    pub fn new() -> Self {
        let main = BranchName::main();
        let mut branches = BTreeMap::new();
        branches.insert(main.clone(), None);
        Self {
            branches,
            current: main,
            graph: CommitGraph::new(),
        }
    }

    /// All branches and their heads, ordered by name.
    pub fn branches(&self) -> &BTreeMap<BranchName, Option<CommitId>> {
        &self.branches
    }

    /// The branch new commits are appended to.
    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    /// Head of the current branch.
    pub fn head(&self) -> Option<&CommitId> {
        self.branches.get(&self.current).and_then(Option::as_ref)
    }

    /// The commit arena.
    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    /// Create a branch pointing at the current branch's head.
    ///
    /// Does not change the current branch.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidArgument` if the name is invalid or the
    /// branch already exists.
    pub fn create_branch(&mut self, name: &str) -> Result<(), RepoError> {
        let name = BranchName::new(name)?;
        if self.branches.contains_key(&name) {
            return Err(RepoError::invalid(format!(
                "branch '{}' already exists",
                name
            )));
        }
        let head = self.head().cloned();
        self.branches.insert(name, head);
        Ok(())
    }

    /// Head identity of the named branch, `None` if it has no commits.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::BranchNotFound` if the branch does not exist.
    pub fn branch(&self, name: &str) -> Result<Option<&CommitId>, RepoError> {
        self.branches
            .get(name)
            .map(Option::as_ref)
            .ok_or_else(|| RepoError::BranchNotFound(name.to_string()))
    }

    /// Make `name` the current branch.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::BranchNotFound` if the branch does not exist.
    pub fn switch(&mut self, name: &str) -> Result<(), RepoError> {
        let (name, _) = self
            .branches
            .get_key_value(name)
            .ok_or_else(|| RepoError::BranchNotFound(name.to_string()))?;
        self.current = name.clone();
        Ok(())
    }

    /// Commit on the current branch and advance its head.
    ///
    /// The new commit's parent is the current head (none when headless).
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidArgument` if the message is blank or the
    /// author fails validation.
    pub fn commit(&mut self, message: &str, author: &Author) -> Result<Commit, RepoError> {
        Commit::validate(message, author)?;

        let parent = self.head().and_then(|id| self.graph.get(id));
        let commit = Commit::new(message, author, parent)?;

        let stored = self
            .graph
            .insert(commit)
            .cloned()
            .ok_or_else(|| RepoError::invalid("parent commit is not recorded"))?;
        self.branches
            .insert(self.current.clone(), Some(stored.id().clone()));
        Ok(stored)
    }

    /// Commits reachable from a branch head, newest first.
    ///
    /// Uses the current branch when `branch` is `None`. A headless branch
    /// yields an empty log.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::BranchNotFound` if the branch does not exist.
    pub fn log(&self, branch: Option<&str>) -> Result<Vec<&Commit>, RepoError> {
        let name = branch.unwrap_or(self.current.as_str());
        Ok(match self.branch(name)? {
            Some(head) => self.graph.ancestry(head).collect(),
            None => Vec::new(),
        })
    }

    /// Look up a recorded commit by identity.
    pub fn get(&self, id: &CommitId) -> Option<&Commit> {
        self.graph.get(id)
    }

    /// Resolve a commit's parent.
    pub fn parent_of(&self, commit: &Commit) -> Option<&Commit> {
        commit.parent_id().and_then(|id| self.graph.get(id))
    }
}
