//! core::graph
//!
//! Commit graph representation and traversal.
//!
//! # Architecture
//!
//! The commit graph is an arena of immutable [`Commit`] nodes keyed by
//! [`CommitId`]. Edges point from child to parent and are stored as the
//! parent identity inside each commit.
//!
//! # Invariants
//!
//! - A commit is only inserted after its parent (if any) is present
//! - Nodes are never replaced or removed
//!
//! Together these make the graph acyclic without any cycle detection.

use std::collections::HashMap;

use super::commit::Commit;
use super::types::CommitId;

/// Arena of recorded commits.
#[derive(Debug, Default, Clone)]
pub struct CommitGraph {
    commits: HashMap<CommitId, Commit>,
}

impl CommitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a commit and return the stored node.
    ///
    /// If a commit with the same identity is already present, the existing
    /// node is kept. Equal identities mean equal content.
    ///
    /// Returns `None` (and records nothing) when the commit's parent is not
    /// in the graph.
    pub fn insert(&mut self, commit: Commit) -> Option<&Commit> {
        if let Some(parent) = commit.parent_id() {
            if !self.commits.contains_key(parent) {
                return None;
            }
        }
        Some(&*self.commits.entry(commit.id().clone()).or_insert(commit))
    }

    /// Look up a commit by identity.
    pub fn get(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.get(id)
    }

    /// Check whether a commit is recorded.
    pub fn contains(&self, id: &CommitId) -> bool {
        self.commits.contains_key(id)
    }

    /// Number of recorded commits.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Walk parent links starting at `start`, newest first.
    ///
    /// The walk ends at the root commit, or early if an identity does not
    /// resolve.
    ///
    /// # Example
    ///
    /// ```
    /// use twig::core::author::Author;
    /// use twig::core::commit::Commit;
    /// use twig::core::graph::CommitGraph;
    ///
    /// let author = Author::new("Tom", "tom@example.com").unwrap();
    /// let first = Commit::new("first", &author, None).unwrap();
    /// let second = Commit::new("second", &author, Some(&first)).unwrap();
    ///
    /// let mut graph = CommitGraph::new();
    /// graph.insert(first.clone());
    /// graph.insert(second.clone());
    ///
    /// let messages: Vec<_> = graph.ancestry(second.id()).map(|c| c.message()).collect();
    /// assert_eq!(messages, vec!["second", "first"]);
    /// ```
    pub fn ancestry<'a>(&'a self, start: &CommitId) -> Ancestry<'a> {
        Ancestry {
            graph: self,
            next: self.get(start),
        }
    }

    /// Check whether `ancestor` is reachable from `descendant` by parent links.
    ///
    /// A commit counts as its own ancestor.
    pub fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> bool {
        self.ancestry(descendant).any(|c| c.id() == ancestor)
    }

    /// Find the first identity along the chain from `start` that does not resolve.
    pub fn find_dangling(&self, start: &CommitId) -> Option<CommitId> {
        let mut current = start.clone();
        loop {
            match self.get(&current) {
                None => return Some(current),
                Some(commit) => match commit.parent_id() {
                    Some(parent) => current = parent.clone(),
                    None => return None,
                },
            }
        }
    }
}

/// Iterator over a commit and its ancestors, newest first.
#[derive(Debug, Clone)]
pub struct Ancestry<'a> {
    graph: &'a CommitGraph,
    next: Option<&'a Commit>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent_id().and_then(|id| self.graph.get(id));
        Some(current)
    }
}
