//! Integration tests for the repository API.
//!
//! These tests drive the public API the way a caller would: construct an
//! author, commit, branch, switch, and walk history.

use twig::core::author::Author;
use twig::core::commit::Commit;
use twig::core::repository::Repository;
use twig::core::types::{BranchName, CommitId};
use twig::core::verify::verify;
use twig::core::RepoError;

// =============================================================================
// Test Fixtures
// =============================================================================

fn jane() -> Author {
    Author::new("Jane", "jane@example.com").expect("valid author")
}

/// Repository with `main -> a -> b` and `feature` forked at `a` with one commit.
struct Forked {
    repo: Repository,
    a: Commit,
    b: Commit,
    f: Commit,
}

impl Forked {
    fn new() -> Self {
        let mut repo = Repository::new();
        let a = repo.commit("a", &jane()).unwrap();
        repo.create_branch("feature").unwrap();
        let b = repo.commit("b", &jane()).unwrap();
        repo.switch("feature").unwrap();
        let f = repo.commit("f", &jane()).unwrap();
        Self { repo, a, b, f }
    }
}

fn ids(commits: &[&Commit]) -> Vec<CommitId> {
    commits.iter().map(|c| c.id().clone()).collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn fresh_repository_state() {
    let repo = Repository::new();
    assert_eq!(repo.current_branch(), &BranchName::main());

    let branches: Vec<_> = repo.branches().iter().collect();
    assert_eq!(branches, vec![(&BranchName::main(), &None)]);
    assert!(repo.log(None).unwrap().is_empty());
}

#[test]
fn repositories_are_independent() {
    let mut one = Repository::new();
    let two = Repository::new();
    one.commit("only in one", &jane()).unwrap();

    assert!(one.head().is_some());
    assert!(two.head().is_none());
}

// =============================================================================
// Branching
// =============================================================================

#[test]
fn create_branch_errors() {
    let mut repo = Repository::new();
    assert!(matches!(
        repo.create_branch(""),
        Err(RepoError::InvalidArgument(_))
    ));
    assert!(matches!(
        repo.create_branch("main"),
        Err(RepoError::InvalidArgument(_))
    ));
}

#[test]
fn new_branch_matches_current_head() {
    let mut repo = Repository::new();
    repo.create_branch("empty").unwrap();
    assert_eq!(
        repo.branch("empty").unwrap(),
        repo.branch(repo.current_branch().as_str()).unwrap()
    );

    let c = repo.commit("init", &jane()).unwrap();
    repo.create_branch("feature").unwrap();
    assert_eq!(repo.branch("feature").unwrap(), Some(c.id()));
    assert_eq!(repo.branch("main").unwrap(), Some(c.id()));
    // Branch created while headless stays headless.
    assert_eq!(repo.branch("empty").unwrap(), None);
}

#[test]
fn branch_from_non_main_current() {
    let Forked { mut repo, f, .. } = Forked::new();
    repo.create_branch("nested").unwrap();
    assert_eq!(repo.branch("nested").unwrap(), Some(f.id()));
    assert_eq!(repo.current_branch().as_str(), "feature");
}

#[test]
fn lookups_of_missing_branches() {
    let mut repo = Repository::new();
    assert_eq!(
        repo.branch("nope"),
        Err(RepoError::BranchNotFound("nope".to_string()))
    );
    assert_eq!(
        repo.switch("dev"),
        Err(RepoError::BranchNotFound("dev".to_string()))
    );
    assert!(repo.log(Some("dev")).unwrap_err().is_branch_not_found());
    assert_eq!(repo.current_branch().as_str(), "main");
}

// =============================================================================
// Committing
// =============================================================================

#[test]
fn commits_on_feature_leave_main_alone() {
    let Forked { repo, b, f, .. } = Forked::new();
    assert_eq!(repo.branch("feature").unwrap(), Some(f.id()));
    assert_eq!(repo.branch("main").unwrap(), Some(b.id()));
}

#[test]
fn commit_links_to_previous_head() {
    let mut repo = Repository::new();
    let c1 = repo.commit("one", &jane()).unwrap();
    let c2 = repo.commit("two", &jane()).unwrap();

    assert!(c1.is_root());
    assert_eq!(c2.parent_id(), Some(c1.id()));
    assert_eq!(repo.parent_of(&c2), Some(&c1));
    assert_eq!(c2.id().as_str().len(), CommitId::LEN);
}

#[test]
fn invalid_commit_leaves_state_unchanged() {
    let mut repo = Repository::new();
    let c1 = repo.commit("one", &jane()).unwrap();

    assert!(repo.commit("", &jane()).unwrap_err().is_invalid_argument());
    assert!(repo.commit(" \t", &jane()).is_err());

    assert_eq!(repo.head(), Some(c1.id()));
    assert_eq!(repo.graph().len(), 1);
}

// =============================================================================
// History
// =============================================================================

#[test]
fn log_is_newest_first_per_branch() {
    let Forked { repo, a, b, f } = Forked::new();
    assert_eq!(ids(&repo.log(Some("main")).unwrap()), vec![b.id().clone(), a.id().clone()]);
    assert_eq!(ids(&repo.log(Some("feature")).unwrap()), vec![f.id().clone(), a.id().clone()]);
    assert_eq!(ids(&repo.log(None).unwrap()), ids(&repo.log(Some("feature")).unwrap()));
}

#[test]
fn reads_are_idempotent() {
    let Forked { repo, .. } = Forked::new();
    for name in ["main", "feature"] {
        assert_eq!(repo.branch(name).unwrap(), repo.branch(name).unwrap());
        assert_eq!(repo.log(Some(name)).unwrap(), repo.log(Some(name)).unwrap());
    }
}

#[test]
fn forked_history_verifies() {
    let Forked { repo, a, f, .. } = Forked::new();
    assert!(verify(&repo).ok);
    assert!(repo.graph().is_ancestor(a.id(), f.id()));
    assert_eq!(repo.get(a.id()), Some(&a));
}
