//! Data models for the canonical pull request record.
//!
//! This module contains the domain models produced by the gateway and the
//! REST deserialisation targets used by the fallback commit listing. Types
//! prefixed with `Api` are internal deserialisation targets that convert
//! into public domain types.

use serde::Deserialize;

/// A single commit within a pull request.
///
/// Ordering is significant: commits appear in the order the service reports
/// them for the pull request (oldest first), regardless of which API path
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Content hash identifying the commit.
    pub oid: String,
    /// Commit message.
    pub message: String,
}

/// Canonical pull request record assembled by the gateway.
///
/// Constructed fresh per fetch and never mutated afterwards. When commits
/// were requested and the fetch succeeded, `commits` holds the full ordered
/// list as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    /// HTML URL for displaying to a user.
    pub url: String,
    /// Title of the pull request.
    pub title: String,
    /// Pull request number.
    pub number: u64,
    /// Pull request description body.
    pub body: String,
    /// Author login if the author account still exists.
    pub author: Option<String>,
    /// Assignee logins in service order.
    pub assignees: Vec<String>,
    /// Name of the base branch the pull request targets.
    pub base_ref_name: String,
    /// File paths at the root of the head commit's tree.
    pub head_tree_paths: Vec<String>,
    /// Ordered commit list; empty when commits were not requested.
    pub commits: Vec<Commit>,
    /// Whether the repository is private.
    pub is_private: bool,
}

/// REST response for `GET /repos/{owner}/{repo}/pulls/{number}`.
///
/// Only the fields the fallback commit listing needs: the service-reported
/// commit total and the head SHA to walk history from.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) commits: u64,
    pub(super) head: ApiHeadRef,
}

/// Head ref fragment of the REST pull request response.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiHeadRef {
    pub(super) sha: String,
}

/// One element of the `GET /repos/{owner}/{repo}/commits` listing.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiListedCommit {
    pub(super) sha: String,
    pub(super) commit: ApiCommitDetail,
}

/// Nested commit object of the listing response.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitDetail {
    #[serde(default)]
    pub(super) message: String,
}

impl From<ApiListedCommit> for Commit {
    fn from(value: ApiListedCommit) -> Self {
        Self {
            oid: value.sha,
            message: value.commit.message,
        }
    }
}
