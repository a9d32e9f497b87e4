//! Gateways for loading pull requests through Octocrab.
//!
//! This module provides the trait-based gateway for communicating with the
//! GitHub API. The trait-based design enables mocking in tests while the
//! Octocrab implementation reconciles the GraphQL and REST commit sources
//! behind one fetch operation.

mod client;
mod commits;
mod error_mapping;
mod graph;
mod pull_request;
mod reconcile;

pub use pull_request::{DEFAULT_GRAPH_COMMIT_CEILING, OctocrabGateway};

use async_trait::async_trait;

use crate::github::error::GatewayError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::PullRequest;

/// Gateway that can load pull request data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch the pull request, including its full ordered commit list when
    /// `include_commits` is set.
    async fn fetch_pull_request(
        &self,
        locator: &PullRequestLocator,
        include_commits: bool,
    ) -> Result<PullRequest, GatewayError>;
}
