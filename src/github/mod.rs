//! GitHub pull request retrieval and reconciliation.
//!
//! This module wraps Octocrab to parse pull request URLs, validate personal
//! access tokens, and assemble a canonical pull request record from the two
//! commit sources the service exposes. Errors are mapped into user-friendly
//! variants so that callers can surface precise failures without exposing
//! Octocrab internals.

pub mod error;
pub mod gateway;
mod graphql;
pub mod intake;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::GatewayError;
pub use gateway::{DEFAULT_GRAPH_COMMIT_CEILING, OctocrabGateway, PullRequestGateway};
pub use intake::PullRequestIntake;
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
};
pub use models::{Commit, PullRequest};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;

#[cfg(test)]
mod tests;
