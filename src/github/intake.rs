//! High-level intake facade used by the CLI.

use super::error::GatewayError;
use super::gateway::PullRequestGateway;
use super::locator::PullRequestLocator;
use super::models::PullRequest;

/// Loads canonical pull request records using a gateway.
pub struct PullRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> PullRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Load the target pull request, with its full commit list when
    /// `include_commits` is set.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway, including GitHub
    /// authentication errors or network problems.
    pub async fn load(
        &self,
        locator: &PullRequestLocator,
        include_commits: bool,
    ) -> Result<PullRequest, GatewayError> {
        self.client
            .fetch_pull_request(locator, include_commits)
            .await
    }
}
