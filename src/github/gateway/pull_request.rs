//! Octocrab implementation of the pull request gateway.
//!
//! Orchestrates the two fetch paths: the graph path supplies metadata and
//! commits, the commit listing path takes over when the graph path cannot
//! retrieve the full list, and reconciliation picks the winner.

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::warn;

use crate::github::error::GatewayError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::models::PullRequest;
use crate::github::rate_limit::RateLimitInfo;

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::commits::list_pull_request_commits;
use super::graph;
use super::reconcile::reconcile;

/// Ceiling on commit totals the graph API paginates reliably.
///
/// The service stops returning complete commit connections somewhere above
/// this depth; the exact limit is undocumented upstream, so it is a
/// configurable default rather than an architectural constant. Override
/// with [`OctocrabGateway::with_graph_commit_ceiling`].
pub const DEFAULT_GRAPH_COMMIT_CEILING: u64 = 250;

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
    graph_commit_ceiling: u64,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self {
            client,
            graph_commit_ceiling: DEFAULT_GRAPH_COMMIT_CEILING,
        }
    }

    /// Builds an Octocrab client for the given token and pull request
    /// locator.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` when the base URI cannot be parsed
    /// or `GatewayError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, GatewayError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }

    /// Overrides the commit total above which the graph path defers to the
    /// commit listing.
    #[must_use]
    pub const fn with_graph_commit_ceiling(mut self, ceiling: u64) -> Self {
        self.graph_commit_ceiling = ceiling;
        self
    }

    /// Attaches reset information to a rate limit error when the rate limit
    /// endpoint is still reachable.
    async fn enrich_rate_limit(&self, error: GatewayError) -> GatewayError {
        match error {
            GatewayError::RateLimitExceeded {
                rate_limit: None,
                message: base_message,
            } => {
                let rate_limit = self.fetch_rate_limit_info().await;
                let message = match &rate_limit {
                    Some(info) => {
                        format!("{base_message} (resets at {reset})", reset = info.reset_at())
                    }
                    None => base_message,
                };

                GatewayError::RateLimitExceeded {
                    rate_limit,
                    message,
                }
            }
            other => other,
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn fetch_pull_request(
        &self,
        locator: &PullRequestLocator,
        include_commits: bool,
    ) -> Result<PullRequest, GatewayError> {
        let fetch = match graph::fetch_pull_request(
            &self.client,
            locator,
            include_commits,
            self.graph_commit_ceiling,
        )
        .await
        {
            Ok(fetch) => fetch,
            Err(error) => return Err(self.enrich_rate_limit(error).await),
        };

        if !include_commits || !fetch.insufficient {
            return Ok(fetch.record);
        }

        let listed = match list_pull_request_commits(&self.client, locator).await {
            Ok(listed) => listed,
            Err(error) => return Err(self.enrich_rate_limit(error).await),
        };

        let mut record = fetch.record;
        let outcome = reconcile(std::mem::take(&mut record.commits), true, Some(listed));
        if outcome.reverted_to_graph {
            warn!(
                pull_request = record.number,
                total = fetch.total_count,
                "commit listing fallback returned an empty commits list, reverting to the graph commit list"
            );
        }
        record.commits = outcome.commits;
        Ok(record)
    }
}
