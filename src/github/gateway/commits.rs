//! Fallback fetch path: sequential page-number paging over the REST commit
//! listing.
//!
//! Used when the graph path cannot retrieve the full commit list. The
//! listing endpoint walks the head commit's ancestry and is not scoped to
//! the pull request, so the accumulated list is truncated to the
//! service-reported total before being reordered.

use octocrab::Octocrab;
use tracing::debug;

use crate::github::error::GatewayError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{ApiListedCommit, ApiPullRequest, Commit};

use super::error_mapping::map_octocrab_error;

/// Number of commits requested per listing page.
const LIST_PAGE_SIZE: usize = 100;

/// Fetches the pull request's commits by paging the commit listing from the
/// head SHA.
///
/// Pages are requested sequentially from page 1 until the accumulated count
/// reaches the total reported by the pull request endpoint, or a short or
/// empty page signals the end of the list. An empty *first* page yields an
/// empty list, not an error; the caller decides what that means.
///
/// The listing reports history newest-first while the pull request's own
/// commit order is oldest-first, so the result is reversed before mapping.
pub(super) async fn list_pull_request_commits(
    client: &Octocrab,
    locator: &PullRequestLocator,
) -> Result<Vec<Commit>, GatewayError> {
    let pull: ApiPullRequest = client
        .get(locator.pull_request_path(), None::<&()>)
        .await
        .map_err(|error| map_octocrab_error("pull request metadata", &error))?;

    let total = usize::try_from(pull.commits).unwrap_or(usize::MAX);
    let per_page_str = LIST_PAGE_SIZE.to_string();

    let mut listed: Vec<ApiListedCommit> = Vec::new();
    let mut page: u32 = 1;
    loop {
        let page_str = page.to_string();
        let query = [
            ("sha", pull.head.sha.as_str()),
            ("per_page", per_page_str.as_str()),
            ("page", page_str.as_str()),
        ];

        let batch: Vec<ApiListedCommit> = client
            .get(locator.commits_path(), Some(&query))
            .await
            .map_err(|error| map_octocrab_error("commit listing", &error))?;

        if batch.is_empty() {
            break;
        }

        let short_page = batch.len() < LIST_PAGE_SIZE;
        listed.extend(batch);
        if short_page || listed.len() >= total {
            break;
        }
        page += 1;
    }

    listed.truncate(total);
    listed.reverse();
    debug!(commits = listed.len(), "commit listing pagination complete");
    Ok(listed.into_iter().map(Commit::from).collect())
}
