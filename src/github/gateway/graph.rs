//! Primary fetch path: one GraphQL query per commit page, following the
//! connection cursor until the list is complete.

use octocrab::Octocrab;
use serde_json::json;
use tracing::debug;

use crate::github::error::GatewayError;
use crate::github::graphql::{
    GraphResponse, PULL_REQUEST_METADATA_QUERY, PULL_REQUEST_QUERY, PullRequestNode,
    RepositoryNode,
};
use crate::github::locator::PullRequestLocator;
use crate::github::models::PullRequest;

use super::error_mapping::{map_graph_errors, map_octocrab_error};

/// Number of commit nodes requested per page.
const COMMIT_PAGE_SIZE: u64 = 100;

/// Result of the graph path.
///
/// `insufficient` marks a commit list that is known to be incomplete: the
/// reported total exceeds the ceiling the graph API paginates reliably, or
/// the first page came back empty despite a non-zero total. The caller is
/// expected to prefer the commit listing path in that case.
#[derive(Debug)]
pub(super) struct GraphFetch {
    pub(super) record: PullRequest,
    pub(super) total_count: u64,
    pub(super) insufficient: bool,
}

/// Fetches the pull request through the GraphQL endpoint.
///
/// With `include_commits` unset a commit-free document is used and no
/// pagination occurs. Otherwise pages are appended in server order until
/// `hasNextPage` is false; cursors guarantee disjoint pages so no
/// deduplication is needed.
pub(super) async fn fetch_pull_request(
    client: &Octocrab,
    locator: &PullRequestLocator,
    include_commits: bool,
    commit_ceiling: u64,
) -> Result<GraphFetch, GatewayError> {
    if !include_commits {
        let repository = run_query(client, &metadata_payload(locator)).await?;
        let (is_private, node) = require_pull_request(repository)?;
        return Ok(GraphFetch {
            record: node.into_record(is_private),
            total_count: 0,
            insufficient: false,
        });
    }

    let repository = run_query(client, &commits_payload(locator, None)).await?;
    let (is_private, mut node) = require_pull_request(repository)?;
    let connection = node.commits.take().ok_or_else(|| GatewayError::Decode {
        message: "pull request query response lacked a commits connection".to_owned(),
    })?;
    let mut record = node.into_record(is_private);

    let total_count = connection.total_count;
    let mut has_next = connection.page_info.has_next_page;
    let mut cursor = connection.page_info.end_cursor.clone();
    let mut commits = connection.into_commits();

    if total_count > commit_ceiling {
        debug!(
            total = total_count,
            ceiling = commit_ceiling,
            "commit total exceeds reliable graph pagination, deferring to the commit listing"
        );
        record.commits = commits;
        return Ok(GraphFetch {
            record,
            total_count,
            insufficient: true,
        });
    }

    if commits.is_empty() && total_count > 0 {
        return Ok(GraphFetch {
            record,
            total_count,
            insufficient: true,
        });
    }

    while has_next {
        let page_repository =
            run_query(client, &commits_payload(locator, cursor.as_deref())).await?;
        let (_, mut page_node) = require_pull_request(page_repository)?;
        let page = page_node.commits.take().ok_or_else(|| GatewayError::Decode {
            message: "pull request query response lacked a commits connection".to_owned(),
        })?;

        has_next = page.page_info.has_next_page;
        cursor = page.page_info.end_cursor.clone();
        commits.extend(page.into_commits());
    }

    debug!(
        commits = commits.len(),
        total = total_count,
        "graph pagination complete"
    );
    record.commits = commits;
    Ok(GraphFetch {
        record,
        total_count,
        insufficient: false,
    })
}

fn commits_payload(locator: &PullRequestLocator, cursor: Option<&str>) -> serde_json::Value {
    json!({
        "query": PULL_REQUEST_QUERY,
        "variables": {
            "owner": locator.owner().as_str(),
            "name": locator.repository().as_str(),
            "number": locator.number().get(),
            "commitPageSize": COMMIT_PAGE_SIZE,
            "cursor": cursor,
        }
    })
}

fn metadata_payload(locator: &PullRequestLocator) -> serde_json::Value {
    json!({
        "query": PULL_REQUEST_METADATA_QUERY,
        "variables": {
            "owner": locator.owner().as_str(),
            "name": locator.repository().as_str(),
            "number": locator.number().get(),
        }
    })
}

async fn run_query(
    client: &Octocrab,
    payload: &serde_json::Value,
) -> Result<RepositoryNode, GatewayError> {
    let response: GraphResponse = client
        .graphql(payload)
        .await
        .map_err(|error| map_octocrab_error("pull request query", &error))?;

    if !response.errors.is_empty() {
        return Err(map_graph_errors("pull request query", &response.errors));
    }

    response
        .data
        .and_then(|data| data.repository)
        .ok_or_else(|| GatewayError::NotFound {
            message: "pull request query returned no repository".to_owned(),
        })
}

fn require_pull_request(
    repository: RepositoryNode,
) -> Result<(bool, PullRequestNode), GatewayError> {
    let RepositoryNode {
        is_private,
        pull_request,
    } = repository;
    let node = pull_request.ok_or_else(|| GatewayError::NotFound {
        message: "repository has no such pull request".to_owned(),
    })?;
    Ok((is_private, node))
}
