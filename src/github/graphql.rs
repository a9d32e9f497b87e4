//! GraphQL documents and wire types for the primary fetch path.
//!
//! The gateway issues one structured query per commit page. These types are
//! internal deserialisation targets shaped by the query documents below;
//! they convert into the public domain types in [`super::models`].

use serde::Deserialize;

use super::models::{Commit, PullRequest};

/// GraphQL document fetching pull request metadata plus one page of the
/// commits connection. The cursor is `null` on the first page and the
/// previous page's `endCursor` afterwards.
pub(super) const PULL_REQUEST_QUERY: &str = r"
query PullRequestWithCommits($owner: String!, $name: String!, $number: Int!, $commitPageSize: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    isPrivate
    pullRequest(number: $number) {
      url
      title
      number
      body
      author { login }
      assignees(first: 100) { edges { node { login } } }
      baseRef { name }
      headRef {
        target {
          ... on Commit {
            tree { entries { path } }
          }
        }
      }
      commits(first: $commitPageSize, after: $cursor) {
        totalCount
        edges { node { commit { message oid } } }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
";

/// Commit-free variant of [`PULL_REQUEST_QUERY`] serving the metadata-only
/// fast path.
pub(super) const PULL_REQUEST_METADATA_QUERY: &str = r"
query PullRequestMetadata($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    isPrivate
    pullRequest(number: $number) {
      url
      title
      number
      body
      author { login }
      assignees(first: 100) { edges { node { login } } }
      baseRef { name }
      headRef {
        target {
          ... on Commit {
            tree { entries { path } }
          }
        }
      }
    }
  }
}
";

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphResponse {
    pub(super) data: Option<GraphData>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQueryError>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphQueryError {
    pub(super) message: String,
    #[serde(rename = "type")]
    pub(super) kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphData {
    pub(super) repository: Option<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryNode {
    #[serde(default)]
    pub(super) is_private: bool,
    pub(super) pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PullRequestNode {
    pub(super) url: String,
    pub(super) title: String,
    pub(super) number: u64,
    pub(super) body: Option<String>,
    pub(super) author: Option<ActorNode>,
    pub(super) assignees: Option<AssigneeConnection>,
    pub(super) base_ref: Option<RefNode>,
    pub(super) head_ref: Option<HeadRefNode>,
    pub(super) commits: Option<CommitConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ActorNode {
    pub(super) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct AssigneeConnection {
    #[serde(default)]
    pub(super) edges: Vec<AssigneeEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct AssigneeEdge {
    pub(super) node: ActorNode,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RefNode {
    pub(super) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct HeadRefNode {
    pub(super) target: Option<TargetNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct TargetNode {
    pub(super) tree: Option<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct TreeNode {
    #[serde(default)]
    pub(super) entries: Vec<TreeEntryNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct TreeEntryNode {
    pub(super) path: Option<String>,
}

/// One page of the commits connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommitConnection {
    pub(super) total_count: u64,
    #[serde(default)]
    pub(super) edges: Vec<CommitEdge>,
    pub(super) page_info: PageInfoNode,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct CommitEdge {
    pub(super) node: CommitEdgeNode,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct CommitEdgeNode {
    pub(super) commit: CommitNode,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct CommitNode {
    pub(super) oid: String,
    #[serde(default)]
    pub(super) message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PageInfoNode {
    pub(super) has_next_page: bool,
    pub(super) end_cursor: Option<String>,
}

impl CommitConnection {
    /// Drains the page's commit nodes in server order.
    pub(super) fn into_commits(self) -> Vec<Commit> {
        self.edges
            .into_iter()
            .map(|edge| Commit {
                oid: edge.node.commit.oid,
                message: edge.node.commit.message,
            })
            .collect()
    }
}

impl PullRequestNode {
    /// Maps the graph node into the canonical record, leaving the commit
    /// list empty for the fetch loop to fill.
    ///
    /// Absent optional fields (deleted author, no assignees, no head-ref
    /// tree) map to `None` or empty collections rather than failing.
    pub(super) fn into_record(self, is_private: bool) -> PullRequest {
        let assignees = self
            .assignees
            .map(|connection| {
                connection
                    .edges
                    .into_iter()
                    .map(|edge| edge.node.login)
                    .collect()
            })
            .unwrap_or_default();

        let head_tree_paths = self
            .head_ref
            .and_then(|head| head.target)
            .and_then(|target| target.tree)
            .map(|tree| {
                tree.entries
                    .into_iter()
                    .filter_map(|entry| entry.path)
                    .collect()
            })
            .unwrap_or_default();

        PullRequest {
            url: self.url,
            title: self.title,
            number: self.number,
            body: self.body.unwrap_or_default(),
            author: self.author.map(|actor| actor.login),
            assignees,
            base_ref_name: self.base_ref.map(|base| base.name).unwrap_or_default(),
            head_tree_paths,
            commits: Vec::new(),
            is_private,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{GraphResponse, PullRequestNode};

    fn sample_node(value: serde_json::Value) -> PullRequestNode {
        serde_json::from_value(value).expect("pull request node should deserialise")
    }

    #[test]
    fn maps_full_payload_into_record() {
        let node = sample_node(json!({
            "url": "https://github.com/octo/repo/pull/1",
            "title": "Add feature",
            "number": 1,
            "body": "description",
            "author": { "login": "alice" },
            "assignees": { "edges": [
                { "node": { "login": "bob" } },
                { "node": { "login": "carol" } }
            ] },
            "baseRef": { "name": "main" },
            "headRef": { "target": { "tree": { "entries": [
                { "path": "README.md" },
                { "path": "src" }
            ] } } }
        }));

        let record = node.into_record(true);
        assert_eq!(record.number, 1, "number mismatch");
        assert_eq!(record.author.as_deref(), Some("alice"), "author mismatch");
        assert_eq!(
            record.assignees,
            vec!["bob".to_owned(), "carol".to_owned()],
            "assignees should preserve service order"
        );
        assert_eq!(record.base_ref_name, "main", "base ref mismatch");
        assert_eq!(
            record.head_tree_paths,
            vec!["README.md".to_owned(), "src".to_owned()],
            "tree paths mismatch"
        );
        assert!(record.is_private, "privacy flag mismatch");
        assert!(record.commits.is_empty(), "commits are filled by the loop");
    }

    #[rstest]
    #[case::fields_null(json!({
        "url": "u", "title": "t", "number": 2, "body": null,
        "author": null, "assignees": null, "baseRef": null, "headRef": null
    }))]
    #[case::fields_absent(json!({"url": "u", "title": "t", "number": 2}))]
    #[case::empty_connections(json!({
        "url": "u", "title": "t", "number": 2, "body": "",
        "assignees": { "edges": [] },
        "headRef": { "target": { "tree": { "entries": [] } } }
    }))]
    fn maps_missing_optional_fields_to_empty(#[case] value: serde_json::Value) {
        let record = sample_node(value).into_record(false);

        assert_eq!(record.number, 2, "number mismatch");
        assert!(record.author.is_none(), "author should be absent");
        assert!(record.assignees.is_empty(), "assignees should be empty");
        assert!(
            record.head_tree_paths.is_empty(),
            "tree paths should be empty"
        );
        assert!(record.base_ref_name.is_empty(), "base ref should be empty");
    }

    #[test]
    fn commit_connection_preserves_server_order() {
        let response: GraphResponse = serde_json::from_value(json!({
            "data": { "repository": {
                "isPrivate": false,
                "pullRequest": {
                    "url": "u", "title": "t", "number": 3,
                    "commits": {
                        "totalCount": 2,
                        "edges": [
                            { "node": { "commit": { "oid": "first", "message": "one" } } },
                            { "node": { "commit": { "oid": "second", "message": "two" } } }
                        ],
                        "pageInfo": { "hasNextPage": false, "endCursor": null }
                    }
                }
            } }
        }))
        .expect("response should deserialise");

        let connection = response
            .data
            .and_then(|data| data.repository)
            .and_then(|repository| repository.pull_request)
            .and_then(|node| node.commits)
            .expect("commits connection should be present");

        assert_eq!(connection.total_count, 2, "total count mismatch");
        let oids: Vec<String> = connection
            .into_commits()
            .into_iter()
            .map(|commit| commit.oid)
            .collect();
        assert_eq!(
            oids,
            vec!["first".to_owned(), "second".to_owned()],
            "page order must match server order"
        );
    }

    #[test]
    fn error_payload_deserialises_kind() {
        let response: GraphResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [ { "type": "NOT_FOUND", "message": "no such repository" } ]
        }))
        .expect("error payload should deserialise");

        assert!(response.data.is_none(), "data should be null");
        let error = response.errors.first().expect("one error expected");
        assert_eq!(error.kind.as_deref(), Some("NOT_FOUND"), "kind mismatch");
        assert_eq!(error.message, "no such repository", "message mismatch");
    }
}
