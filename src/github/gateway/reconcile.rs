//! Reconciliation of the graph and listing commit sources.

use crate::github::models::Commit;

/// Outcome of reconciling the two commit sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Reconciliation {
    /// The winning commit sequence.
    pub(super) commits: Vec<Commit>,
    /// True when an empty listing result was discarded in favour of the
    /// graph result; the caller surfaces a diagnostic for this.
    pub(super) reverted_to_graph: bool,
}

/// Chooses the authoritative commit list.
///
/// The graph list wins outright when it is complete, or when the listing
/// path was never consulted. A consulted listing wins only if non-empty: a
/// pull request with a non-zero commit total cannot legitimately have zero
/// commits, so an empty listing indicates a degraded or permission-scoped
/// response, and trusting it would destroy data the graph path already
/// retrieved. The emptier source never overrides the fuller one.
pub(super) fn reconcile(
    graph_commits: Vec<Commit>,
    graph_insufficient: bool,
    listed_commits: Option<Vec<Commit>>,
) -> Reconciliation {
    let Some(listed) = listed_commits else {
        return Reconciliation {
            commits: graph_commits,
            reverted_to_graph: false,
        };
    };

    if !graph_insufficient {
        return Reconciliation {
            commits: graph_commits,
            reverted_to_graph: false,
        };
    }

    if listed.is_empty() {
        return Reconciliation {
            commits: graph_commits,
            reverted_to_graph: true,
        };
    }

    Reconciliation {
        commits: listed,
        reverted_to_graph: false,
    }
}
