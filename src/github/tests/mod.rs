//! Unit tests for the GitHub gateway module.

use mockall::predicate::{always, eq};
use rstest::rstest;

use super::{
    Commit, GatewayError, MockPullRequestGateway, PersonalAccessToken, PullRequest,
    PullRequestIntake, PullRequestLocator,
};

fn sample_locator() -> PullRequestLocator {
    PullRequestLocator::parse("https://github.com/octo/repo/pull/4")
        .expect("sample locator should parse")
}

#[rstest]
fn parses_standard_github_url_segments() {
    let locator = PullRequestLocator::parse("https://github.com/octo/repo/pull/12/files")
        .expect("should parse standard GitHub URL");
    assert_eq!(locator.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(locator.repository().as_str(), "repo", "repository mismatch");
    assert_eq!(locator.number().get(), 12_u64, "number mismatch");
}

#[rstest]
fn parses_standard_github_url_api_base() {
    let locator = PullRequestLocator::parse("https://github.com/octo/repo/pull/12/files")
        .expect("should parse standard GitHub URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://api.github.com/",
        "api base mismatch"
    );
}

#[rstest]
fn parses_enterprise_url() {
    let locator = PullRequestLocator::parse("https://ghe.example.com/foo/bar/pull/7")
        .expect("should parse enterprise URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://ghe.example.com/api/v3",
        "enterprise api base mismatch"
    );
}

#[rstest]
fn rejects_missing_number() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/pull/");
    assert!(
        matches!(result, Err(GatewayError::MissingPathSegments)),
        "expected MissingPathSegments, got {result:?}"
    );
}

#[rstest]
fn rejects_non_numeric_number() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/pull/not-a-number");
    assert!(
        matches!(result, Err(GatewayError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber, got {result:?}"
    );
}

#[rstest]
fn rejects_zero_number() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/pull/0");
    assert!(
        matches!(result, Err(GatewayError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber for zero, got {result:?}"
    );
}

#[rstest]
fn rejects_issues_path() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/issues/4");
    assert!(
        matches!(result, Err(GatewayError::MissingPathSegments)),
        "expected MissingPathSegments for issues path, got {result:?}"
    );
}

#[rstest]
fn rejects_invalid_url() {
    let result = PullRequestLocator::parse("octo/repo/pull/4");
    assert!(
        matches!(result, Err(GatewayError::InvalidUrl(_))),
        "expected InvalidUrl for malformed URL, got {result:?}"
    );
}

#[rstest]
fn locator_from_parts_builds_rest_paths() {
    let locator =
        PullRequestLocator::from_parts("octo", "repo", 4).expect("should create locator");
    assert_eq!(
        locator.pull_request_path(),
        "/repos/octo/repo/pulls/4",
        "pull request path mismatch"
    );
    assert_eq!(
        locator.commits_path(),
        "/repos/octo/repo/commits",
        "commits path mismatch"
    );
}

#[rstest]
fn locator_from_parts_rejects_empty_owner() {
    let result = PullRequestLocator::from_parts("", "repo", 4);
    assert!(
        matches!(result, Err(GatewayError::MissingPathSegments)),
        "expected MissingPathSegments for empty owner, got {result:?}"
    );
}

#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new(String::new());
    assert!(
        matches!(result, Err(GatewayError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn token_trims_surrounding_whitespace() {
    let token = PersonalAccessToken::new("  ghp_example  ").expect("token should be valid");
    assert_eq!(token.value(), "ghp_example", "token should be trimmed");
}

/// Sets up a mock gateway returning a record with two commits.
fn setup_gateway(expected_include_commits: bool) -> MockPullRequestGateway {
    let mut gateway = MockPullRequestGateway::new();

    gateway
        .expect_fetch_pull_request()
        .with(always(), eq(expected_include_commits))
        .times(1)
        .returning(move |_, include_commits| {
            let commits = if include_commits {
                vec![
                    Commit {
                        oid: String::from("one"),
                        message: String::from("first"),
                    },
                    Commit {
                        oid: String::from("two"),
                        message: String::from("second"),
                    },
                ]
            } else {
                Vec::new()
            };
            Ok(PullRequest {
                url: String::from("https://github.com/octo/repo/pull/4"),
                title: String::from("demo"),
                number: 4,
                author: Some(String::from("octocat")),
                commits,
                ..PullRequest::default()
            })
        });

    gateway
}

#[tokio::test]
async fn intake_loads_record_with_commits() {
    let locator = sample_locator();
    let gateway = setup_gateway(true);

    let intake = PullRequestIntake::new(&gateway);
    let record = intake
        .load(&locator, true)
        .await
        .expect("intake should succeed");

    assert_eq!(record.number, 4, "number mismatch");
    assert_eq!(record.title, "demo", "title mismatch");
    assert_eq!(
        record.author.as_deref(),
        Some("octocat"),
        "author mismatch"
    );
    assert_eq!(record.commits.len(), 2, "commit count mismatch");
    assert_eq!(
        record.commits.first().map(|commit| commit.oid.as_str()),
        Some("one"),
        "commit order mismatch"
    );
}

#[tokio::test]
async fn intake_passes_metadata_only_flag_through() {
    let locator = sample_locator();
    let gateway = setup_gateway(false);

    let intake = PullRequestIntake::new(&gateway);
    let record = intake
        .load(&locator, false)
        .await
        .expect("intake should succeed");

    assert!(
        record.commits.is_empty(),
        "metadata-only load should carry no commits"
    );
}

#[tokio::test]
async fn intake_propagates_gateway_errors() {
    let locator = sample_locator();
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_fetch_pull_request()
        .times(1)
        .returning(|_, _| {
            Err(GatewayError::Network {
                message: String::from("connection reset"),
            })
        });

    let intake = PullRequestIntake::new(&gateway);
    let result = intake.load(&locator, true).await;

    assert!(
        matches!(result, Err(GatewayError::Network { .. })),
        "expected Network error, got {result:?}"
    );
}
