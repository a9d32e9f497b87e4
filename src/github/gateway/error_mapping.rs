//! Error mapping helpers for the Octocrab gateway implementation.

use http::StatusCode;

use crate::github::error::GatewayError;
use crate::github::graphql::GraphQueryError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks if an octocrab error represents a response the gateway could not
/// decode.
pub(super) const fn is_decode_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> GatewayError {
    if let octocrab::Error::GitHub { source, .. } = error {
        if is_rate_limit_error(source) {
            return GatewayError::RateLimitExceeded {
                rate_limit: None,
                message: format!(
                    "{operation} failed: {message}",
                    message = source.message
                ),
            };
        }

        return if is_auth_failure(source.status_code) {
            GatewayError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else if source.status_code == StatusCode::NOT_FOUND {
            GatewayError::NotFound {
                message: format!(
                    "{operation} failed: {message}",
                    message = source.message
                ),
            }
        } else {
            GatewayError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return GatewayError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    if is_decode_error(error) {
        return GatewayError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    GatewayError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a well-formed GraphQL error payload to a typed error.
///
/// `NOT_FOUND` and `FORBIDDEN` error kinds cover both missing resources and
/// token scopes that cannot see them; `RATE_LIMITED` maps to the dedicated
/// variant so callers can back off.
pub(super) fn map_graph_errors(operation: &str, errors: &[GraphQueryError]) -> GatewayError {
    let message = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    let kind_is = |expected: &str| {
        errors
            .iter()
            .any(|error| error.kind.as_deref() == Some(expected))
    };

    if kind_is("NOT_FOUND") || kind_is("FORBIDDEN") {
        GatewayError::NotFound {
            message: format!("{operation} failed: {message}"),
        }
    } else if kind_is("RATE_LIMITED") {
        GatewayError::RateLimitExceeded {
            rate_limit: None,
            message: format!("{operation} failed: {message}"),
        }
    } else {
        GatewayError::Api {
            message: format!("{operation} failed: {message}"),
        }
    }
}
