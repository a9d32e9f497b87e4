//! Prgate library crate providing a pull request data gateway.
//!
//! The library wraps Octocrab to parse pull request URLs, validate tokens,
//! and retrieve a canonical pull request record whose commit list is
//! reconciled from the service's GraphQL and REST APIs, surfacing friendly
//! errors that can be displayed in the CLI.

pub mod config;
pub mod github;

pub use config::PrgateConfig;
pub use github::{
    GatewayError, OctocrabGateway, PersonalAccessToken, PullRequest, PullRequestGateway,
    PullRequestIntake, PullRequestLocator,
};
