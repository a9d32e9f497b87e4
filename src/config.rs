//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prgate.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRGATE_PR_URL`, `PRGATE_TOKEN`, or legacy
//!    `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--pr-url`/`-u` and `--token`/`-t`
//!
//! # Configuration File
//!
//! Place `.prgate.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! pr_url = "https://github.com/owner/repo/pull/123"
//! token = "ghp_example"
//! graph_commit_ceiling = 250
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::DEFAULT_GRAPH_COMMIT_CEILING;
use crate::github::error::GatewayError;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PRGATE_PR_URL` or `--pr-url`: Pull request URL
/// - `PRGATE_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `PRGATE_METADATA_ONLY` or `--metadata-only`: Skip commit retrieval
/// - `PRGATE_GRAPH_COMMIT_CEILING` or `--graph-commit-ceiling`: Commit total
///   above which the graph path defers to the commit listing
///
/// # Example
///
/// ```no_run
/// use prgate::PrgateConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = PrgateConfig::load().expect("failed to load configuration");
/// let pr_url = config.require_pr_url().expect("PR URL required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRGATE",
    discovery(
        dotfile_name = ".prgate.toml",
        config_file_name = "prgate.toml",
        app_name = "prgate"
    )
)]
pub struct PrgateConfig {
    /// GitHub pull request URL to fetch.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `PRGATE_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PRGATE_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Fetches metadata only, skipping commit retrieval entirely.
    ///
    /// When set, the gateway uses the commit-free fast path and never
    /// consults the commit listing endpoint.
    pub metadata_only: bool,

    /// Commit total above which the graph path defers to the commit listing.
    ///
    /// The service's limit is undocumented and may change; leave unset to
    /// use the built-in default.
    pub graph_commit_ceiling: Option<u64>,
}

impl PrgateConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// For backward compatibility, if no token is provided via
    /// `PRGATE_TOKEN`, the CLI, or a configuration file, this method falls
    /// back to reading `GITHUB_TOKEN` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingToken`] when no token source provides
    /// a value.
    pub fn resolve_token(&self) -> Result<String, GatewayError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(GatewayError::MissingToken)
    }

    /// Returns the pull request URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingPullRequestUrl`] when no URL is
    /// configured.
    pub fn require_pr_url(&self) -> Result<&str, GatewayError> {
        self.pr_url
            .as_deref()
            .ok_or(GatewayError::MissingPullRequestUrl)
    }

    /// Whether the gateway should retrieve the full commit list.
    #[must_use]
    pub const fn include_commits(&self) -> bool {
        !self.metadata_only
    }

    /// Returns the configured graph commit ceiling, or the built-in default.
    #[must_use]
    pub const fn graph_commit_ceiling(&self) -> u64 {
        match self.graph_commit_ceiling {
            Some(ceiling) => ceiling,
            None => DEFAULT_GRAPH_COMMIT_CEILING,
        }
    }
}
