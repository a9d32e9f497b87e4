//! Prgate CLI entrypoint for pull request retrieval.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use prgate::{
    GatewayError, OctocrabGateway, PersonalAccessToken, PrgateConfig, PullRequest,
    PullRequestIntake, PullRequestLocator,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), GatewayError> {
    let config = load_config()?;

    let pr_url = config.require_pr_url()?;
    let token_value = config.resolve_token()?;

    let locator = PullRequestLocator::parse(pr_url)?;
    let token = PersonalAccessToken::new(token_value)?;

    let gateway = OctocrabGateway::for_token(&token, &locator)?
        .with_graph_commit_ceiling(config.graph_commit_ceiling());
    let intake = PullRequestIntake::new(&gateway);
    let record = intake.load(&locator, config.include_commits()).await?;

    write_summary(&record)?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GatewayError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PrgateConfig, GatewayError> {
    PrgateConfig::load().map_err(|error| GatewayError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(record: &PullRequest) -> Result<(), GatewayError> {
    let mut stdout = io::stdout().lock();
    let author = record.author.as_deref().unwrap_or("unknown author");
    let message = format!(
        "Loaded PR #{number} by {author}: {title}\nURL: {url}\nBase: {base}\nCommits: {commits}",
        number = record.number,
        title = record.title,
        url = record.url,
        base = record.base_ref_name,
        commits = record.commits.len()
    );

    writeln!(stdout, "{message}").map_err(|error| GatewayError::Io {
        message: error.to_string(),
    })
}
