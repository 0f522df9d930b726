use crate::config::Config;
use crate::error::ConfigError;
use crate::github::{GitHubClient, GitHubClientTrait};

/// Build the real GitHub client for a validated config
pub fn create_github_client(
    config: &Config,
) -> Result<Box<dyn GitHubClientTrait>, Box<dyn std::error::Error>> {
    let token = config.token.as_deref().ok_or(ConfigError::MissingToken)?;
    let client = GitHubClient::new(token, &config.api_url)?;
    Ok(Box::new(client))
}
