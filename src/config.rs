use std::fmt;
use url::Url;

use crate::cli::ApplyArgs;
use crate::error::ConfigError;
use crate::github::DEFAULT_API_URL;

pub const DEFAULT_BRANCH_NAME: &str = "default-branch";

/// Settings for one run, built once at startup and passed to every operation
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: Option<String>,
    pub branch_name: String,
    pub api_url: String,
    pub create_branch: bool,
    pub create_release: bool,
    pub dry_run: bool,
}

impl Config {
    /// Both operations enabled against the public API
    pub fn new(token: &str, branch_name: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            branch_name: branch_name.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            create_branch: true,
            create_release: true,
            dry_run: false,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    pub fn from_apply_args(args: &ApplyArgs) -> Result<Self, ConfigError> {
        let config = Self {
            token: args
                .token
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            branch_name: args.branch_name.trim().to_string(),
            api_url: args.api_url.trim().to_string(),
            create_branch: !args.no_branch,
            create_release: !args.no_release,
            dry_run: args.dry_run,
        };
        config.validate()?;

        log::debug!("Using {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.create_branch && !self.create_release {
            return Err(ConfigError::NothingEnabled);
        }
        if self.create_branch && self.branch_name.is_empty() {
            return Err(ConfigError::EmptyBranchName);
        }
        if !self.dry_run && self.token.is_none() {
            return Err(ConfigError::MissingToken);
        }

        match Url::parse(&self.api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => Err(ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                reason: e.to_string(),
            }),
        }
    }
}

// Keeps the token out of debug logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("branch_name", &self.branch_name)
            .field("api_url", &self.api_url)
            .field("create_branch", &self.create_branch)
            .field("create_release", &self.create_release)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> ApplyArgs {
        ApplyArgs {
            file: PathBuf::from("rows.csv"),
            branch_name: DEFAULT_BRANCH_NAME.to_string(),
            token: Some("ghp_secret".to_string()),
            api_url: DEFAULT_API_URL.to_string(),
            no_branch: false,
            no_release: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_apply_args(&args()).unwrap();
        assert_eq!(config, Config::new("ghp_secret", DEFAULT_BRANCH_NAME));
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut args = args();
        args.token = Some("   ".to_string());
        assert_eq!(Config::from_apply_args(&args), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_dry_run_needs_no_token() {
        let mut args = args();
        args.token = None;
        args.dry_run = true;
        assert!(Config::from_apply_args(&args).is_ok());
    }

    #[test]
    fn test_empty_branch_only_matters_when_creating_branches() {
        let mut args = args();
        args.branch_name = " ".to_string();
        assert_eq!(
            Config::from_apply_args(&args),
            Err(ConfigError::EmptyBranchName)
        );

        args.no_branch = true;
        assert!(Config::from_apply_args(&args).is_ok());
    }

    #[test]
    fn test_everything_disabled_rejected() {
        let mut args = args();
        args.no_branch = true;
        args.no_release = true;
        assert_eq!(Config::from_apply_args(&args), Err(ConfigError::NothingEnabled));
    }

    #[test]
    fn test_bad_api_url_rejected() {
        let mut args = args();
        args.api_url = "not a url".to_string();
        assert!(matches!(
            Config::from_apply_args(&args),
            Err(ConfigError::InvalidApiUrl { .. })
        ));

        args.api_url = "ftp://example.com".to_string();
        assert!(matches!(
            Config::from_apply_args(&args),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Config::new("ghp_secret", "main"));
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
