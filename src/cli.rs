use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_BRANCH_NAME;
use crate::github::DEFAULT_API_URL;

pub const DEFAULT_INPUT_FILE: &str = "create-branch.csv";

#[derive(Parser)]
#[command(name = "release-brancher")]
#[command(about = "Create branches and GitHub releases from tags listed in a CSV file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a branch and a release for every row of the CSV file
    Apply(ApplyArgs),
    /// Validate the CSV file without contacting GitHub
    Check {
        /// CSV file with repo_name, tag, release_name, release_description columns
        #[arg(default_value = DEFAULT_INPUT_FILE)]
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// CSV file with repo_name, tag, release_name, release_description columns
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    pub file: PathBuf,

    /// Name of the branch created in every repository
    #[arg(long, env = "BRANCH_NAME", default_value = DEFAULT_BRANCH_NAME)]
    pub branch_name: String,

    /// GitHub token used for every request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Do not create branches
    #[arg(long)]
    pub no_branch: bool,

    /// Do not create releases
    #[arg(long)]
    pub no_release: bool,

    /// Show what would be done without calling GitHub
    #[arg(long)]
    pub dry_run: bool,
}
