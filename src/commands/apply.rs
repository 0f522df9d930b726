use crate::batch::{self, BatchReport};
use crate::cli::ApplyArgs;
use crate::client_factory;
use crate::config::Config;
use crate::github::GitHubClientTrait;
use crate::manifest::{self, ReleaseRow};
use crate::report;

pub async fn handle_apply(args: &ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows = manifest::load_rows(&args.file)?;

    if rows.is_empty() {
        println!("No rows found in {}", args.file.display());
        return Ok(());
    }

    // only validated once there is work to do
    let config = Config::from_apply_args(args)?;

    if config.dry_run {
        for line in report::dry_run_lines(&rows, &config) {
            println!("{}", line);
        }
        return Ok(());
    }

    let client = client_factory::create_github_client(&config)?;
    run_with_client(client.as_ref(), &config, &rows).await;
    Ok(())
}

/// Run the batch and print its summary. Per-row failures are part of the
/// report, never an error.
pub async fn run_with_client(
    client: &dyn GitHubClientTrait,
    config: &Config,
    rows: &[ReleaseRow],
) -> BatchReport {
    println!(
        "Processing {} row{} (branch: {}, release: {})",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" },
        if config.create_branch { config.branch_name.as_str() } else { "off" },
        if config.create_release { "on" } else { "off" }
    );

    let report = batch::run_batch(client, config, rows).await;
    report::print_summary(&report, config);
    report
}
