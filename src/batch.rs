use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::OperationError;
use crate::github::{GitHubClientTrait, ReleaseInfo};
use crate::manifest::ReleaseRow;
use crate::release_ops::{self, BranchCreated};
use crate::report;

/// Outcome of one step for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    Succeeded(T),
    Failed(OperationError),
    /// Disabled for this run
    Skipped,
}

impl<T> StepOutcome<T> {
    fn from_result(result: Result<T, OperationError>) -> Self {
        match result {
            Ok(value) => StepOutcome::Succeeded(value),
            Err(e) => StepOutcome::Failed(e),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, StepOutcome::Succeeded(_))
    }
}

/// Everything that happened for one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub row: ReleaseRow,
    pub branch: StepOutcome<BranchCreated>,
    pub release: StepOutcome<ReleaseInfo>,
}

impl RowOutcome {
    pub fn has_failure(&self) -> bool {
        self.branch.is_failed() || self.release.is_failed()
    }
}

/// Per-row outcomes in file order
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rows: Vec<RowOutcome>,
}

impl BatchReport {
    pub fn branches_created(&self) -> usize {
        self.rows.iter().filter(|r| r.branch.is_succeeded()).count()
    }

    pub fn releases_created(&self) -> usize {
        self.rows.iter().filter(|r| r.release.is_succeeded()).count()
    }

    pub fn failures(&self) -> Vec<&OperationError> {
        self.rows
            .iter()
            .flat_map(|r| {
                let branch = match &r.branch {
                    StepOutcome::Failed(e) => Some(e),
                    _ => None,
                };
                let release = match &r.release {
                    StepOutcome::Failed(e) => Some(e),
                    _ => None,
                };
                branch.into_iter().chain(release)
            })
            .collect()
    }

    pub fn rows_with_failures(&self) -> usize {
        self.rows.iter().filter(|r| r.has_failure()).count()
    }
}

/// Process every row in order.
///
/// Each row is finished before the next starts. Failures are recorded and
/// printed but never stop the batch, and the release step runs whether or not
/// the branch step succeeded.
pub async fn run_batch(
    client: &dyn GitHubClientTrait,
    config: &Config,
    rows: &[ReleaseRow],
) -> BatchReport {
    let started_at = Utc::now();
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        log::info!("Processing line {}: {} {}", row.line, row.repo, row.tag);
        let outcome = process_row(client, config, row).await;
        report::print_row_outcome(&outcome);
        outcomes.push(outcome);
    }

    BatchReport {
        started_at,
        finished_at: Utc::now(),
        rows: outcomes,
    }
}

async fn process_row(
    client: &dyn GitHubClientTrait,
    config: &Config,
    row: &ReleaseRow,
) -> RowOutcome {
    let branch = if config.create_branch {
        StepOutcome::from_result(release_ops::create_branch_from_tag(client, config, row).await)
    } else {
        StepOutcome::Skipped
    };

    let release = if config.create_release {
        StepOutcome::from_result(release_ops::create_release(client, row).await)
    } else {
        StepOutcome::Skipped
    };

    RowOutcome {
        row: row.clone(),
        branch,
        release,
    }
}
