use crate::batch::{BatchReport, RowOutcome, StepOutcome};
use crate::config::Config;
use crate::manifest::ReleaseRow;
use crate::release_ops::release_for_row;

/// Status lines for one processed row
pub fn row_outcome_lines(outcome: &RowOutcome) -> Vec<String> {
    let repo = &outcome.row.repo;
    let mut lines = Vec::new();

    match &outcome.branch {
        StepOutcome::Succeeded(created) => lines.push(format!(
            "✅ Branch '{}' created successfully in repo '{}' at {} ({}).",
            created.branch,
            repo,
            outcome.row.tag,
            short_sha(&created.sha)
        )),
        StepOutcome::Failed(e) => lines.push(format!("❌ {}", e)),
        StepOutcome::Skipped => {}
    }

    match &outcome.release {
        StepOutcome::Succeeded(info) => {
            let mut line = format!(
                "✅ Release '{}' created successfully in repo '{}'.",
                outcome.row.release_name, repo
            );
            if let Some(url) = &info.html_url {
                line.push_str(&format!(" {}", url));
            }
            lines.push(line);
        }
        StepOutcome::Failed(e) => lines.push(format!("❌ {}", e)),
        StepOutcome::Skipped => {}
    }

    lines
}

/// Failures go to stdout too, so the output stays in row order
pub fn print_row_outcome(outcome: &RowOutcome) {
    for line in row_outcome_lines(outcome) {
        println!("{}", line);
    }
}

/// Summary block printed after the batch
pub fn summary_lines(report: &BatchReport, config: &Config) -> Vec<String> {
    let total = report.rows.len();
    let elapsed = report.finished_at.signed_duration_since(report.started_at);
    let mut lines = vec![
        "─".repeat(60),
        format!(
            "📊 Summary: {} row{} processed in {:.1}s",
            total,
            plural(total),
            elapsed.num_milliseconds() as f64 / 1000.0
        ),
    ];

    if config.create_branch {
        lines.push(format!(
            "   🌿 {} of {} branch{} created",
            report.branches_created(),
            total,
            if total == 1 { "" } else { "es" }
        ));
    }
    if config.create_release {
        lines.push(format!(
            "   🏷️  {} of {} release{} created",
            report.releases_created(),
            total,
            plural(total)
        ));
    }

    let failed_rows = report.rows_with_failures();
    if failed_rows > 0 {
        lines.push(format!("   ⚠️  {} row{} with failures:", failed_rows, plural(failed_rows)));
        for outcome in report.rows.iter().filter(|r| r.has_failure()) {
            lines.push(format!(
                "     └─ line {}: {} {}",
                outcome.row.line, outcome.row.repo, outcome.row.tag
            ));
        }
    }

    lines
}

pub fn print_summary(report: &BatchReport, config: &Config) {
    println!();
    for line in summary_lines(report, config) {
        println!("{}", line);
    }
}

/// What `apply --dry-run` would do for each row
pub fn dry_run_lines(rows: &[ReleaseRow], config: &Config) -> Vec<String> {
    let mut lines = Vec::new();

    for row in rows {
        lines.push(format!("🔗 {} @ {} (line {})", row.repo, row.tag, row.line));
        if config.create_branch {
            lines.push(format!(
                "   🌿 would create branch refs/heads/{} from tag {}",
                config.branch_name, row.tag
            ));
        }
        if config.create_release {
            let release = release_for_row(row);
            lines.push(format!(
                "   🏷️  would create release '{}' (draft: {}, prerelease: {})",
                release.name, release.draft, release.prerelease
            ));
        }
    }

    lines.push(format!(
        "\nDry run: {} row{}, no requests sent",
        rows.len(),
        plural(rows.len())
    ));
    lines
}

fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
