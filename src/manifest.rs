use crate::error::{ManifestError, RowIssue};
use crate::github::GitHubRepo;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["repo_name", "tag", "release_name", "release_description"];

/// One validated line of the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRow {
    /// 1-based line in the source file, header included
    pub line: u64,
    pub repo: GitHubRepo,
    pub tag: String,
    pub release_name: String,
    pub release_description: String,
}

/// Raw shape of a CSV record before validation
#[derive(Debug, Deserialize)]
struct RawRow {
    repo_name: String,
    tag: String,
    release_name: String,
    #[serde(default)]
    release_description: String,
}

/// Load and validate every row of the CSV file at `path`.
///
/// Either all rows are valid and returned in file order, or nothing is
/// returned and every bad line is listed in the error.
pub fn load_rows(path: &Path) -> Result<Vec<ReleaseRow>, ManifestError> {
    log::debug!("Loading release rows from {}", path.display());

    let reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_rows(reader).map_err(|err| match err {
        ManifestError::Read { source, .. } => ManifestError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse rows from any reader (used by `load_rows` and tests)
pub fn load_rows_from_reader<R: Read>(input: R) -> Result<Vec<ReleaseRow>, ManifestError> {
    let reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(input);
    parse_rows(reader)
}

fn parse_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<ReleaseRow>, ManifestError> {
    let headers = reader.headers().map_err(read_error)?.clone();
    check_headers(&headers)?;

    let mut rows = Vec::new();
    let mut issues = Vec::new();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                issues.push(RowIssue { line, message: e.to_string() });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match validate_record(&record, &headers, line) {
            Ok(row) => rows.push(row),
            Err(mut row_issues) => issues.append(&mut row_issues),
        }
    }

    if !issues.is_empty() {
        return Err(ManifestError::InvalidRows(issues));
    }

    log::debug!("Loaded {} release row(s)", rows.len());
    Ok(rows)
}

fn read_error(source: csv::Error) -> ManifestError {
    ManifestError::Read {
        path: Default::default(),
        source,
    }
}

fn check_headers(headers: &StringRecord) -> Result<(), ManifestError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::MissingColumns(missing))
    }
}

fn validate_record(
    record: &StringRecord,
    headers: &StringRecord,
    line: u64,
) -> Result<ReleaseRow, Vec<RowIssue>> {
    let raw: RawRow = record
        .deserialize(Some(headers))
        .map_err(|e| vec![RowIssue { line, message: e.to_string() }])?;
    // identifiers are trimmed, the description is kept as written
    let tag = raw.tag.trim().to_string();
    let release_name = raw.release_name.trim().to_string();

    let mut issues = Vec::new();
    let mut issue = |message: String| issues.push(RowIssue { line, message });

    let repo = match raw.repo_name.parse::<GitHubRepo>() {
        Ok(repo) => Some(repo),
        Err(e) => {
            issue(e);
            None
        }
    };
    if tag.is_empty() {
        issue("tag is empty".to_string());
    } else if tag.chars().any(char::is_whitespace) {
        issue(format!("tag '{}' contains whitespace", tag));
    }
    if release_name.is_empty() {
        issue("release_name is empty".to_string());
    }

    match repo {
        Some(repo) if issues.is_empty() => Ok(ReleaseRow {
            line,
            repo,
            tag,
            release_name,
            release_description: raw.release_description,
        }),
        _ => Err(issues),
    }
}
