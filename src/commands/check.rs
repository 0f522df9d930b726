use std::path::Path;

use crate::manifest;

/// Validate the input file and list what `apply` would process
pub fn handle_check(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rows = manifest::load_rows(file)?;

    println!("✅ {} is valid: {} row{}", file.display(), rows.len(), if rows.len() == 1 { "" } else { "s" });
    for row in &rows {
        println!("   line {}: {} @ {} -> '{}'", row.line, row.repo, row.tag, row.release_name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rows.csv");
        std::fs::write(
            &file,
            "repo_name,tag,release_name,release_description\nacme/widgets,v1,Widgets 1,\n",
        )
        .unwrap();

        assert!(handle_check(&file).is_ok());
    }

    #[test]
    fn test_check_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rows.csv");
        std::fs::write(&file, "repo_name,tag\nacme/widgets,v1\n").unwrap();

        let err = handle_check(&file).unwrap_err();
        assert!(err.to_string().contains("release_name"));
    }
}
