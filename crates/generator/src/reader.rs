use brand_site_core::{Error, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::assemble::Rejected;
use crate::frontmatter::ContentRecord;

/// A parsed record, or the reason its file could not be parsed
pub type RecordResult = std::result::Result<ContentRecord, Rejected>;

/// Read every `.md` file directly inside `dir`, sorted by file name.
///
/// A missing directory is an `Io` error with kind `NotFound`. Files that
/// cannot be read or whose frontmatter cannot be parsed come back as
/// `Rejected` entries so one bad file never hides the others.
pub fn read_markdown_dir(dir: &Path) -> Result<Vec<RecordResult>> {
    fs::metadata(dir)?;

    let mut records = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        tracing::debug!(path = %path.display(), "reading content file");
        let record = fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|content| ContentRecord::parse(path, &content))
            .map_err(|err| Rejected::new(path, err.to_string()));
        records.push(record);
    }

    Ok(records)
}

/// Read and parse a single Markdown file. Parse failures are errors here,
/// since single-file content has no siblings to fall back on.
pub fn read_markdown_file(path: &Path) -> Result<ContentRecord> {
    tracing::debug!(path = %path.display(), "reading content file");
    let content = fs::read_to_string(path)?;
    ContentRecord::parse(path, &content)
}

pub fn read_json_file(path: &Path) -> Result<serde_json::Value> {
    tracing::debug!(path = %path.display(), "reading content file");
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dir_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_markdown_dir(&dir.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reads_sorted_markdown_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.md"), "---\nname: b\n---\n").unwrap();
        fs::write(dir.path().join("a.MD"), "---\nname: a\n---\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let records = read_markdown_dir(dir.path()).unwrap();
        let stems: Vec<String> = records
            .into_iter()
            .map(|r| r.unwrap().file_stem())
            .collect();
        assert_eq!(stems, vec!["a", "b"]);
    }

    #[test]
    fn test_bad_frontmatter_is_rejected_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), "---\nname: [oops\n---\n").unwrap();
        fs::write(dir.path().join("good.md"), "---\nname: ok\n---\n").unwrap();

        let records = read_markdown_dir(dir.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_err());
        assert!(records[1].is_ok());
    }

    #[test]
    fn test_unreadable_file_is_rejected_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "---\nname: ok\n---\n").unwrap();
        fs::write(dir.path().join("b.md"), b"---\nname: \xff\n---\n").unwrap();

        let records = read_markdown_dir(dir.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_ok());
        let rejected = records[1].as_ref().unwrap_err();
        assert!(rejected.source.ends_with("b.md"));
        assert!(rejected.reason.contains("UTF-8"));
    }

    #[test]
    fn test_read_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"[{"platform": "YouTube"}]"#).unwrap();

        let value = read_json_file(&path).unwrap();
        assert_eq!(value[0]["platform"], "YouTube");
    }
}
