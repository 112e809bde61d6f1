use brand_site_core::Result;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes pretty-printed JSON files into one output directory.
///
/// Each file is written whole: a temp file in the same directory is filled
/// and then renamed over the target, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct JsonEmitter {
    dir: PathBuf,
}

impl JsonEmitter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write<T: Serialize + ?Sized>(&self, filename: &str, value: &T) -> Result<PathBuf> {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');

        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(filename);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&target).map_err(|e| e.error)?;

        tracing::debug!(path = %target.display(), bytes = json.len(), "wrote json");
        Ok(target)
    }
}
