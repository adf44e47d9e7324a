use super::backend::ChapterBackend;
use crate::error::{LanryError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;
use uuid::Uuid;

/// Chapter files in a directory on disk.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the chapters directory if it is missing.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LanryError::Io)?;
        }
        Ok(())
    }
}

impl ChapterBackend for FsBackend {
    fn read(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.root.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(LanryError::Io)?;
        // Files saved by other editors may be in a legacy encoding. Invalid
        // sequences become U+FFFD instead of hiding the whole chapter.
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %path.display(), "chapter file is not valid UTF-8");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(content))
    }

    fn write(&self, file_name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;

        let target_path = self.root.join(file_name);

        // Atomic Write
        let tmp_path = self.root.join(format!(".chapter-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(LanryError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &target_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(LanryError::Io(e));
        }

        Ok(())
    }

    fn exists(&self, file_name: &str) -> bool {
        self.root.join(file_name).is_file()
    }

    fn list_file_names(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(LanryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(LanryError::Io)?;
            let path = entry.path();
            if path.is_file() {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn modified_at(&self, file_name: &str) -> Result<Option<DateTime<Utc>>> {
        let path = self.root.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        let meta = fs::metadata(path).map_err(LanryError::Io)?;
        let modified: DateTime<Utc> = meta.modified().unwrap_or(SystemTime::now()).into();
        Ok(Some(modified))
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}
