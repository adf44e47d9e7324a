use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Abstract interface for raw chapter file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while ChapterStore handles the "what" (caching, naming, recovery policy).
///
/// Every method addresses a chapter by its file name inside the chapters directory.
pub trait ChapterBackend {
    /// Read a chapter file.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, file_name: &str) -> Result<Option<String>>;

    /// Create or overwrite a chapter file.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, file_name: &str, content: &str) -> Result<()>;

    /// Whether a chapter file exists.
    fn exists(&self, file_name: &str) -> bool;

    /// Names of all regular files in the chapters directory, in no particular order.
    fn list_file_names(&self) -> Result<Vec<String>>;

    /// Modification time of a chapter file.
    fn modified_at(&self, file_name: &str) -> Result<Option<DateTime<Utc>>>;

    /// Location of a chapter file.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn path_for(&self, file_name: &str) -> PathBuf;
}
