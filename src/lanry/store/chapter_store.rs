use super::backend::ChapterBackend;
use crate::codec::{canonical_title, decode_file_name, encode_file_name};
use crate::model::{word_count, ChapterInfo, ChapterListing};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Outcome of a save. The cache is updated either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Written to the backing file.
    Persisted { path: PathBuf },
    /// Only the in-memory copy holds this content.
    MemoryOnly { reason: String },
}

impl SaveStatus {
    pub fn is_persisted(&self) -> bool {
        matches!(self, SaveStatus::Persisted { .. })
    }
}

pub struct ChapterStore<B: ChapterBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    cache: HashMap<u32, String>,
    /// File names found by scanning, for chapters whose encoded name differs.
    resolved: RefCell<HashMap<u32, String>>,
    last_save: Option<SaveStatus>,
}

impl<B: ChapterBackend> ChapterStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            cache: HashMap::new(),
            resolved: RefCell::new(HashMap::new()),
            last_save: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Store a chapter body. Memory first, then a best-effort file write.
    pub fn save_content(&mut self, id: u32, title: &str, content: &str) -> SaveStatus {
        self.cache.insert(id, content.to_string());

        let file_name = self.resolve_file_name(id, title);
        let status = match self.backend.write(&file_name, content) {
            Ok(()) => {
                debug!(chapter = id, file = %file_name, "chapter saved");
                SaveStatus::Persisted {
                    path: self.backend.path_for(&file_name),
                }
            }
            Err(e) => {
                warn!(
                    chapter = id,
                    file = %file_name,
                    error = %e,
                    "could not write chapter file, keeping content in memory"
                );
                SaveStatus::MemoryOnly {
                    reason: e.to_string(),
                }
            }
        };

        self.last_save = Some(status.clone());
        status
    }

    /// Fetch a chapter body: cache, then disk, then empty for a new chapter.
    pub fn load_content(&mut self, id: u32, title: &str) -> String {
        if let Some(content) = self.cache.get(&id) {
            debug!(chapter = id, "chapter served from cache");
            return content.clone();
        }

        let file_name = self.resolve_file_name(id, title);
        match self.backend.read(&file_name) {
            Ok(Some(content)) => {
                debug!(chapter = id, file = %file_name, "chapter read from disk");
                self.cache.insert(id, content.clone());
                content
            }
            Ok(None) => String::new(),
            Err(e) => {
                warn!(
                    chapter = id,
                    file = %file_name,
                    error = %e,
                    "could not read chapter file, treating it as empty"
                );
                String::new()
            }
        }
    }

    /// Chapters recovered from the chapters directory, ordered by id.
    ///
    /// When two files claim the same id, the one whose name sorts first wins.
    pub fn list_existing_chapters(&self) -> Vec<ChapterInfo> {
        self.scan().into_iter().map(|(info, _)| info).collect()
    }

    /// Like [`Self::list_existing_chapters`], with paths and modification times.
    pub fn list_chapter_listings(&self) -> Vec<ChapterListing> {
        self.scan()
            .into_iter()
            .map(|(info, file_name)| {
                let modified_at = self.backend.modified_at(&file_name).unwrap_or(None);
                let words = match self.cached(info.id) {
                    Some(text) => word_count(text),
                    None => self
                        .backend
                        .read(&file_name)
                        .ok()
                        .flatten()
                        .map_or(0, |text| word_count(&text)),
                };
                ChapterListing {
                    info,
                    path: self.backend.path_for(&file_name),
                    modified_at,
                    word_count: words,
                }
            })
            .collect()
    }

    /// Where the chapter `(id, title)` lives, or would live once saved.
    pub fn chapter_path(&self, id: u32, title: &str) -> PathBuf {
        self.backend.path_for(&self.resolve_file_name(id, title))
    }

    /// Forget every cached body so the next load reads through to disk.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// The cached body of chapter `id`, without touching the disk.
    pub fn cached(&self, id: u32) -> Option<&str> {
        self.cache.get(&id).map(String::as_str)
    }

    pub fn is_cached(&self, id: u32) -> bool {
        self.cache.contains_key(&id)
    }

    pub fn cached_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.cache.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// True when the most recent save only reached memory.
    pub fn last_save_failed(&self) -> bool {
        matches!(self.last_save, Some(SaveStatus::MemoryOnly { .. }))
    }

    pub fn last_save(&self) -> Option<&SaveStatus> {
        self.last_save.as_ref()
    }

    /// File name for `(id, title)`.
    ///
    /// The encoded name is used when it exists or when nothing else matches. Otherwise
    /// a file with the same id and the same canonical title is reused, so a chapter
    /// recovered as "Middle Part" from `Chapter_002_Middle_Part.txt` keeps its file.
    fn resolve_file_name(&self, id: u32, title: &str) -> String {
        let exact = encode_file_name(id, title);
        if self.backend.exists(&exact) {
            return exact;
        }

        let wanted = canonical_title(title);
        if let Some(known) = self.resolved.borrow().get(&id) {
            let same_title = decode_file_name(known).is_some_and(|info| info.title == wanted);
            if same_title && self.backend.exists(known) {
                return known.clone();
            }
        }

        let found = self
            .scan()
            .into_iter()
            .find(|(info, _)| info.id == id && info.title == wanted)
            .map(|(_, file_name)| file_name);
        match found {
            Some(file_name) => {
                self.resolved.borrow_mut().insert(id, file_name.clone());
                file_name
            }
            None => exact,
        }
    }

    fn scan(&self) -> Vec<(ChapterInfo, String)> {
        let mut names = match self.backend.list_file_names() {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "could not read chapters directory");
                return Vec::new();
            }
        };
        names.sort();

        let mut by_id: HashMap<u32, (ChapterInfo, String)> = HashMap::new();
        for name in names {
            let Some(info) = decode_file_name(&name) else {
                continue;
            };
            if let Some((kept, kept_name)) = by_id.get(&info.id) {
                debug!(
                    chapter = kept.id,
                    kept = %kept_name,
                    ignored = %name,
                    "duplicate chapter number on disk"
                );
                continue;
            }
            by_id.insert(info.id, (info, name));
        }

        let mut found: Vec<(ChapterInfo, String)> = by_id.into_values().collect();
        found.sort_by_key(|(info, _)| info.id);
        found
    }
}
