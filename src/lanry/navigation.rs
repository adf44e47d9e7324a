//! # Chapter Navigation
//!
//! The navigator is the chapter list a UI shows next to the editor: the chapters
//! recovered from disk plus the ones added during the session, always sorted by
//! chapter number. It never touches files; the [`crate::session::EditorSession`]
//! decides what to load and save when a navigation event arrives.

use crate::error::{LanryError, Result};
use crate::model::ChapterInfo;

/// What the chapter list asks of the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The user picked a chapter in the list.
    ChapterSelected(ChapterInfo),
    /// The user asked for a new chapter. Number and title come from whatever form
    /// the UI shows (command-line arguments for the CLI).
    AddChapterRequested { id: u32, title: String },
}

#[derive(Debug, Default, Clone)]
pub struct ChapterNavigator {
    chapters: Vec<ChapterInfo>,
}

impl ChapterNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the list from chapters recovered by a directory scan.
    /// Later duplicates of an id are dropped, and so is id 0.
    pub fn from_chapters(chapters: impl IntoIterator<Item = ChapterInfo>) -> Self {
        let mut nav = Self::new();
        for chapter in chapters.into_iter().filter(|c| c.id != 0) {
            let _ = nav.insert(chapter);
        }
        nav
    }

    /// Add a chapter in id order. Duplicate ids and id 0 are rejected and the list
    /// is left as it was.
    pub fn add_chapter(&mut self, id: u32, title: &str) -> Result<&ChapterInfo> {
        if id == 0 {
            return Err(LanryError::InvalidChapterId(id));
        }
        let pos = self.insert(ChapterInfo::new(id, title.trim()))?;
        Ok(&self.chapters[pos])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.position(id).is_ok()
    }

    pub fn get(&self, id: u32) -> Option<&ChapterInfo> {
        self.position(id).ok().map(|pos| &self.chapters[pos])
    }

    /// Event for picking chapter `id`, if it is in the list.
    pub fn select(&self, id: u32) -> Option<NavigationEvent> {
        self.get(id).cloned().map(NavigationEvent::ChapterSelected)
    }

    pub fn chapters(&self) -> &[ChapterInfo] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Smallest number after the highest one in use, handy as a form default.
    pub fn next_free_id(&self) -> u32 {
        self.chapters
            .last()
            .map(|c| c.id.saturating_add(1))
            .unwrap_or(1)
    }

    fn insert(&mut self, chapter: ChapterInfo) -> Result<usize> {
        match self.position(chapter.id) {
            Ok(_) => Err(LanryError::DuplicateChapter(chapter.id)),
            Err(pos) => {
                self.chapters.insert(pos, chapter);
                Ok(pos)
            }
        }
    }

    fn position(&self, id: u32) -> std::result::Result<usize, usize> {
        self.chapters.binary_search_by_key(&id, |c| c.id)
    }
}
