//! # Editor Session
//!
//! The session is the wiring between the chapter list, the editing buffer and the
//! chapter store. A UI feeds it events and gets back what happened, in order:
//!
//! ```text
//! NavigationEvent::ChapterSelected(B)      (A is active, buffer modified)
//!     → SessionEvent::ChapterFlushed { A, .. }     save A's buffer
//!     → SessionEvent::ChapterOpened { B, .. }      then load B
//! ```
//!
//! ## Ordering
//!
//! The active chapter is always flushed **before** the next one is loaded, so
//! switching chapters can never drop in-progress text. Every content change is
//! saved straight away (autosave), and [`EditorSession::close`] flushes one last
//! time.
//!
//! Only a modified buffer is written. A chapter that was opened and left alone
//! keeps its file exactly as it was, even if reading it came back empty.
//!
//! All calls are synchronous; a session is not meant to be shared between threads.

use crate::error::{LanryError, Result};
use crate::model::ChapterInfo;
use crate::navigation::{ChapterNavigator, NavigationEvent};
use crate::store::{ChapterBackend, ChapterStore, SaveStatus};

/// Notifications for the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The buffer of a chapter was written back through the store.
    ChapterFlushed {
        chapter: ChapterInfo,
        status: SaveStatus,
    },
    /// A chapter became active; `content` belongs in the editing surface.
    ChapterOpened {
        chapter: ChapterInfo,
        content: String,
    },
}

pub struct EditorSession<B: ChapterBackend> {
    store: ChapterStore<B>,
    navigator: ChapterNavigator,
    current: Option<ChapterInfo>,
    buffer: String,
    /// Set by `content_changed`, cleared once the buffer reaches disk.
    dirty: bool,
}

impl<B: ChapterBackend> EditorSession<B> {
    /// Start a session, recovering the chapter list from the store.
    pub fn open(store: ChapterStore<B>) -> Self {
        let navigator = ChapterNavigator::from_chapters(store.list_existing_chapters());
        Self {
            store,
            navigator,
            current: None,
            buffer: String::new(),
            dirty: false,
        }
    }

    /// Dispatch a navigation event.
    pub fn handle(&mut self, event: NavigationEvent) -> Result<Vec<SessionEvent>> {
        match event {
            NavigationEvent::ChapterSelected(chapter) => self.select(chapter.id),
            NavigationEvent::AddChapterRequested { id, title } => self.add_chapter(id, &title),
        }
    }

    /// Make chapter `id` active: flush the current buffer, then load the chapter.
    pub fn select(&mut self, id: u32) -> Result<Vec<SessionEvent>> {
        let chapter = self
            .navigator
            .get(id)
            .cloned()
            .ok_or(LanryError::ChapterNotFound(id))?;

        let mut events = Vec::new();
        if let Some(flushed) = self.flush() {
            events.push(flushed);
        }

        let content = self.store.load_content(chapter.id, &chapter.title);
        self.buffer = content.clone();
        self.dirty = false;
        self.current = Some(chapter.clone());
        events.push(SessionEvent::ChapterOpened { chapter, content });
        Ok(events)
    }

    /// Register a new chapter and make it active with an empty body.
    ///
    /// A duplicate id fails with [`LanryError::DuplicateChapter`] and leaves the
    /// session exactly as it was. The empty body is saved right away so the new
    /// chapter shows up again on the next start.
    pub fn add_chapter(&mut self, id: u32, title: &str) -> Result<Vec<SessionEvent>> {
        let chapter = self.navigator.add_chapter(id, title)?.clone();

        let mut events = Vec::new();
        if let Some(flushed) = self.flush() {
            events.push(flushed);
        }

        self.buffer.clear();
        self.dirty = false;
        self.store.save_content(chapter.id, &chapter.title, "");
        self.current = Some(chapter.clone());
        events.push(SessionEvent::ChapterOpened {
            chapter,
            content: String::new(),
        });
        Ok(events)
    }

    /// The editing surface changed. Saves immediately.
    /// Returns `None` when no chapter is active (the text has nowhere to go).
    pub fn content_changed(&mut self, text: impl Into<String>) -> Option<SaveStatus> {
        self.buffer = text.into();
        self.dirty = true;
        match self.flush()? {
            SessionEvent::ChapterFlushed { status, .. } => Some(status),
            SessionEvent::ChapterOpened { .. } => None,
        }
    }

    /// Final flush before the application exits. `None` when there was
    /// nothing unsaved.
    pub fn close(&mut self) -> Option<SaveStatus> {
        match self.flush()? {
            SessionEvent::ChapterFlushed { status, .. } => Some(status),
            SessionEvent::ChapterOpened { .. } => None,
        }
    }

    pub fn current(&self) -> Option<&ChapterInfo> {
        self.current.as_ref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// True while the buffer holds text that has not reached disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn navigator(&self) -> &ChapterNavigator {
        &self.navigator
    }

    pub fn store(&self) -> &ChapterStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ChapterStore<B> {
        &mut self.store
    }

    pub fn into_store(self) -> ChapterStore<B> {
        self.store
    }

    fn flush(&mut self) -> Option<SessionEvent> {
        if !self.dirty {
            return None;
        }
        let chapter = self.current.clone()?;
        let status = self
            .store
            .save_content(chapter.id, &chapter.title, &self.buffer);
        // A memory-only save stays dirty so the next flush retries the file.
        self.dirty = !status.is_persisted();
        Some(SessionEvent::ChapterFlushed { chapter, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn session_with(files: &[(&str, &str)]) -> EditorSession<MemBackend> {
        let backend = MemBackend::new();
        for (name, text) in files {
            backend.put_file(name, text);
        }
        EditorSession::open(ChapterStore::with_backend(backend))
    }

    #[test]
    fn open_recovers_chapters_from_disk() {
        let session = session_with(&[
            ("Chapter_002_The_Journey.txt", "road"),
            ("Chapter_001_The Beginning.txt", "start"),
        ]);
        let titles: Vec<&str> = session
            .navigator()
            .chapters()
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["The Beginning", "The Journey"]);
        assert!(session.current().is_none());
    }

    #[test]
    fn select_loads_content_into_buffer() {
        let mut session = session_with(&[("Chapter_001_Intro.txt", "hello")]);
        let events = session.select(1).unwrap();

        assert_eq!(
            events,
            vec![SessionEvent::ChapterOpened {
                chapter: ChapterInfo::new(1, "Intro"),
                content: "hello".to_string(),
            }]
        );
        assert_eq!(session.buffer(), "hello");
    }

    #[test]
    fn select_unknown_chapter_fails() {
        let mut session = session_with(&[]);
        assert!(matches!(
            session.select(4),
            Err(LanryError::ChapterNotFound(4))
        ));
    }

    #[test]
    fn switching_flushes_before_loading() {
        let mut session = session_with(&[
            ("Chapter_001_A.txt", "a0"),
            ("Chapter_002_B.txt", "b0"),
        ]);
        session.select(1).unwrap();
        session.buffer = "a1 unsaved".to_string();
        session.dirty = true;

        let events = session.select(2).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            SessionEvent::ChapterFlushed { chapter, status }
                if chapter.id == 1 && status.is_persisted()
        ));
        assert!(matches!(
            &events[1],
            SessionEvent::ChapterOpened { chapter, content }
                if chapter.id == 2 && content == "b0"
        ));

        assert_eq!(session.store_mut().load_content(1, "A"), "a1 unsaved");
        assert_eq!(
            session.store().backend().read("Chapter_001_A.txt").unwrap(),
            Some("a1 unsaved".to_string())
        );
    }

    #[test]
    fn content_changes_are_autosaved() {
        let mut session = session_with(&[("Chapter_001_A.txt", "")]);
        assert_eq!(session.content_changed("ignored"), None);

        session.select(1).unwrap();
        let status = session.content_changed("typed text").unwrap();
        assert!(status.is_persisted());
        assert_eq!(
            session.store().backend().read("Chapter_001_A.txt").unwrap(),
            Some("typed text".to_string())
        );
    }

    #[test]
    fn add_chapter_creates_empty_file_and_activates_it() {
        let mut session = session_with(&[("Chapter_001_A.txt", "a")]);
        session.select(1).unwrap();
        session.content_changed("a edited");

        let events = session
            .handle(NavigationEvent::AddChapterRequested {
                id: 2,
                title: "Second".to_string(),
            })
            .unwrap();

        assert!(matches!(
            events.last(),
            Some(SessionEvent::ChapterOpened { chapter, content })
                if chapter.id == 2 && content.is_empty()
        ));
        assert_eq!(session.current().unwrap().title, "Second");
        assert_eq!(session.buffer(), "");
        assert!(session.store().backend().exists("Chapter_002_Second.txt"));
        assert_eq!(session.store_mut().load_content(1, "A"), "a edited");
    }

    #[test]
    fn duplicate_add_leaves_original_untouched() {
        let mut session = session_with(&[("Chapter_001_A.txt", "original")]);
        session.select(1).unwrap();

        let err = session.add_chapter(1, "Other").unwrap_err();
        assert!(matches!(err, LanryError::DuplicateChapter(1)));
        assert_eq!(session.navigator().len(), 1);
        assert_eq!(session.current().unwrap().title, "A");
        assert_eq!(session.store_mut().load_content(1, "A"), "original");
        assert!(!session.store().backend().exists("Chapter_001_Other.txt"));
    }

    #[test]
    fn close_flushes_active_chapter() {
        let mut session = session_with(&[("Chapter_003_C.txt", "")]);
        assert_eq!(session.close(), None);

        session.select(3).unwrap();
        session.buffer = "last words".to_string();
        session.dirty = true;
        assert!(session.close().unwrap().is_persisted());
        assert_eq!(
            session.store().backend().read("Chapter_003_C.txt").unwrap(),
            Some("last words".to_string())
        );
    }

    #[test]
    fn failed_flush_is_reported_but_switch_proceeds() {
        let mut session = session_with(&[
            ("Chapter_001_A.txt", "a"),
            ("Chapter_002_B.txt", "b"),
        ]);
        session.select(1).unwrap();
        session.store().backend().set_simulate_write_error(true);
        session.buffer = "kept in memory".to_string();
        session.dirty = true;

        let events = session.select(2).unwrap();
        assert!(matches!(
            &events[0],
            SessionEvent::ChapterFlushed { status: SaveStatus::MemoryOnly { .. }, .. }
        ));
        assert_eq!(session.buffer(), "b");
        assert_eq!(session.store_mut().load_content(1, "A"), "kept in memory");
    }

    #[test]
    fn close_without_changes_leaves_file_alone() {
        let mut session = session_with(&[("Chapter_001_A.txt", "precious")]);
        session.select(1).unwrap();
        session.store().backend().remove_file("Chapter_001_A.txt");
        session.store().backend().put_file("Chapter_001_A.txt", "changed elsewhere");

        assert!(!session.is_dirty());
        assert_eq!(session.close(), None);
        assert_eq!(
            session.store().backend().read("Chapter_001_A.txt").unwrap(),
            Some("changed elsewhere".to_string())
        );
    }

    #[test]
    fn failed_read_then_close_does_not_clobber_file() {
        let mut session = session_with(&[("Chapter_001_A.txt", "the real text")]);
        session.store().backend().set_simulate_read_error(true);
        let events = session.select(1).unwrap();
        assert!(matches!(
            &events[0],
            SessionEvent::ChapterOpened { content, .. } if content.is_empty()
        ));

        session.store().backend().set_simulate_read_error(false);
        assert_eq!(session.close(), None);
        assert_eq!(
            session.store().backend().read("Chapter_001_A.txt").unwrap(),
            Some("the real text".to_string())
        );
    }

    #[test]
    fn switching_away_from_untouched_chapter_writes_nothing() {
        let mut session = session_with(&[
            ("Chapter_001_A.txt", "a"),
            ("Chapter_002_B.txt", "b"),
        ]);
        session.select(1).unwrap();
        let events = session.select(2).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], SessionEvent::ChapterOpened { .. }));
    }

    #[test]
    fn memory_only_save_is_retried_on_close() {
        let mut session = session_with(&[("Chapter_001_A.txt", "a")]);
        session.select(1).unwrap();
        session.store().backend().set_simulate_write_error(true);
        assert!(!session.content_changed("typed").unwrap().is_persisted());
        assert!(session.is_dirty());

        session.store().backend().set_simulate_write_error(false);
        assert!(session.close().unwrap().is_persisted());
        assert!(!session.is_dirty());
        assert_eq!(
            session.store().backend().read("Chapter_001_A.txt").unwrap(),
            Some("typed".to_string())
        );
    }
}
