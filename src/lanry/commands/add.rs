use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LanryError, Result};
use crate::session::{EditorSession, SessionEvent};
use crate::store::ChapterBackend;

/// Register a new chapter. A number already in use is a warning, not an error,
/// and leaves the existing chapter alone.
pub fn run<B: ChapterBackend>(
    session: &mut EditorSession<B>,
    id: u32,
    title: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let events = match session.add_chapter(id, title) {
        Ok(events) => events,
        Err(LanryError::DuplicateChapter(id)) => {
            let existing = session
                .navigator()
                .get(id)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("Chapter {}", id));
            result.add_message(CmdMessage::warning(format!(
                "Chapter number {} already exists ({}).",
                id, existing
            )));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    let mut added = Vec::new();
    for event in events {
        if let SessionEvent::ChapterOpened { chapter, .. } = event {
            added.push(chapter);
        }
    }

    for chapter in &added {
        match session.store().last_save() {
            Some(status) if !status.is_persisted() => {
                result.add_message(CmdMessage::for_save(chapter, status))
            }
            _ => result.add_message(CmdMessage::success(format!("Added {}", chapter))),
        }
    }

    Ok(result.with_affected_chapters(added))
}
