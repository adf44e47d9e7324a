use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::{EditorSession, SessionEvent};
use crate::store::ChapterBackend;

/// Replace the body of chapter `id` with `content`.
///
/// Goes through the session like an editing surface would: select the chapter,
/// then report the new text as a content change (which autosaves).
pub fn run<B: ChapterBackend>(
    session: &mut EditorSession<B>,
    id: u32,
    content: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for event in session.select(id)? {
        if let SessionEvent::ChapterFlushed { chapter, status } = event {
            if !status.is_persisted() {
                result.add_message(CmdMessage::for_save(&chapter, &status));
            }
        }
    }

    let Some(chapter) = session.current().cloned() else {
        return Ok(result);
    };
    if let Some(status) = session.content_changed(content) {
        result.add_message(CmdMessage::for_save(&chapter, &status));
    }

    Ok(result.with_affected_chapters(vec![chapter]))
}
