use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ChapterInfo;
use crate::session::{EditorSession, SessionEvent};
use crate::store::ChapterBackend;

/// Open chapter `id` in an editing surface and save what comes back.
///
/// `surface` receives the chapter and its current body and returns the edited
/// body; the CLI passes an external editor here. Unchanged text is not written,
/// and closing the session afterwards leaves the file as it was.
pub fn run<B, F>(session: &mut EditorSession<B>, id: u32, surface: F) -> Result<CmdResult>
where
    B: ChapterBackend,
    F: FnOnce(&ChapterInfo, &str) -> Result<String>,
{
    let mut result = CmdResult::default();

    let mut opened = None;
    for event in session.select(id)? {
        if let SessionEvent::ChapterOpened { chapter, content } = event {
            opened = Some((chapter, content));
        }
    }
    let Some((chapter, before)) = opened else {
        return Ok(result);
    };

    let after = surface(&chapter, &before)?;
    if after == before {
        result.add_message(CmdMessage::info(format!("{} unchanged", chapter)));
        return Ok(result.with_affected_chapters(vec![chapter]));
    }

    let saved = session.content_changed(after);
    if let Some(status) = session.close().or(saved) {
        result.add_message(CmdMessage::for_save(&chapter, &status));
    }
    Ok(result.with_affected_chapters(vec![chapter]))
}
