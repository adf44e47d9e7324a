use crate::commands::{ChapterText, CmdResult};
use crate::error::{LanryError, Result};
use crate::session::EditorSession;
use crate::store::ChapterBackend;

/// Read chapter bodies without making any of them active, so nothing is written.
pub fn run<B: ChapterBackend>(session: &mut EditorSession<B>, ids: &[u32]) -> Result<CmdResult> {
    let mut texts = Vec::with_capacity(ids.len());
    for &id in ids {
        let info = session
            .navigator()
            .get(id)
            .cloned()
            .ok_or(LanryError::ChapterNotFound(id))?;
        let content = session.store_mut().load_content(info.id, &info.title);
        texts.push(ChapterText { info, content });
    }
    Ok(CmdResult::default().with_chapter_texts(texts))
}
