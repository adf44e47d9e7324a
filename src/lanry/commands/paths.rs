use crate::commands::CmdResult;
use crate::error::{LanryError, Result};
use crate::session::EditorSession;
use crate::store::ChapterBackend;

pub fn run<B: ChapterBackend>(session: &EditorSession<B>, ids: &[u32]) -> Result<CmdResult> {
    let mut paths = Vec::with_capacity(ids.len());
    for &id in ids {
        let info = session
            .navigator()
            .get(id)
            .ok_or(LanryError::ChapterNotFound(id))?;
        paths.push(session.store().chapter_path(info.id, &info.title));
    }
    Ok(CmdResult::default().with_chapter_paths(paths))
}
