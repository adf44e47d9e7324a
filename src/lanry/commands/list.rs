use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{word_count, ChapterListing};
use crate::session::EditorSession;
use crate::store::ChapterBackend;

/// Every chapter the session knows about, in chapter order.
///
/// Chapters whose file could not be written are still listed (from the
/// navigator) with their would-be path and no modification time.
pub fn run<B: ChapterBackend>(session: &EditorSession<B>) -> Result<CmdResult> {
    let on_disk = session.store().list_chapter_listings();

    let listed: Vec<ChapterListing> = session
        .navigator()
        .chapters()
        .iter()
        .map(|info| {
            on_disk
                .iter()
                .find(|l| l.info.id == info.id)
                .cloned()
                .unwrap_or_else(|| ChapterListing {
                    info: info.clone(),
                    path: session.store().chapter_path(info.id, &info.title),
                    modified_at: None,
                    word_count: session.store().cached(info.id).map_or(0, word_count),
                })
        })
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(
            "No chapters yet. Add one with `lanry add <number> <title>`.",
        ));
    }
    Ok(result.with_listed_chapters(listed))
}
