use crate::codec::encode_file_name;
use crate::commands::{ChapterText, CmdMessage, CmdResult};
use crate::error::{LanryError, Result};
use crate::session::EditorSession;
use crate::store::ChapterBackend;
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const ARCHIVE_ROOT: &str = "Chapters";

/// `lanry-<timestamp>.tar.gz`
pub fn default_archive_name(now: DateTime<Utc>) -> String {
    format!("lanry-{}.tar.gz", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write chapters `ids` (all chapters when empty) to a gzipped tar at `output`.
pub fn run<B: ChapterBackend>(
    session: &mut EditorSession<B>,
    ids: &[u32],
    output: &Path,
) -> Result<CmdResult> {
    let texts = resolve_texts(session, ids)?;

    if texts.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No chapters to export."));
        return Ok(res);
    }

    let file = File::create(output).map_err(LanryError::Io)?;
    write_archive(file, &texts, Utc::now())?;

    let mut result = CmdResult::default()
        .with_affected_chapters(texts.into_iter().map(|t| t.info).collect());
    result.add_message(CmdMessage::success(format!(
        "Exported {} chapter(s) to {}",
        result.affected_chapters.len(),
        output.display()
    )));
    Ok(result)
}

/// Write the body of one chapter to a plain text file.
pub fn run_plain<B: ChapterBackend>(
    session: &mut EditorSession<B>,
    id: u32,
    output: &Path,
) -> Result<CmdResult> {
    let mut texts = resolve_texts(session, &[id])?;
    let text = texts.remove(0);

    fs::write(output, &text.content).map_err(LanryError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        text.info,
        output.display()
    )));
    Ok(result.with_affected_chapters(vec![text.info]))
}

fn resolve_texts<B: ChapterBackend>(
    session: &mut EditorSession<B>,
    ids: &[u32],
) -> Result<Vec<ChapterText>> {
    let wanted: Vec<u32> = if ids.is_empty() {
        session.navigator().chapters().iter().map(|c| c.id).collect()
    } else {
        ids.to_vec()
    };

    let mut texts = Vec::with_capacity(wanted.len());
    for id in wanted {
        let info = session
            .navigator()
            .get(id)
            .cloned()
            .ok_or(LanryError::ChapterNotFound(id))?;
        let content = session.store_mut().load_content(info.id, &info.title);
        texts.push(ChapterText { info, content });
    }
    Ok(texts)
}

fn write_archive<W: Write>(writer: W, texts: &[ChapterText], now: DateTime<Utc>) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for text in texts {
        let entry_name = format!(
            "{}/{}",
            ARCHIVE_ROOT,
            encode_file_name(text.info.id, &text.info.title)
        );

        let mut header = tar::Header::new_gnu();
        header.set_size(text.content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(now.timestamp().max(0) as u64);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, text.content.as_bytes())
            .map_err(LanryError::Io)?;
    }

    tar.into_inner()
        .map_err(LanryError::Io)?
        .finish()
        .map_err(LanryError::Io)?;
    Ok(())
}
