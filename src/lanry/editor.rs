use crate::codec::encode_file_name;
use crate::error::{LanryError, Result};
use crate::model::ChapterInfo;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;
use uuid::Uuid;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(LanryError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in `editor` and waits for it to close.
/// The editor command may carry arguments, e.g. `code --wait`.
pub fn open_in_editor<P: AsRef<Path>>(editor: &str, file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| LanryError::Api("Editor command is empty".to_string()))?;

    debug!(editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| LanryError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(LanryError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(LanryError::Io)
}

/// Edit a chapter body in `editor` through a temporary file named after the chapter.
pub fn edit_chapter_text(editor: &str, chapter: &ChapterInfo, initial: &str) -> Result<String> {
    let temp_file = env::temp_dir().join(format!(
        "lanry-{}-{}",
        Uuid::new_v4().simple(),
        encode_file_name(chapter.id, &chapter.title)
    ));

    fs::write(&temp_file, initial).map_err(LanryError::Io)?;
    let result = open_in_editor(editor, &temp_file);
    let _ = fs::remove_file(&temp_file);
    result
}
