use crate::commands::{CmdMessage, CmdResult};
use crate::config::{LanryConfig, PROJECT_CONFIG_FILENAME};
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Create the chapters directory and, when missing, a `lanry.json` with the
/// current settings to edit.
pub fn run(base_dir: &Path, config: &LanryConfig) -> Result<CmdResult> {
    let chapters = config.chapters_path(base_dir);
    fs::create_dir_all(&chapters)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized chapters directory at {}",
        chapters.display()
    )));

    if base_dir.join(PROJECT_CONFIG_FILENAME).exists() {
        result.add_message(CmdMessage::info(format!(
            "{} already exists, left unchanged",
            PROJECT_CONFIG_FILENAME
        )));
    } else {
        let path = config.save(base_dir)?;
        result.add_message(CmdMessage::success(format!(
            "Wrote {}",
            path.display()
        )));
    }

    Ok(result.with_config(config.clone()))
}
