use crate::commands::{CmdMessage, CmdResult};
use crate::config::LanryConfig;
use crate::error::Result;
use std::path::Path;

/// The effective configuration. The API key is only ever shown masked.
pub fn run(base_dir: &Path, config: &LanryConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let lines = [
        ("base_dir", base_dir.display().to_string()),
        (
            "chapters_dir",
            config.chapters_path(base_dir).display().to_string(),
        ),
        (
            "supabase_url",
            config
                .supabase_url
                .clone()
                .unwrap_or_else(|| "(not set)".to_string()),
        ),
        (
            "supabase_key",
            config
                .masked_key()
                .unwrap_or_else(|| "(not set)".to_string()),
        ),
        (
            "upload_timeout_secs",
            config.upload_timeout_secs.to_string(),
        ),
        (
            "default_age_rating",
            config.default_age_rating.to_string(),
        ),
    ];
    for (key, value) in lines {
        result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
    }

    Ok(result.with_config(config.clone()))
}
