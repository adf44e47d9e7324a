use crate::api::LanryApi;
use crate::config::LanryConfig;
use crate::error::Result;
use crate::store::fs_backend::FsBackend;
use crate::store::ChapterStore;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOME_ENV: &str = "LANRY_HOME";

pub struct LanryContext {
    pub api: LanryApi<FsBackend>,
    pub config: LanryConfig,
    pub base_dir: PathBuf,
}

/// Directory holding `Chapters/`, `lanry.json` and `.env`:
/// the explicit flag, else `$LANRY_HOME`, else `cwd`.
pub fn resolve_base_dir(flag: Option<&Path>, home_env: Option<&str>, cwd: &Path) -> PathBuf {
    if let Some(dir) = flag {
        return absolutize(dir, cwd);
    }
    if let Some(home) = home_env.filter(|h| !h.trim().is_empty()) {
        return absolutize(Path::new(home), cwd);
    }
    cwd.to_path_buf()
}

fn absolutize(dir: &Path, cwd: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        cwd.join(dir)
    }
}

pub fn initialize(base_dir: &Path) -> Result<LanryContext> {
    let config = LanryConfig::load(base_dir)?;
    let chapters_dir = config.chapters_path(base_dir);
    debug!(base = %base_dir.display(), chapters = %chapters_dir.display(), "initializing");

    let store = ChapterStore::with_backend(FsBackend::new(chapters_dir));
    let api = LanryApi::new(store, base_dir.to_path_buf(), config.clone());

    Ok(LanryContext {
        api,
        config,
        base_dir: base_dir.to_path_buf(),
    })
}

/// [`resolve_base_dir`] against the real environment.
pub fn base_dir_from_env(flag: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    let home = env::var(HOME_ENV).ok();
    Ok(resolve_base_dir(flag, home.as_deref(), &cwd))
}
