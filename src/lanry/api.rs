//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for chapter operations, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`EditorSession`] (chapter list, active buffer, chapter store)
//!   together with the base directory and configuration
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and makes no decisions about terminals or exit codes.
//!
//! ## Generic Over ChapterBackend
//!
//! `LanryApi<B: ChapterBackend>` is generic over the storage backend:
//! - Production: `LanryApi<FsBackend>`
//! - Testing: `LanryApi<MemBackend>`
//!
//! Uploads are generic over the HTTP transport the same way, so the whole path
//! from chapter file to request body can be tested without a network.

use crate::client::LanryClient;
use crate::commands;
use crate::config::LanryConfig;
use crate::error::Result;
use crate::model::ChapterInfo;
use crate::session::EditorSession;
use crate::store::{ChapterBackend, ChapterStore, SaveStatus};
use crate::transport::HttpTransport;
use std::path::{Path, PathBuf};

pub struct LanryApi<B: ChapterBackend> {
    session: EditorSession<B>,
    base_dir: PathBuf,
    config: LanryConfig,
}

impl<B: ChapterBackend> LanryApi<B> {
    pub fn new(store: ChapterStore<B>, base_dir: PathBuf, config: LanryConfig) -> Self {
        Self {
            session: EditorSession::open(store),
            base_dir,
            config,
        }
    }

    pub fn list_chapters(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.session)
    }

    pub fn add_chapter(&mut self, id: u32, title: &str) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.session, id, title)
    }

    pub fn view_chapters(&mut self, ids: &[u32]) -> Result<commands::CmdResult> {
        commands::view::run(&mut self.session, ids)
    }

    pub fn write_chapter(&mut self, id: u32, content: &str) -> Result<commands::CmdResult> {
        commands::write::run(&mut self.session, id, content)
    }

    pub fn edit_chapter<F>(&mut self, id: u32, surface: F) -> Result<commands::CmdResult>
    where
        F: FnOnce(&ChapterInfo, &str) -> Result<String>,
    {
        commands::edit::run(&mut self.session, id, surface)
    }

    pub fn chapter_paths(&self, ids: &[u32]) -> Result<commands::CmdResult> {
        commands::paths::run(&self.session, ids)
    }

    pub fn export_chapters(&mut self, ids: &[u32], output: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&mut self.session, ids, output)
    }

    pub fn export_chapter_text(&mut self, id: u32, output: &Path) -> Result<commands::CmdResult> {
        commands::export::run_plain(&mut self.session, id, output)
    }

    pub fn upload_chapter<T: HttpTransport>(
        &mut self,
        client: &LanryClient<T>,
        id: u32,
        options: &UploadOptions,
    ) -> Result<commands::CmdResult> {
        commands::upload::run(&mut self.session, client, id, options)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.base_dir, &self.config)
    }

    pub fn show_config(&self) -> Result<commands::CmdResult> {
        commands::config::run(&self.base_dir, &self.config)
    }

    /// Flush the active chapter, if any. Call before exiting.
    pub fn close(&mut self) -> Option<SaveStatus> {
        self.session.close()
    }

    pub fn session(&self) -> &EditorSession<B> {
        &self.session
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &LanryConfig {
        &self.config
    }
}

pub use commands::upload::UploadOptions;
pub use commands::{ChapterText, CmdMessage, CmdResult, MessageLevel};
