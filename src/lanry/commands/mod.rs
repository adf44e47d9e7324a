use crate::config::LanryConfig;
use crate::model::{ChapterInfo, ChapterListing};
use crate::store::SaveStatus;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod paths;
pub mod upload;
pub mod view;
pub mod write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }

    /// Message for a save outcome: success when the file was written,
    /// a warning when the text only lives in memory.
    pub fn for_save(chapter: &ChapterInfo, status: &SaveStatus) -> Self {
        match status {
            SaveStatus::Persisted { path } => {
                Self::success(format!("Saved {} to {}", chapter, path.display()))
            }
            SaveStatus::MemoryOnly { reason } => Self::warning(format!(
                "{} could not be written to disk and was kept in memory only: {}",
                chapter, reason
            )),
        }
    }
}

/// A chapter together with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterText {
    pub info: ChapterInfo,
    pub content: String,
}

impl ChapterText {
    pub fn word_count(&self) -> usize {
        crate::model::word_count(&self.content)
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_chapters: Vec<ChapterInfo>,
    pub listed_chapters: Vec<ChapterListing>,
    pub chapter_texts: Vec<ChapterText>,
    pub chapter_paths: Vec<PathBuf>,
    pub config: Option<LanryConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_chapters(mut self, chapters: Vec<ChapterInfo>) -> Self {
        self.affected_chapters = chapters;
        self
    }

    pub fn with_listed_chapters(mut self, chapters: Vec<ChapterListing>) -> Self {
        self.listed_chapters = chapters;
        self
    }

    pub fn with_chapter_texts(mut self, texts: Vec<ChapterText>) -> Self {
        self.chapter_texts = texts;
        self
    }

    pub fn with_chapter_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.chapter_paths = paths;
        self
    }

    pub fn with_config(mut self, config: LanryConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
