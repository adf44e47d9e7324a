use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanryError {
    #[error("Chapter not found: {0}")]
    ChapterNotFound(u32),

    #[error("Chapter {0} already exists")]
    DuplicateChapter(u32),

    #[error("Invalid chapter number: {0} (chapter numbers start at 1)")]
    InvalidChapterId(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated. Please log in first.")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    Auth(String),

    #[error("Upload failed: {status} - {body}")]
    UploadFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LanryError>;
