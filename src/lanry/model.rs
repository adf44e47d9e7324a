use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identity of a chapter: its number and display title.
///
/// The number is the primary key. Titles are free-form and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub id: u32,
    pub title: String,
}

impl ChapterInfo {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Heading shown above the editing buffer, e.g. "Chapter 3: The Revelation".
    pub fn heading(&self) -> String {
        if self.title.is_empty() {
            format!("Chapter {}", self.id)
        } else {
            format!("Chapter {}: {}", self.id, self.title)
        }
    }
}

impl fmt::Display for ChapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.heading())
    }
}

/// A chapter as found on disk, with the data needed for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterListing {
    pub info: ChapterInfo,
    pub path: PathBuf,
    pub modified_at: Option<DateTime<Utc>>,
    pub word_count: usize,
}

/// Words in a chapter body: runs of text separated by spaces, tabs or line breaks.
pub fn word_count(text: &str) -> usize {
    text.split(|c: char| matches!(c, ' ' | '\n' | '\r' | '\t'))
        .filter(|word| !word.is_empty())
        .count()
}
