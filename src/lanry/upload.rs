use crate::auth::AuthSession;
use crate::client::LanryClient;
use crate::error::{LanryError, Result};
use crate::transport::HttpTransport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeRating {
    #[default]
    Everyone,
    Teen,
    Mature,
    Adult,
}

impl AgeRating {
    pub const ALL: [AgeRating; 4] = [
        AgeRating::Everyone,
        AgeRating::Teen,
        AgeRating::Mature,
        AgeRating::Adult,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRating::Everyone => "EVERYONE",
            AgeRating::Teen => "TEEN",
            AgeRating::Mature => "MATURE",
            AgeRating::Adult => "ADULT",
        }
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeRating {
    type Err = LanryError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|rating| rating.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                LanryError::Api(format!(
                    "unknown age rating '{}' (expected EVERYONE, TEEN, MATURE or ADULT)",
                    s
                ))
            })
    }
}

/// Body of a chapter upload. Unset optional fields are sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterUploadRequest {
    pub chapter_number: u32,
    pub title: Option<String>,
    pub content: String,
    pub publish_at: Option<DateTime<Utc>>,
    pub age_rating: AgeRating,
    pub author_thoughts: Option<String>,
    pub volume_id: Option<String>,
}

impl ChapterUploadRequest {
    /// Content is trimmed; an empty title is sent as `null`.
    pub fn new(chapter_number: u32, title: &str, content: &str) -> Self {
        let title = title.trim();
        Self {
            chapter_number,
            title: (!title.is_empty()).then(|| title.to_string()),
            content: content.trim().to_string(),
            publish_at: None,
            age_rating: AgeRating::default(),
            author_thoughts: None,
            volume_id: None,
        }
    }

    pub fn publish_at(mut self, at: DateTime<Utc>) -> Self {
        self.publish_at = Some(at);
        self
    }

    pub fn age_rating(mut self, rating: AgeRating) -> Self {
        self.age_rating = rating;
        self
    }

    pub fn author_thoughts(mut self, thoughts: impl Into<String>) -> Self {
        self.author_thoughts = Some(thoughts.into());
        self
    }

    pub fn volume_id(mut self, volume: impl Into<String>) -> Self {
        self.volume_id = Some(volume.into());
        self
    }
}

impl<T: HttpTransport> LanryClient<T> {
    /// Publish one chapter to `novel_id`. One attempt, no retry.
    pub fn upload_chapter(
        &self,
        session: Option<&AuthSession>,
        novel_id: &str,
        request: &ChapterUploadRequest,
    ) -> Result<()> {
        let session = session
            .filter(|s| s.is_usable())
            .ok_or(LanryError::NotAuthenticated)?;

        let novel_id = novel_id.trim();
        if novel_id.is_empty() {
            return Err(LanryError::Api("novel id is required".to_string()));
        }

        let url = self.segment_url(&["api", "novels", novel_id, "chapters"])?;
        let body = serde_json::to_value(request)?;
        let headers = [("Authorization", session.bearer())];

        debug!(novel = novel_id, chapter = request.chapter_number, "uploading chapter");
        let response = self.transport().post_json(&url, &headers, &body)?;
        if !response.is_success() {
            warn!(
                novel = novel_id,
                chapter = request.chapter_number,
                status = response.status,
                "upload rejected"
            );
            return Err(LanryError::UploadFailed {
                status: response.status,
                body: response.body,
            });
        }

        info!(novel = novel_id, chapter = request.chapter_number, "chapter uploaded");
        Ok(())
    }
}
