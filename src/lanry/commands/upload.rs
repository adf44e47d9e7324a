use crate::client::LanryClient;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LanryError, Result};
use crate::session::EditorSession;
use crate::store::ChapterBackend;
use crate::transport::HttpTransport;
use crate::upload::{AgeRating, ChapterUploadRequest};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub novel_id: String,
    pub email: String,
    pub password: String,
    pub age_rating: AgeRating,
    pub publish_at: Option<DateTime<Utc>>,
    pub author_thoughts: Option<String>,
    pub volume_id: Option<String>,
}

/// Log in and publish chapter `id`.
///
/// The login session only lives for this call. Chapters whose body is blank are
/// refused before anything is sent.
pub fn run<B, T>(
    session: &mut EditorSession<B>,
    client: &LanryClient<T>,
    id: u32,
    options: &UploadOptions,
) -> Result<CmdResult>
where
    B: ChapterBackend,
    T: HttpTransport,
{
    let info = session
        .navigator()
        .get(id)
        .cloned()
        .ok_or(LanryError::ChapterNotFound(id))?;
    let content = session.store_mut().load_content(info.id, &info.title);
    if content.trim().is_empty() {
        return Err(LanryError::Api(format!(
            "{} is empty, nothing to upload",
            info
        )));
    }

    let mut request =
        ChapterUploadRequest::new(info.id, &info.title, &content).age_rating(options.age_rating);
    if let Some(at) = options.publish_at {
        request = request.publish_at(at);
    }
    if let Some(thoughts) = options.author_thoughts.as_deref().filter(|t| !t.trim().is_empty()) {
        request = request.author_thoughts(thoughts);
    }
    if let Some(volume) = options.volume_id.as_deref().filter(|v| !v.trim().is_empty()) {
        request = request.volume_id(volume);
    }

    let auth = client.login(&options.email, &options.password)?;
    client.upload_chapter(Some(&auth), &options.novel_id, &request)?;

    let mut result = CmdResult::default().with_affected_chapters(vec![info.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Uploaded {} to novel {}",
        info,
        options.novel_id.trim()
    )));
    Ok(result)
}
