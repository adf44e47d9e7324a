use crate::error::{LanryError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::ChapterStore;
use crate::transport::{HttpResponse, HttpTransport};
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that replays queued responses and records what was sent.
/// Running out of responses is a transport error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<HttpResponse>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.push(Err(LanryError::Transport(message.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(n, v)| (n.to_string(), v.clone()))
                .collect(),
            body: body.clone(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(LanryError::Transport("no scripted response".to_string())))
    }
}

/// Store over a memory backend seeded with `files`.
pub fn mem_store(files: &[(&str, &str)]) -> ChapterStore<MemBackend> {
    let backend = MemBackend::new();
    for (name, text) in files {
        backend.put_file(name, text);
    }
    ChapterStore::with_backend(backend)
}

/// A real chapters directory in a temp dir. The dir lives as long as the env.
pub struct TestEnv {
    pub dir: TempDir,
    pub store: ChapterStore<FsBackend>,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = ChapterStore::with_backend(FsBackend::new(dir.path().join("Chapters")));
        Self { dir, store }
    }
}
