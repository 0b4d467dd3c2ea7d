//! Testing utilities for the CMS admin workspace
//!
//! Shared fixtures, a recording transport, and store helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use cms_access::PermissionStore;
use cms_client::{ApiRequest, ApiResponse, Transport, TransportError};
use cms_content::StyleNode;
use cms_fields::{FieldDescriptor, FieldKind, Language, PROPERTY_LANGUAGE_ID};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

pub fn store_with(permissions: &[&str]) -> Arc<PermissionStore> {
    Arc::new(PermissionStore::with_permissions(permissions.iter().copied()))
}

pub fn uninitialized_store() -> Arc<PermissionStore> {
    Arc::new(PermissionStore::new())
}

/// Transport that records requests and replays queued responses
///
/// With an empty queue every request gets `200 {}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: serde_json::Value) -> Self {
        self.responses.lock().push_back(ApiResponse::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push(request);
        Ok(self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(200, serde_json::json!({}))))
    }
}

/// Collects formatted `tracing` output for assertions
///
/// Events are only captured inside [`LogCapture::capture`], which installs
/// the subscriber for the current thread.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Captured lines at `level` (`"WARN"`, `"ERROR"`, ...)
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().any(|word| word == level))
            .map(str::to_string)
            .collect()
    }
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.buf))
    }
}

/// Three-level page: container → card (with a hole) → leaves
pub fn sample_tree() -> StyleNode {
    StyleNode::new("container")
        .with_id(1)
        .with_field("css", "page")
        .with_child(StyleNode::new("heading").with_id(2).with_field("title", "Welcome"))
        .with_child(
            StyleNode::new("card")
                .with_id(3)
                .with_field("title", "About")
                .with_hole()
                .with_child(StyleNode::new("text").with_id(4).with_field("text", "Hello there"))
                .with_child(StyleNode::new("image").with_id(5).with_field("img_src", "/assets/team.png")),
        )
        .with_child(StyleNode::new("divider"))
}

pub const SAMPLE_PAGE_JSON: &str = r#"[
    {
        "id": 10,
        "style_name": "container",
        "children": [
            null,
            { "id": 11, "style_name": "heading", "title": { "content": "Contact" }, "level": { "content": "2" } },
            { "id": 12, "style_name": "markdown", "text_md": { "content": "Write to **us**" } },
            { "id": 13, "style_name": "carousel", "items": { "content": "3" } },
            { "id": 14, "style_name": "image", "alt": { "content": "missing source" } },
            { "id": 15, "style_name": "link", "url": { "content": "/contact" }, "label": { "content": "Form" } }
        ]
    },
    null
]"#;

pub fn sample_languages() -> Vec<Language> {
    vec![
        Language::new(PROPERTY_LANGUAGE_ID, "all", "All languages"),
        Language::new(2, "es-ES", "Español"),
        Language::new(3, "en-GB", "English"),
    ]
}

pub fn sample_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(1, "title", FieldKind::Text)
            .translatable(true)
            .with_default("Hi")
            .with_translation(2, "Hola"),
        FieldDescriptor::new(2, "is_fluid", FieldKind::Checkbox).with_translation(PROPERTY_LANGUAGE_ID, "1"),
        FieldDescriptor::new(3, "css", FieldKind::Text).with_default("container"),
    ]
}
