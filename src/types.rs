use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Body encoding of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    UrlEncoded,
    Multipart,
}

/// A file attached to a multipart submission. Contents are read once, at
/// serialization time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub field: String,
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("contents", &format_args!("{} bytes", self.contents.len()))
            .finish()
    }
}

/// The fully-resolved request a serialized form stands for: method, absolute
/// URL, body encoding, field pairs in document order, and file payloads.
///
/// A plain value object; feed it to [`crate::Browser::submit`] to perform
/// the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescription {
    /// Lowercase HTTP method, e.g. "get" or "post".
    pub method: String,
    pub url: Url,
    pub encoding: Encoding,
    pub fields: Vec<(String, String)>,
    pub files: Vec<FileUpload>,
}

/// Per-request knobs passed through to the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Urlencoded body pairs, for methods that carry one.
    pub body: Option<Vec<(String, String)>>,
    pub timeout: Option<Duration>,
}

/// An owned snapshot of one HTTP response: final URL after redirects,
/// status, headers, and raw body bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSnapshot {
    pub url: Url,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ResponseSnapshot {
    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
