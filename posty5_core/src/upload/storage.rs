//! Direct transfers to pre-signed storage URLs.
//!
//! These requests bypass [`crate::HttpClient`] on purpose: the pre-signed URL
//! is its own authorization, so no API key is attached and nothing is
//! retried. A failed transfer needs a fresh URL from a new metadata call.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    client::truncate_body,
    errors::{normalize, Failure},
    Error,
};

/// Storage transfers can be large; give them more room than metadata calls.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// A pre-signed upload destination returned by a metadata call.
///
/// Valid for one transfer only and never stored beyond the operation that
/// received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub url: String,
    /// Form fields required by legacy backends. When present the transfer is
    /// a multipart `POST` instead of a raw `PUT`.
    pub fields: Option<BTreeMap<String, String>>,
}

impl UploadTarget {
    /// Target for a raw `PUT` of the file bytes.
    pub fn put(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: None,
        }
    }

    /// Target for a multipart `POST` with the given fields.
    pub fn form(url: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            url: url.into(),
            fields: Some(fields),
        }
    }

    /// The pre-signed URL with its signature query stripped.
    pub fn public_url(&self) -> String {
        match self.url.split_once('?') {
            Some((base, _)) => base.to_string(),
            None => self.url.clone(),
        }
    }

    fn is_form(&self) -> bool {
        self.fields.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// A binary payload fully loaded in memory, ready for a known-length transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl FilePayload {
    pub fn from_bytes(file_name: &str, content_type: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Drains a streaming source into a single buffer.
    pub async fn from_reader<R>(file_name: &str, content_type: &str, mut reader: R) -> Result<Self, Error>
    where
        R: AsyncRead + Unpin,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await.map_err(|e| {
            tracing::error!("Failed to read upload source {}: {}", file_name, e);
            normalize(Failure::Plain(Box::new(e)))
        })?;
        Ok(Self::from_bytes(file_name, content_type, bytes))
    }

    /// Reads a file from disk, guessing the content type from its extension
    /// when none is given.
    pub async fn from_path(path: impl AsRef<Path>, content_type: Option<&str>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = content_type
            .map(str::to_string)
            .unwrap_or_else(|| guess_content_type(&file_name).to_string());
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            tracing::error!("Failed to open {}: {}", path.display(), e);
            normalize(Failure::Plain(Box::new(e)))
        })?;
        Self::from_reader(&file_name, &content_type, file).await
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lower-cased extension including the dot, e.g. `.mp4`.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Client for raw transfers to object storage.
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
}

impl StorageClient {
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(UPLOAD_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build storage client: {}", e);
                normalize(Failure::Plain(Box::new(e)))
            })?;
        Ok(Self { http })
    }

    /// Transfers `file` to `target`, returning the public URL of the object.
    ///
    /// Any non-2xx answer is an `UPLOAD_FAILED` error carrying the storage
    /// status. Nothing is retried.
    pub async fn transfer(&self, target: &UploadTarget, file: &FilePayload) -> Result<String, Error> {
        let request = if target.is_form() {
            let mut form = Form::new();
            for (key, value) in target.fields.iter().flatten() {
                form = form.text(key.clone(), value.clone());
            }
            // Storage backends require the file part to come last.
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| normalize(Failure::Plain(Box::new(e))))?;
            self.http.post(&target.url).multipart(form.part("file", part))
        } else {
            self.http
                .put(&target.url)
                .header(CONTENT_TYPE, file.content_type.as_str())
                .body(file.bytes.clone())
        };

        tracing::debug!(
            file = file.file_name.as_str(),
            bytes = file.len(),
            multipart = target.is_form(),
            "Uploading to storage"
        );

        let resp = request
            .send()
            .await
            .map_err(|e| normalize(Failure::from(e)))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet = truncate_body(&body);
            tracing::error!("Upload to storage failed with status {}: {}", status, snippet);
            return Err(Error::upload_failed(status.as_u16(), &snippet));
        }

        Ok(target.public_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_strips_signature() {
        let target = UploadTarget::put("https://storage.example.com/pages/a.html?X-Amz-Signature=abc");
        assert_eq!(target.public_url(), "https://storage.example.com/pages/a.html");
        assert_eq!(
            UploadTarget::put("https://storage.example.com/b.png").public_url(),
            "https://storage.example.com/b.png"
        );
    }

    #[test]
    fn empty_fields_mean_raw_put() {
        assert!(!UploadTarget::form("https://s", BTreeMap::new()).is_form());
        let mut fields = BTreeMap::new();
        fields.insert("key".to_string(), "videos/1.mp4".to_string());
        assert!(UploadTarget::form("https://s", fields).is_form());
    }

    #[test]
    fn extension_is_lowercased() {
        let file = FilePayload::from_bytes("Clip.MP4", "video/mp4", vec![0u8; 4]);
        assert_eq!(file.extension().as_deref(), Some(".mp4"));
        assert_eq!(FilePayload::from_bytes("README", "text/plain", b"x".to_vec()).extension(), None);
    }

    #[test]
    fn content_type_guessing() {
        assert_eq!(guess_content_type("index.HTML"), "text/html");
        assert_eq!(guess_content_type("logo.png"), "image/png");
        assert_eq!(guess_content_type("blob"), "application/octet-stream");
    }

    #[tokio::test]
    async fn from_reader_drains_the_stream() {
        let source: &[u8] = b"<html><body>hi</body></html>";
        let file = FilePayload::from_reader("page.html", "text/html", source).await.unwrap();
        assert_eq!(file.len(), source.len());
        assert_eq!(file.bytes(), source);
        assert_eq!(file.content_type(), "text/html");
    }
}
