//! Document loading with a single fallback.
//!
//! One attempt against the configured source; any failure (IO error,
//! non-success status, transport error, blank body) substitutes the embedded
//! document. There are no retries.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{header::CACHE_CONTROL, Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::embedded::EMBEDDED_DOCUMENT;

/// Error raised while fetching a document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid URL {0:?}")]
    InvalidUrl(String),
    #[error("document is empty")]
    Empty,
}

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The requested source
    Remote,
    /// The built-in fallback document
    Embedded,
}

/// A document ready to render, tagged with where it came from.
#[derive(Debug)]
pub struct LoadedDocument {
    /// Raw Markdown source
    pub content: String,
    /// Whether this is the requested document or the fallback
    pub origin: Origin,
}

impl LoadedDocument {
    /// Create a new LoadedDocument from fetched content
    pub fn remote(content: String) -> Self {
        Self {
            content,
            origin: Origin::Remote,
        }
    }

    /// Create a new LoadedDocument holding the embedded fallback
    pub fn embedded() -> Self {
        Self {
            content: EMBEDDED_DOCUMENT.to_string(),
            origin: Origin::Embedded,
        }
    }

    /// Length in characters, as reported in the status line
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Contract implemented by document sources.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the named document. Blank content is an error.
    async fn fetch(&self, name: &str) -> Result<String, LoadError>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    base: PathBuf,
}

impl FileSource {
    /// Create a new FileSource resolving names against `base`
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, name: &str) -> Result<String, LoadError> {
        let path = self.base.join(name);
        debug!(path = %path.display(), "reading document");
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io { path, source })?;
        non_blank(content)
    }
}

/// Fetches documents over HTTP(S), bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Option<Url>,
}

impl HttpSource {
    /// Create a new HttpSource with a default client
    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder().build()?;
        Ok(Self { client, base: None })
    }

    /// Resolve relative names against `base`
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    fn resolve(&self, name: &str) -> Result<Url, LoadError> {
        match (Url::parse(name), &self.base) {
            (Ok(url), _) => Ok(url),
            (Err(_), Some(base)) => base
                .join(name)
                .map_err(|_| LoadError::InvalidUrl(name.to_string())),
            (Err(_), None) => Err(LoadError::InvalidUrl(name.to_string())),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<String, LoadError> {
        let url = self.resolve(name)?;
        debug!(%url, "fetching document");
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        non_blank(response.text().await?)
    }
}

fn non_blank(content: String) -> Result<String, LoadError> {
    if content.trim().is_empty() {
        Err(LoadError::Empty)
    } else {
        Ok(content)
    }
}

/// Pick the source that can serve `name`: HTTP(S) URLs go over the network,
/// everything else is read from disk relative to the working directory.
pub fn source_for(name: &str) -> Result<Box<dyn DocumentSource>, LoadError> {
    if name.starts_with("http://") || name.starts_with("https://") {
        Ok(Box::new(HttpSource::new()?))
    } else {
        Ok(Box::new(FileSource::new(".")))
    }
}

/// Fetch `name` once, substituting the embedded document on any failure.
pub async fn load_with_fallback(source: &dyn DocumentSource, name: &str) -> LoadedDocument {
    match source.fetch(name).await {
        Ok(content) => LoadedDocument::remote(content),
        Err(err) => {
            warn!(%name, error = %err, "loading failed; using embedded document");
            LoadedDocument::embedded()
        }
    }
}

/// Describe what is being shown, e.g. `Showing input.md (120 chars)`.
pub fn status_line(name: &str, loaded: &LoadedDocument) -> String {
    match loaded.origin {
        Origin::Remote => format!("Showing {} ({} chars)", name, loaded.char_count()),
        Origin::Embedded => format!(
            "Showing embedded fallback ({} chars) • {} not found; loaded embedded content.",
            loaded.char_count(),
            name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one HTTP response on a local port; the handle yields the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            // The client may hang up after reading the status line.
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (Url::parse(&format!("http://{addr}/input.md")).unwrap(), handle)
    }

    fn local_http_source() -> HttpSource {
        HttpSource {
            client: Client::builder().no_proxy().build().unwrap(),
            base: None,
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DocumentSource for FailingSource {
        async fn fetch(&self, _name: &str) -> Result<String, LoadError> {
            Err(LoadError::Status(404))
        }
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("input.md"), "# Hi\n").unwrap();

        let source = FileSource::new(dir.path());
        let content = source.fetch("input.md").await.unwrap();
        assert_eq!(content, "# Hi\n");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());
        let err = source.fetch("missing.md").await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_file_source_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blank.md"), " \n\t\n").unwrap();

        let source = FileSource::new(dir.path());
        let err = source.fetch("blank.md").await.unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[tokio::test]
    async fn test_fallback_on_failure() {
        let loaded = load_with_fallback(&FailingSource, "input.md").await;
        assert_eq!(loaded.origin, Origin::Embedded);
        assert_eq!(loaded.content, EMBEDDED_DOCUMENT);
    }

    #[tokio::test]
    async fn test_fallback_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let loaded = load_with_fallback(&FileSource::new(dir.path()), "input.md").await;
        assert_eq!(loaded.origin, Origin::Embedded);
    }

    #[tokio::test]
    async fn test_remote_when_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("input.md"), "text").unwrap();
        let loaded = load_with_fallback(&FileSource::new(dir.path()), "input.md").await;
        assert_eq!(loaded.origin, Origin::Remote);
        assert_eq!(loaded.content, "text");
    }

    #[test]
    fn test_status_line_remote() {
        let loaded = LoadedDocument::remote("héllo".to_string());
        assert_eq!(status_line("input.md", &loaded), "Showing input.md (5 chars)");
    }

    #[test]
    fn test_status_line_embedded() {
        let loaded = LoadedDocument::embedded();
        let status = status_line("input.md", &loaded);
        assert!(status.starts_with("Showing embedded fallback ("));
        assert!(status.ends_with("• input.md not found; loaded embedded content."));
    }

    #[test]
    fn test_http_resolve() {
        let source = HttpSource::new().unwrap();
        assert_eq!(
            source.resolve("https://example.com/a.md").unwrap().as_str(),
            "https://example.com/a.md"
        );
        assert!(matches!(
            source.resolve("input.md"),
            Err(LoadError::InvalidUrl(_))
        ));

        let source = source.with_base(Url::parse("https://example.com/docs/").unwrap());
        assert_eq!(
            source.resolve("input.md").unwrap().as_str(),
            "https://example.com/docs/input.md"
        );
    }

    #[tokio::test]
    async fn test_http_source_reads_body() {
        let (url, server) = serve_once("200 OK", "# Remote\n").await;
        let content = local_http_source().fetch(url.as_str()).await.unwrap();
        assert_eq!(content, "# Remote\n");

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /input.md "));
        assert!(request.contains("cache-control: no-store"));
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let (url, server) = serve_once("404 Not Found", "missing").await;
        let err = local_http_source().fetch(url.as_str()).await.unwrap_err();
        assert!(matches!(err, LoadError::Status(404)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_source_blank_body_is_empty() {
        let (url, server) = serve_once("200 OK", "  \n").await;
        let err = local_http_source().fetch(url.as_str()).await.unwrap_err();
        assert!(matches!(err, LoadError::Empty));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_fallback_outcomes() {
        let source = local_http_source();

        let (url, _server) = serve_once("500 Internal Server Error", "").await;
        let loaded = load_with_fallback(&source, url.as_str()).await;
        assert_eq!(loaded.origin, Origin::Embedded);
        assert_eq!(loaded.content, EMBEDDED_DOCUMENT);

        let (url, _server) = serve_once("200 OK", "").await;
        let loaded = load_with_fallback(&source, url.as_str()).await;
        assert_eq!(loaded.origin, Origin::Embedded);

        let (url, _server) = serve_once("200 OK", "text").await;
        let loaded = load_with_fallback(&source, url.as_str()).await;
        assert_eq!(loaded.origin, Origin::Remote);
        assert_eq!(loaded.content, "text");
    }

    #[test]
    fn test_source_for_local_path() {
        assert!(source_for("input.md").is_ok());
    }
}
