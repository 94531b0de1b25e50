//! Where the query engine fetches the posts index from.
//!
//! | Location                    | Source         |
//! |-----------------------------|----------------|
//! | `http://...`, `https://...` | [`HttpSource`] |
//! | anything else               | [`FileSource`] |

use super::QueryError;
use crate::data::PostsIndex;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A single fetch of the serialized index.
pub trait IndexSource {
    /// Human readable location, used in log lines.
    fn location(&self) -> String;

    /// Fetch and parse the index. Called at most once per engine.
    fn fetch(&self) -> Result<PostsIndex, QueryError>;
}

impl<S: IndexSource + ?Sized> IndexSource for Box<S> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn fetch(&self) -> Result<PostsIndex, QueryError> {
        (**self).fetch()
    }
}

/// Pick a source for `location`: URLs go over HTTP, the rest is a path.
pub fn open_source(location: &str) -> Box<dyn IndexSource> {
    if is_url(location) {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Parse index JSON, tolerating unknown fields.
fn parse(json: &str) -> Result<PostsIndex, QueryError> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// File
// ============================================================================

/// Index artifact on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl IndexSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<PostsIndex, QueryError> {
        let json =
            fs::read_to_string(&self.path).map_err(|err| QueryError::Io(self.path.clone(), err))?;
        parse(&json)
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Index artifact served over HTTP (e.g. `https://blog.example/posts-index.json`).
///
/// Uses the client's default connect behaviour; there is no overall timeout.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl IndexSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<PostsIndex, QueryError> {
        let request_err = |err| QueryError::Request(self.url.clone(), err);

        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(request_err)?;
        let response = client.get(&self.url).send().map_err(request_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(request_err)?;
        parse(&body)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tiny_http::{Response, Server};

    const INDEX_JSON: &str = r#"{
        "posts": [
            { "slug": "a", "title": "A", "date": "2024-01-02", "tags": ["x"],
              "excerpt": "", "content": "", "readingTime": 1, "filePath": "src/pages/a.md" }
        ],
        "lastGenerated": "2024-01-03T00:00:00.000Z"
    }"#;

    /// Serve a single request with `body` and `status`, return the URL.
    fn serve_once(body: &'static str, status: u16) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}/posts-index.json")
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://localhost/posts-index.json"));
        assert!(is_url("https://blog.example/posts-index.json"));
        assert!(!is_url("public/posts-index.json"));
        assert!(!is_url("httpdocs/posts-index.json"));
    }

    #[test]
    fn test_file_source_reads_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts-index.json");
        fs::write(&path, INDEX_JSON).unwrap();

        let index = FileSource::new(&path).fetch().unwrap();
        assert_eq!(index.posts.len(), 1);
        assert_eq!(index.posts[0].slug, "a");
        assert_eq!(index.last_generated, "2024-01-03T00:00:00.000Z");
    }

    #[test]
    fn test_file_source_missing_file() {
        let err = FileSource::new("/nonexistent/posts-index.json").fetch().unwrap_err();
        assert!(matches!(err, QueryError::Io(..)));
    }

    #[test]
    fn test_file_source_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts-index.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileSource::new(&path).fetch().unwrap_err();
        assert!(matches!(err, QueryError::Parse(_)));
    }

    #[test]
    fn test_http_source_fetches_index() {
        let url = serve_once(INDEX_JSON, 200);
        let index = HttpSource::new(url).fetch().unwrap();
        assert_eq!(index.posts[0].title, "A");
    }

    #[test]
    fn test_http_source_non_success_status() {
        let url = serve_once("not found", 404);
        let err = HttpSource::new(url).fetch().unwrap_err();
        assert!(matches!(err, QueryError::Status { status: 404, .. }));
    }

    #[test]
    fn test_open_source_dispatch() {
        assert_eq!(open_source("https://a.b/i.json").location(), "https://a.b/i.json");
        assert_eq!(open_source("public/i.json").location(), "public/i.json");
    }
}
