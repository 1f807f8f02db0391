//! I/O boundary traits for testability
//!
//! These traits abstract the dataset fetch and interactive input, allowing
//! services to be tested with in-memory implementations.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::infrastructure::{InfraError, InfraResult};

/// Non-success fetch of a collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("status {code} {reason}")]
    Status { code: u16, reason: String },

    #[error("unreachable: {0}")]
    Unreachable(String),
}

impl FetchError {
    pub fn not_found() -> Self {
        Self::Status {
            code: 404,
            reason: "Not Found".into(),
        }
    }
}

/// Source of the raw JSON collections.
pub trait DataSource: Send + Sync {
    /// Fetch the body of the named collection.
    fn fetch(&self, name: &str) -> Result<String, FetchError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Interactive line input.
pub trait Prompter: Send + Sync {
    /// Show `prompt` and read one line. Returns None at end of input.
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Collections read from files in a directory.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    dir: PathBuf,
}

impl FileDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataSource for FileDataSource {
    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FetchError::not_found(),
            io::ErrorKind::PermissionDenied => FetchError::Status {
                code: 403,
                reason: "Forbidden".into(),
            },
            _ => FetchError::Unreachable(format!("{}: {}", path.display(), e)),
        })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Collections fetched over HTTP(S) relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    base_url: String,
    client: Client,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> InfraResult<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("leitfaden/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfraError::Http {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

impl DataSource for HttpDataSource {
    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.url(name))
            .send()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        response
            .text()
            .map_err(|e| FetchError::Unreachable(e.to_string()))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Prompter reading from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt} ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// True if `location` should be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
