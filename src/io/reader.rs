use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::io::remote::{DEFAULT_TIMEOUT, HttpFetcher};
use crate::io::{IoError, Reference};

/// Resolves references to raw bytes from disk or over HTTP.
#[derive(Debug, Clone)]
pub struct Loader {
    http: HttpFetcher,
}

impl Loader {
    pub fn new(timeout: Duration) -> Result<Self, IoError> {
        Ok(Self {
            http: HttpFetcher::new(timeout)?,
        })
    }

    pub fn with_default_timeout() -> Result<Self, IoError> {
        Self::new(DEFAULT_TIMEOUT)
    }

    pub fn resolve(&self, reference: &Reference) -> Result<Vec<u8>, IoError> {
        let bytes = match reference {
            Reference::Remote(url) => self.http.fetch(url)?,
            Reference::Local(path) => read_local(path)?,
        };
        tracing::debug!(
            reference = %reference,
            kind = reference.kind(),
            bytes = bytes.len(),
            "loaded document"
        );
        Ok(bytes)
    }
}

fn read_local(path: &Path) -> Result<Vec<u8>, IoError> {
    fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}
