use std::fmt;
use std::path::PathBuf;

const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where a document lives: on the local filesystem or behind an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Remote(String),
    Local(PathBuf),
}

impl Reference {
    /// Classifies a raw reference. Only an `http://` or `https://` prefix
    /// (scheme matched case-insensitively) selects the remote loader.
    pub fn parse(raw: &str) -> Self {
        if is_remote(raw) {
            Self::Remote(raw.to_string())
        } else {
            Self::Local(PathBuf::from(raw))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Remote(_) => "url",
            Self::Local(_) => "path",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_remote(raw: &str) -> bool {
    REMOTE_SCHEMES.iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
