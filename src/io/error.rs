use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("open {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {reference:?}: {source}")]
    Http {
        reference: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not access document at {reference:?} [{status}]")]
    Status {
        reference: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("yaml parse error in {reference}: {source}")]
    YamlParse {
        reference: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{reference} holds more than one yaml document")]
    MultipleDocuments { reference: String },

    #[error("{reference} cannot be represented as json: {source}")]
    JsonConvert {
        reference: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("json encode error: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

impl IoError {
    /// True for failures that happened while fetching bytes, as opposed to
    /// decoding them.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Http { .. } | Self::Status { .. } | Self::Client(_)
        )
    }
}
