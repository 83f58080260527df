use serde_json::Value;
use url::Url;

use crate::io::{self, Loader, Reference};

/// Resolves external `$ref` targets with the same loader used for inputs, so
/// referenced schemas may be local or remote, YAML or JSON.
#[derive(Debug, Clone)]
pub struct LoaderRetriever {
    loader: Loader,
}

impl LoaderRetriever {
    pub fn new(loader: Loader) -> Self {
        Self { loader }
    }

    /// `file://` URIs become percent-decoded local paths; only an empty or
    /// `localhost` host is accepted.
    fn reference_for(uri: &str) -> Option<Reference> {
        match Url::parse(uri) {
            Ok(url) if url.scheme() == "file" => {
                return url.to_file_path().ok().map(Reference::Local);
            }
            _ => {}
        }
        let reference = Reference::parse(uri);
        reference.is_remote().then_some(reference)
    }
}

impl jsonschema::Retrieve for LoaderRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<String>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let Some(reference) = Self::reference_for(uri.as_str()) else {
            return Err(format!("unsupported $ref target: {uri}").into());
        };
        tracing::debug!(%reference, "resolving external schema reference");
        Ok(io::load_json_value(&self.loader, &reference)?)
    }
}
