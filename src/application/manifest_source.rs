// Manifest loading port
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::manifest::Manifest;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not fetch {location}: {reason}")]
    Transport { location: String, reason: String },
    #[error("{location} answered with status {status}")]
    Status { location: String, status: u16 },
    #[error("could not read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{location} is not valid JSON: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait(?Send)]
pub trait ManifestSource {
    /// Where the manifest comes from, for diagnostics.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<Manifest, LoadError>;

    /// Fetch and parse, failing soft: every error is logged and reported as
    /// "no manifest".
    async fn load(&self) -> Option<Manifest> {
        match self.fetch().await {
            Ok(manifest) => Some(manifest),
            Err(err) => {
                tracing::error!(error = %err, "manifest unavailable, dashboard stays empty");
                None
            }
        }
    }
}
