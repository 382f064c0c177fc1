// Manifest source fetching over HTTP
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::application::manifest_source::{LoadError, ManifestSource};
use crate::domain::manifest::Manifest;

#[derive(Debug, Clone)]
pub struct HttpManifestSource {
    url: String,
    client: reqwest::Client,
}

impl HttpManifestSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait(?Send)]
impl ManifestSource for HttpManifestSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Manifest, LoadError> {
        let transport = |err: reqwest::Error| LoadError::Transport {
            location: self.url.clone(),
            reason: err.to_string(),
        };

        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                location: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        Manifest::from_json(&body).map_err(|source| LoadError::Parse {
            location: self.url.clone(),
            source,
        })
    }
}
