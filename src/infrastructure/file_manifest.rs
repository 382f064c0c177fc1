// Manifest source reading a local file
use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::manifest_source::{LoadError, ManifestSource};
use crate::domain::manifest::Manifest;

#[derive(Debug, Clone)]
pub struct FileManifestSource {
    path: PathBuf,
    location: String,
}

impl FileManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait(?Send)]
impl ManifestSource for FileManifestSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Manifest, LoadError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                location: self.location.clone(),
                source,
            })?;
        Manifest::from_json(&body).map_err(|source| LoadError::Parse {
            location: self.location.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_reads_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.json");
        fs::write(&path, r#"{"sections":[{"title":"Uno"}]}"#).unwrap();

        let manifest = FileManifestSource::new(&path).load().await.unwrap();
        assert_eq!(manifest.into_sections().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileManifestSource::new(dir.path().join("plots.json"));
        assert!(matches!(source.fetch().await, Err(LoadError::Io { .. })));
        assert!(source.load().await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.json");
        fs::write(&path, "{\"sections\": [").unwrap();

        let source = FileManifestSource::new(&path);
        assert!(matches!(source.fetch().await, Err(LoadError::Parse { .. })));
        assert!(source.load().await.is_none());
    }
}
