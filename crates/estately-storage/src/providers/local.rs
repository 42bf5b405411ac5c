//! Local filesystem image store.
//!
//! Stores uploads under `<root>/listings/<uuid>.<ext>` and serves them via
//! the configured public base URL. Stands in for a hosted object store in
//! development and self-hosted deployments.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use estately_core::config::media::MediaConfig;
use estately_core::error::{AppError, ErrorKind};
use estately_core::result::AppResult;
use estately_core::traits::storage::ImageStore;

use crate::resource::MEDIA_ROOT_SEGMENT;

/// Local filesystem image store.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    /// Root directory for all stored images.
    root: PathBuf,
    /// Public base URL, no trailing slash.
    public_base_url: String,
}

impl LocalMediaStore {
    /// Create a new local media store from configuration.
    pub async fn new(config: &MediaConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(root.join(MEDIA_ROOT_SEGMENT))
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create media root: {}", root.display()),
                    e,
                )
            })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Keep the original file extension when it is a plausible one.
    fn extension_of(filename: &str) -> Option<&str> {
        let ext = Path::new(filename).extension()?.to_str()?;
        (ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())).then_some(ext)
    }

    /// Delete every file under the root whose extension-less path matches
    /// the given resource id. Missing objects are not an error.
    async fn delete_by_resource_id(&self, resource_id: &str) -> AppResult<()> {
        let target = self.root.join(resource_id);
        let Some(parent) = target.parent() else {
            return Ok(());
        };
        let Some(stem) = target.file_name() else {
            return Ok(());
        };

        let mut dir = match fs::read_dir(parent).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list media directory: {}", parent.display()),
                    e,
                ));
            }
        };

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read media directory entry", e)
        })? {
            let path = entry.path();
            if path.file_stem() == Some(stem) {
                if let Err(e) = fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %e, "Failed to delete stored image");
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStore for LocalMediaStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn upload(&self, filename: &str, data: Bytes) -> AppResult<String> {
        let key = match Self::extension_of(filename) {
            Some(ext) => format!("{}/{}.{}", MEDIA_ROOT_SEGMENT, Uuid::new_v4(), ext),
            None => format!("{}/{}", MEDIA_ROOT_SEGMENT, Uuid::new_v4()),
        };
        let full_path = self.root.join(&key);

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write image: {key}"),
                e,
            )
        })?;

        debug!(key = %key, bytes = data.len(), "Stored listing image");
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    async fn delete_many(&self, resource_ids: &[String]) -> AppResult<()> {
        for id in resource_ids {
            self.delete_by_resource_id(id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::resource_id_from_url;

    fn test_config(root: &Path) -> MediaConfig {
        MediaConfig {
            root_path: root.to_string_lossy().into_owned(),
            public_base_url: "http://localhost:8080/media/".to_string(),
            max_images_per_listing: 6,
        }
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(&test_config(dir.path())).await.unwrap();

        let url = store
            .upload("house.jpg", Bytes::from_static(b"fake-jpeg"))
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:8080/media/listings/"));
        assert!(url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_upload_then_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(&test_config(dir.path())).await.unwrap();

        let url = store
            .upload("plot.png", Bytes::from_static(b"fake-png"))
            .await
            .unwrap();
        let id = resource_id_from_url(&url).expect("derivable id");

        let stored: Vec<_> = std::fs::read_dir(dir.path().join("listings"))
            .unwrap()
            .collect();
        assert_eq!(stored.len(), 1);

        store.delete_many(&[id]).await.unwrap();

        let remaining: Vec<_> = std::fs::read_dir(dir.path().join("listings"))
            .unwrap()
            .collect();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_delete_of_missing_object_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(&test_config(dir.path())).await.unwrap();

        store
            .delete_many(&["listings/never-existed".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_odd_extension_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(&test_config(dir.path())).await.unwrap();

        let url = store
            .upload("weird.name.with/../garbage", Bytes::from_static(b"x"))
            .await
            .unwrap();
        // No usable extension: the stored key is just a UUID.
        let key = url.rsplit('/').next().unwrap();
        assert!(Uuid::parse_str(key).is_ok());
    }
}
