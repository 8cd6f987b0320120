use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

use crate::config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid asset route: {0}")]
    InvalidRoute(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Disk-backed asset store for uploaded images. Assets live under the
/// configured root in per-kind containers ("posters", "actors") and are
/// addressed by a relative route like `posters/<uuid>.jpg`.
///
/// Storage writes are not transactional with database writes: a failed file
/// operation after a committed row is logged by the caller and left as-is.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn from_config() -> Self {
        Self { root: PathBuf::from(&config::config().storage.root) }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write a new asset under `container`, keeping the original extension,
    /// and return its relative route.
    pub async fn save(
        &self,
        container: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let route = format!("{}/{}", container, file_name);

        let dir = self.root.join(container);
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(&file_name), bytes).await?;

        Ok(route)
    }

    /// Replace an existing asset: delete the old route (if any), then save.
    pub async fn replace(
        &self,
        container: &str,
        old_route: Option<&str>,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        if let Some(route) = old_route {
            self.delete(route).await?;
        }
        self.save(container, original_name, bytes).await
    }

    /// Remove an asset by route. Idempotent: a missing file is not an error.
    pub async fn delete(&self, route: &str) -> Result<(), StorageError> {
        let path = self.resolve(route)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a relative route, rejecting anything that escapes the root.
    fn resolve(&self, route: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(route);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir));
        if escapes {
            return Err(StorageError::InvalidRoute(route.to_string()));
        }
        Ok(self.root.join(relative))
    }
}
