// crates/server/src/storage.rs
//! Filesystem layout for uploaded images and derived artifacts.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

/// Fixed name of the derived artifact inside a scan directory.
pub const ARTIFACT_FILE: &str = "model.usdz";

/// Extension given to uploaded images; files are named by 1-based position.
const IMAGE_EXT: &str = "jpg";

/// Errors raised while persisting uploads or artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create scan directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writer for the per-scan storage area.
///
/// Layout: `{root}/{scan_id}/1.jpg … N.jpg`, plus `model.usdz` once the scan
/// finishes. Each scan directory has exactly one submission writer and one
/// completion-task writer, so no locking is needed at this layer.
#[derive(Debug, Clone)]
pub struct ScanStorage {
    root: PathBuf,
}

impl ScanStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root storage directory. Called once at startup.
    pub fn ensure_root(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root).map_err(|source| StorageError::CreateDir {
            path: self.root.clone(),
            source,
        })
    }

    pub fn scan_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    pub fn artifact_path(&self, id: &str) -> PathBuf {
        self.scan_dir(id).join(ARTIFACT_FILE)
    }

    /// Write the uploaded images in field order, named by 1-based position.
    ///
    /// Creates the scan directory first. Any failure aborts the whole write;
    /// files already written for this scan are left behind under an id the
    /// client never learns.
    pub async fn store_images(&self, id: &str, images: &[Bytes]) -> Result<(), StorageError> {
        let dir = self.scan_dir(id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: dir.clone(),
                source,
            })?;

        for (position, image) in images.iter().enumerate() {
            let path = dir.join(format!("{}.{IMAGE_EXT}", position + 1));
            tokio::fs::write(&path, image)
                .await
                .map_err(|source| StorageError::Write {
                    path: path.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Write the derived artifact for a finished scan.
    pub async fn write_artifact(&self, id: &str, contents: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.artifact_path(id);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage() -> (ScanStorage, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp storage root");
        (ScanStorage::new(dir.path()), dir)
    }

    #[tokio::test]
    async fn test_images_stored_positionally() {
        let (storage, _dir) = test_storage();
        let images = vec![
            Bytes::from_static(b"first"),
            Bytes::from_static(b"second"),
            Bytes::from_static(b"third"),
        ];

        storage.store_images("scan-1", &images).await.unwrap();

        let dir = storage.scan_dir("scan-1");
        assert_eq!(std::fs::read(dir.join("1.jpg")).unwrap(), b"first");
        assert_eq!(std::fs::read(dir.join("2.jpg")).unwrap(), b"second");
        assert_eq!(std::fs::read(dir.join("3.jpg")).unwrap(), b"third");
        assert!(!dir.join("0.jpg").exists());
        assert!(!dir.join("4.jpg").exists());
    }

    #[tokio::test]
    async fn test_write_artifact() {
        let (storage, _dir) = test_storage();
        storage.store_images("scan-2", &[Bytes::from_static(b"img")]).await.unwrap();

        let path = storage.write_artifact("scan-2", b"usdz-bytes").await.unwrap();
        assert_eq!(path, storage.artifact_path("scan-2"));
        assert_eq!(std::fs::read(path).unwrap(), b"usdz-bytes");
    }

    #[tokio::test]
    async fn test_artifact_write_requires_scan_dir() {
        let (storage, _dir) = test_storage();
        let err = storage.write_artifact("never-submitted", b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[test]
    fn test_paths() {
        let storage = ScanStorage::new("/data/uploads");
        assert_eq!(storage.scan_dir("abc"), PathBuf::from("/data/uploads/abc"));
        assert_eq!(
            storage.artifact_path("abc"),
            PathBuf::from("/data/uploads/abc/model.usdz")
        );
    }

    #[test]
    fn test_ensure_root_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ScanStorage::new(dir.path().join("nested").join("uploads"));
        storage.ensure_root().unwrap();
        storage.ensure_root().unwrap();
        assert!(storage.root().is_dir());
    }
}
