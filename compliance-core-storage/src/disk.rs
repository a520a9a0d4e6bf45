use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::backend::{FileContents, StorageBackend, StoredFile};
use crate::error::{StorageError, StorageResult};

/// Disk implementation of [`StorageBackend`].
///
/// Ids are relative paths of the form `YYYY/MM/ab/<token><ext>` where
/// `<token>` is 32 hex chars from 128 random bits and `ab` its first two
/// chars, bounding directory fan-out. Writes are create-exclusive: a
/// colliding token fails instead of silently overwriting.
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Joins an id onto the root, refusing anything that could escape it.
    ///
    /// Ids are produced by [`save`](StorageBackend::save) but arrive back
    /// from untrusted callers, so absolute components and `..` are
    /// rejected before any file-system operation.
    fn safe_join(&self, id: &str) -> StorageResult<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(id).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) | Component::ParentDir => {
                    return Err(StorageError::PathTraversal(id.to_string()));
                }
            }
        }
        if !resolved.starts_with(&self.root) {
            return Err(StorageError::PathTraversal(id.to_string()));
        }
        Ok(resolved)
    }
}

/// Lowercased extension of the original name, dot included; empty when the
/// name has none.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

#[async_trait]
impl StorageBackend for DiskStorage {
    async fn save(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> StorageResult<StoredFile> {
        let now = Utc::now();

        let token: u128 = rand::thread_rng().gen();
        let token = format!("{token:032x}");
        let filename = format!("{token}{}", extension_of(original_name));
        let id = format!(
            "{}/{:02}/{}/{}",
            now.year(),
            now.month(),
            &token[..2],
            filename
        );

        let path = self.safe_join(&id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // create_new: never overwrite an existing file, token collision or not
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(storage_id = %id, size = bytes.len(), "disk storage: saved file");

        Ok(StoredFile {
            id,
            filename,
            mime_type: mime_type.to_string(),
            size: bytes.len() as u64,
            created_at: now,
        })
    }

    async fn read(&self, id: &str) -> StorageResult<FileContents> {
        let path = self.safe_join(id)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let filename = id.rsplit('/').next().unwrap_or("file").to_string();
        Ok(FileContents {
            size: bytes.len() as u64,
            bytes,
            mime_type: "application/octet-stream".to_string(),
            filename,
        })
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.safe_join(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(storage_id = %id, "disk storage: deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, id: &str) -> StorageResult<bool> {
        let path = self.safe_join(id)?;
        Ok(fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("compliance-storage-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn save_read_delete_round_trip() {
        let storage = DiskStorage::new(temp_root());
        let stored = storage
            .save(b"hello world", "contract.PDF", "application/pdf")
            .await
            .unwrap();

        assert_eq!(stored.size, 11);
        assert_eq!(stored.mime_type, "application/pdf");
        assert!(stored.filename.ends_with(".pdf"), "extension lowercased");
        assert!(stored.id.ends_with(&stored.filename));

        assert!(storage.exists(&stored.id).await.unwrap());
        let contents = storage.read(&stored.id).await.unwrap();
        assert_eq!(contents.bytes, b"hello world");
        assert_eq!(contents.size, 11);
        assert_eq!(contents.filename, stored.filename);

        storage.delete(&stored.id).await.unwrap();
        assert!(!storage.exists(&stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn id_layout_partitions_by_date_and_token() {
        let storage = DiskStorage::new(temp_root());
        let stored = storage.save(b"x", "photo.jpg", "image/jpeg").await.unwrap();

        let parts: Vec<&str> = stored.id.split('/').collect();
        assert_eq!(parts.len(), 4, "YYYY/MM/xx/filename: {}", stored.id);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2], &stored.filename[..2]);
    }

    #[tokio::test]
    async fn name_without_extension_gets_none() {
        let storage = DiskStorage::new(temp_root());
        let stored = storage.save(b"x", "README", "text/plain").await.unwrap();
        assert!(!stored.filename.contains('.'));
    }

    #[tokio::test]
    async fn traversal_ids_are_rejected() {
        let storage = DiskStorage::new(temp_root());
        for id in ["../outside", "2025/../../etc/passwd", "/etc/passwd"] {
            assert!(
                matches!(storage.read(id).await, Err(StorageError::PathTraversal(_))),
                "id {id:?} must be rejected"
            );
            assert!(matches!(
                storage.delete(id).await,
                Err(StorageError::PathTraversal(_))
            ));
        }
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let storage = DiskStorage::new(temp_root());
        storage.delete("2025/01/ab/missing.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn read_of_missing_file_is_not_found() {
        let storage = DiskStorage::new(temp_root());
        assert!(matches!(
            storage.read("2025/01/ab/missing.pdf").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
