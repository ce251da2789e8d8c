//! Blob storage for uploaded cover images

mod upload;

pub use upload::{upload_image, ImageUpload, IMAGE_CACHE_CONTROL};

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Who may read a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acl {
    #[default]
    Private,
    /// Anyone holding the public URL can read the object
    PublicRead,
}

/// Attributes written alongside an object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub acl: Acl,
}

/// Abstract blob store (a single bucket)
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Name of the bucket, used in error messages
    fn bucket_name(&self) -> &str;

    /// Check that the bucket itself exists
    async fn bucket_exists(&self) -> StorageResult<bool>;

    /// Write an object into the bucket
    async fn put(&self, name: &str, data: Vec<u8>, metadata: ObjectMetadata) -> StorageResult<()>;

    /// Read an object back
    async fn get(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// URL at which a public object can be fetched
    fn public_url(&self, name: &str) -> String;
}

/// Local filesystem bucket.
///
/// The directory is served by the HTTP layer, so every object is effectively
/// public; the cache policy is applied by the server when serving.
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a bucket rooted at `root`, reachable under `base_url`
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Root directory of the bucket
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Safely resolve an object name, rejecting anything that escapes the root
    fn full_path(&self, name: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::BackendError(format!(
                        "invalid object name {name:?}"
                    )));
                }
            }
        }
        if normalized.as_os_str().is_empty() {
            return Err(StorageError::BackendError("empty object name".to_string()));
        }

        Ok(self.root.join(normalized))
    }
}

#[async_trait]
impl BlobStore for LocalStorage {
    fn bucket_name(&self) -> &str {
        self.root.to_str().unwrap_or("<non-utf8 path>")
    }

    async fn bucket_exists(&self) -> StorageResult<bool> {
        match tokio::fs::metadata(&self.root).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn put(&self, name: &str, data: Vec<u8>, _metadata: ObjectMetadata) -> StorageResult<()> {
        let full_path = self.full_path(name)?;
        tokio::fs::write(full_path, data)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    async fn get(&self, name: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(name)?;
        tokio::fs::read(full_path)
            .await
            .map_err(|e| StorageError::NotFound(e.to_string()))
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

/// A stored object and its attributes
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub metadata: ObjectMetadata,
}

/// In-memory bucket (for testing)
pub struct MemoryStorage {
    name: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStorage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Look up an object together with its metadata
    pub fn object(&self, name: &str) -> Option<StoredObject> {
        self.objects.read().ok()?.get(name).cloned()
    }

    /// Names of every stored object
    pub fn names(&self) -> Vec<String> {
        self.objects
            .read()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BlobStore for MemoryStorage {
    fn bucket_name(&self) -> &str {
        &self.name
    }

    async fn bucket_exists(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn put(&self, name: &str, data: Vec<u8>, metadata: ObjectMetadata) -> StorageResult<()> {
        self.objects
            .write()
            .map_err(|_| StorageError::BackendError("memory storage lock poisoned".to_string()))?
            .insert(name.to_string(), StoredObject { data, metadata });
        Ok(())
    }

    async fn get(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.object(name)
            .map(|object| object.data)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn public_url(&self, name: &str) -> String {
        format!("memory://{}/{}", self.name, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new("covers");

        storage
            .put("test.png", b"hello".to_vec(), ObjectMetadata::default())
            .await
            .unwrap();

        assert_eq!(storage.get("test.png").await.unwrap(), b"hello");
        assert!(storage.get("missing.png").await.is_err());
        assert_eq!(storage.public_url("test.png"), "memory://covers/test.png");
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads/");

        assert!(storage.bucket_exists().await.unwrap());
        storage
            .put("cover.jpg", b"jpeg".to_vec(), ObjectMetadata::default())
            .await
            .unwrap();

        assert_eq!(storage.get("cover.jpg").await.unwrap(), b"jpeg");
        assert_eq!(storage.public_url("cover.jpg"), "/uploads/cover.jpg");
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads");

        let result = storage
            .put("../escape.txt", b"x".to_vec(), ObjectMetadata::default())
            .await;
        assert!(matches!(result, Err(StorageError::BackendError(_))));
    }

    #[tokio::test]
    async fn test_missing_local_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nope"), "/uploads");
        assert!(!storage.bucket_exists().await.unwrap());
    }
}
