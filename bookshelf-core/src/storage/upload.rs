//! Cover image upload

use super::{Acl, BlobStore, ObjectMetadata, StorageResult};
use crate::error::StorageError;
use std::path::Path;
use uuid::Uuid;

/// Uploaded images never change, so clients may cache them for a day
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// An image file taken from a submitted form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-side file name; only its extension is kept
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Random object name that keeps the original extension
fn object_name(file_name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Store `upload` in the bucket as a publicly readable object and return its URL
pub async fn upload_image(
    store: Option<&dyn BlobStore>,
    upload: ImageUpload,
) -> StorageResult<String> {
    let store = store.ok_or(StorageError::NotConfigured)?;

    if !store.bucket_exists().await? {
        return Err(StorageError::BucketNotFound(store.bucket_name().to_string()));
    }

    let name = object_name(&upload.file_name);
    let metadata = ObjectMetadata {
        content_type: upload.content_type,
        cache_control: Some(IMAGE_CACHE_CONTROL.to_string()),
        acl: Acl::PublicRead,
    };

    store.put(&name, upload.data, metadata).await?;
    tracing::debug!(bucket = store.bucket_name(), object = %name, "stored image");

    Ok(store.public_url(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalStorage, MemoryStorage};

    fn png() -> ImageUpload {
        ImageUpload {
            file_name: "cover.png".to_string(),
            content_type: Some("image/png".to_string()),
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn test_object_name_keeps_extension() {
        let name = object_name("holiday photo.JPEG");
        assert!(name.ends_with(".JPEG"));
        assert_ne!(name, object_name("holiday photo.JPEG"));
        assert!(!object_name("README").contains('.'));
    }

    #[tokio::test]
    async fn test_upload_requires_bucket() {
        let result = upload_image(None, png()).await;
        assert!(matches!(result, Err(StorageError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_upload_checks_bucket_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStorage::new(dir.path().join("missing"), "/uploads");

        let result = upload_image(Some(&store), png()).await;
        assert!(matches!(result, Err(StorageError::BucketNotFound(_))));
    }

    #[tokio::test]
    async fn test_upload_is_public_and_cacheable() {
        let store = MemoryStorage::new("covers");

        let url = upload_image(Some(&store), png()).await.unwrap();

        let names = store.names();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".png"));
        assert_eq!(url, format!("memory://covers/{}", names[0]));

        let object = store.object(&names[0]).unwrap();
        assert_eq!(object.data, png().data);
        assert_eq!(object.metadata.acl, Acl::PublicRead);
        assert_eq!(object.metadata.content_type.as_deref(), Some("image/png"));
        assert_eq!(
            object.metadata.cache_control.as_deref(),
            Some(IMAGE_CACHE_CONTROL)
        );
    }
}
