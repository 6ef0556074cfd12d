use super::{BucketStatus, ObjectStore, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Directory-backed store: each bucket is a directory under `root`, each
/// object a file named after its key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn bucket_path(&self, bucket: &str) -> Result<PathBuf, StorageError> {
        if !is_single_component(bucket) {
            return Err(StorageError::InvalidBucket(bucket.to_string()));
        }
        Ok(self.root.join(bucket))
    }

    /// Path of object `key`. Keys containing `/` map onto nested directories
    /// under the bucket, like S3 prefixes.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        if !is_relative_key(key) {
            return Err(StorageError::Backend(format!(
                "object key not representable on disk: {}",
                key
            )));
        }
        Ok(self.bucket_path(bucket)?.join(key))
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn is_relative_key(key: &str) -> bool {
    let mut normal = 0usize;
    for component in Path::new(key).components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    normal > 0
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn create_bucket(
        &self,
        bucket: &str,
        _region: Option<&str>,
    ) -> Result<BucketStatus, StorageError> {
        let dir = self.bucket_path(bucket)?;
        fs::create_dir_all(&self.root).await?;
        match fs::create_dir(&dir).await {
            Ok(()) => Ok(BucketStatus::Created),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(BucketStatus::AlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        let dir = self.bucket_path(bucket)?;
        if !fs::try_exists(&dir).await? {
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }
        let target = self.object_path(bucket, key)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(path, &target).await?;
        Ok(())
    }
}
