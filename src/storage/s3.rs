use super::{BucketStatus, ObjectStore, StorageError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use std::path::Path;

// Buckets in the default region must be created without a location constraint.
const DEFAULT_AWS_REGION: &str = "us-east-1";

/// S3 (or S3-compatible) store. Credentials come from the default AWS
/// provider chain.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn connect(region: Option<&str>, endpoint: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(url) = endpoint {
            builder = builder.endpoint_url(url).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn create_bucket(
        &self,
        bucket: &str,
        region: Option<&str>,
    ) -> Result<BucketStatus, StorageError> {
        // Without an explicit region the constraint follows the client's own.
        let client_region = self.client.config().region().map(|r| r.as_ref().to_string());
        let region = region.or(client_region.as_deref());

        let mut request = self.client.create_bucket().bucket(bucket);
        if let Some(region) = region.filter(|r| *r != DEFAULT_AWS_REGION) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => Ok(BucketStatus::Created),
            Err(e) => {
                let already_exists = e.as_service_error().is_some_and(|svc| {
                    svc.is_bucket_already_owned_by_you() || svc.is_bucket_already_exists()
                });
                if already_exists {
                    Ok(BucketStatus::AlreadyExists)
                } else {
                    Err(StorageError::Backend(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
