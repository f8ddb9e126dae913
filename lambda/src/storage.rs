//! Object storage access.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::errors::SummarizerError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, SummarizerError>;

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), SummarizerError>;
}

pub struct S3Store {
    client: S3Client,
}

impl S3Store {
    #[must_use]
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Builds a client from the Lambda's ambient AWS configuration.
    pub async fn from_env() -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::new(S3Client::new(&shared_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, SummarizerError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                SummarizerError::AwsError(format!(
                    "s3 get_object s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let data = response.body.collect().await.map_err(|e| {
            SummarizerError::AwsError(format!("s3 read body s3://{bucket}/{key}: {e}"))
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), SummarizerError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                SummarizerError::AwsError(format!(
                    "s3 put_object s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        info!(bucket, key, bytes = size, "Stored object");
        Ok(())
    }
}
