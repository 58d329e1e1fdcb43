use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use tokio::runtime::Runtime;

use crate::effects::ArtifactStore;
use crate::error::StoreError;

pub const DEFAULT_BUCKET: &str = "spare-tire";

/// Wheel bucket reader backed by S3. The SDK is async; a private
/// current-thread runtime keeps the rest of the pipeline synchronous.
pub struct S3Store {
    bucket: String,
    runtime: Runtime,
    client: Client,
}

impl S3Store {
    pub fn connect(bucket: impl Into<String>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start storage runtime")?;
        let config = runtime.block_on(aws_config::defaults(BehaviorVersion::latest()).load());
        Ok(Self {
            bucket: bucket.into(),
            runtime,
            client: Client::new(&config),
        })
    }
}

impl ArtifactStore for S3Store {
    fn contains(&self, key_prefix: &str) -> Result<bool> {
        let listing = self
            .runtime
            .block_on(
                self.client
                    .list_objects_v2()
                    .bucket(&self.bucket)
                    .prefix(key_prefix)
                    .max_keys(1)
                    .send(),
            )
            .map_err(|err| StoreError {
                prefix: key_prefix.to_string(),
                source: err.into(),
            })?;
        Ok(!listing.contents().is_empty())
    }
}
