//! S3-compatible implementation of ObjectStore.
//!
//! Built against `aws-sdk-s3` with path-style addressing, so it works both
//! with AWS S3 proper and with MinIO behind an explicit endpoint.

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::Client;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use secrecy::ExposeSecret;

use dagsweep_core::{Error, ObjectStore, Result, StoreConfig, StoredObject};

/// S3 storage holding workflow-run log files.
pub struct S3LogStore {
    client: Client,
    bucket: String,
}

impl S3LogStore {
    /// Connect to an S3-compatible endpoint with explicit credentials.
    ///
    /// The client is constructed once and reused for every call.
    pub fn connect(config: &StoreConfig) -> Self {
        let scheme = if config.secure { "https" } else { "http" };
        let credentials = Credentials::new(
            config.access_key.expose_secret(),
            config.secret_key.expose_secret(),
            None,
            None,
            "dagsweep",
        );

        let conf = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(format!("{}://{}", scheme, config.endpoint))
            .credentials_provider(credentials)
            // MinIO does not serve virtual-hosted bucket URLs.
            .force_path_style(true)
            .build();

        tracing::debug!(
            endpoint = %config.endpoint,
            bucket = %config.bucket,
            secure = config.secure,
            "Constructed S3 client"
        );

        Self {
            client: Client::from_conf(conf),
            bucket: config.bucket.clone(),
        }
    }

    /// Connect using the ambient AWS credential chain (env, profile, IMDS).
    pub async fn from_env(bucket: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self {
            client: Client::new(&config),
            bucket: bucket.to_string(),
        }
    }

    /// Create with a custom client (for testing/custom config).
    pub fn new_with_client(client: Client, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }
}

/// Classify a removal failure by message, the way the SDK reports S3 and
/// MinIO "no such key" conditions.
fn remove_error(key: &str, msg: &str) -> Error {
    if msg.contains("NoSuchKey") || msg.contains("NotFound") || msg.contains("404") {
        Error::object_not_found(key)
    } else {
        Error::store_unavailable(format!("S3 delete error for {}: {}", key, msg))
    }
}

#[async_trait]
impl ObjectStore for S3LogStore {
    fn list_objects(&self) -> BoxStream<'_, Result<StoredObject>> {
        let paginator = self
            .client
            .list_objects_v2()
            .bucket(self.bucket.clone())
            .into_paginator()
            .send();

        stream::unfold(paginator, |mut paginator| async move {
            match paginator.next().await {
                None => None,
                Some(Ok(page)) => {
                    let objects: Vec<Result<StoredObject>> = page
                        .contents()
                        .iter()
                        .filter_map(|obj| {
                            obj.key().map(|key| {
                                Ok(StoredObject::new(key, obj.size().unwrap_or(0)))
                            })
                        })
                        .collect();
                    Some((stream::iter(objects), paginator))
                }
                Some(Err(e)) => {
                    let err = Error::store_unavailable(format!("S3 list error: {}", e));
                    Some((stream::iter(vec![Err(err)]), paginator))
                }
            }
        })
        .flatten()
        .boxed()
    }

    async fn remove_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| remove_error(key, &e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_missing_object_errors() {
        let err = remove_error("a/f.log", "service error: NoSuchKey");
        assert!(matches!(err, Error::ObjectNotFound(_)));

        let err = remove_error("a/f.log", "dispatch failure: connection refused");
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }
}
