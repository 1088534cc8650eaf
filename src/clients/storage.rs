//! Object storage client
//!
//! The functions only need list/get/put against one bucket, so that is all
//! [`ObjectStore`] exposes. [`S3ObjectStore`] is the production backend.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::sync::Arc;
use tracing::debug;

use crate::errors::FunctionError;

/// One page of a prefix listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

/// An object about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ObjectPage, FunctionError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, FunctionError>;

    async fn put(&self, object: NewObject) -> Result<(), FunctionError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ObjectPage, FunctionError> {
        (**self).list_page(prefix, continuation).await
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, FunctionError> {
        (**self).get(key).await
    }

    async fn put(&self, object: NewObject) -> Result<(), FunctionError> {
        (**self).put(object).await
    }
}

/// Collect every key under `prefix`, following continuation tokens until the
/// store stops returning one.
///
/// # Errors
///
/// Returns the first listing error; keys gathered so far are dropped.
pub async fn list_all<S>(store: &S, prefix: &str) -> Result<Vec<String>, FunctionError>
where
    S: ObjectStore + ?Sized,
{
    let mut keys = Vec::new();
    let mut continuation = None;

    loop {
        let page = store.list_page(prefix, continuation).await?;
        debug!(
            page_keys = page.keys.len(),
            more = page.next_token.is_some(),
            "Listed object page"
        );
        keys.extend(page.keys);

        match page.next_token {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    Ok(keys)
}

/// Bare filename of a key: its second `/`-separated segment.
///
/// Keys without one (or with an empty one, such as folder markers) yield `None`.
#[must_use]
pub fn bare_filename(key: &str) -> Option<&str> {
    key.split('/').nth(1).filter(|name| !name.is_empty())
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Build a store from the shared AWS environment configuration.
    pub async fn from_env(bucket: String) -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(S3Client::new(&shared), bucket)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ObjectPage, FunctionError> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|e| {
                FunctionError::Upstream(format!("s3 list_objects_v2: {}", DisplayErrorContext(&e)))
            })?;

        Ok(ObjectPage {
            keys: resp
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect(),
            next_token: resp.next_continuation_token().map(str::to_string),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, FunctionError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                FunctionError::Upstream(format!("s3 get_object {key}: {}", DisplayErrorContext(&e)))
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| FunctionError::Upstream(format!("s3 body {key}: {e}")))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put(&self, object: NewObject) -> Result<(), FunctionError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object.key)
            .content_type(object.content_type)
            .content_disposition("inline")
            .body(ByteStream::from(object.body))
            .send()
            .await
            .map_err(|e| {
                FunctionError::Upstream(format!(
                    "s3 put_object {}: {}",
                    object.key,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
