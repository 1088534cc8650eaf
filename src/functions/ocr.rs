//! OCR image: recognizes the text in a bucket image.

use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

use super::{IMAGE_LIST, list_image_names};
use crate::api::Function;
use crate::clients::{ObjectStore, S3ObjectStore, TesseractRecognizer, TextRecognizer};
use crate::core::config::OcrConfig;
use crate::core::models::{Invocation, Outcome};
use crate::errors::FunctionError;

/// Fetch `image` from the bucket, stage it in the scratch directory and run
/// the recognizer on it. The scratch copy is removed afterwards.
pub(crate) async fn recognize_image<S, R>(
    config: &OcrConfig,
    store: &S,
    recognizer: &R,
    image: &str,
) -> Result<String, FunctionError>
where
    S: ObjectStore + ?Sized,
    R: TextRecognizer + ?Sized,
{
    let body = store.get(&config.bucket.source_key(image)).await?;
    let scratch: PathBuf = config.scratch_dir.join(image);
    tokio::fs::write(&scratch, &body).await?;
    info!(path = %scratch.display(), bytes = body.len(), "Staged image for OCR");

    let result = recognizer.recognize(&scratch).await;

    if let Err(e) = tokio::fs::remove_file(&scratch).await {
        warn!(path = %scratch.display(), error = %e, "Failed to remove scratch image");
    }
    result
}

pub struct OcrFunction<S = S3ObjectStore, R = TesseractRecognizer> {
    config: OcrConfig,
    store: S,
    recognizer: R,
}

impl<S: ObjectStore, R: TextRecognizer> OcrFunction<S, R> {
    pub fn new(config: OcrConfig, store: S, recognizer: R) -> Self {
        Self {
            config,
            store,
            recognizer,
        }
    }
}

#[async_trait]
impl<S: ObjectStore, R: TextRecognizer> Function for OcrFunction<S, R> {
    fn name(&self) -> &'static str {
        "ocr-image"
    }

    fn expiration_time(&self) -> Option<&str> {
        self.config.bucket.expiration_time.as_deref()
    }

    async fn call(&self, invocation: &Invocation) -> Result<Outcome, FunctionError> {
        let image = invocation.resource_id();
        if image == IMAGE_LIST {
            let names = list_image_names(&self.store, &self.config.bucket.bucket_path).await?;
            return Ok(Outcome::Json(json!(names)));
        }

        let text = recognize_image(&self.config, &self.store, &self.recognizer, image).await?;
        Ok(Outcome::Json(json!({ "text": text })))
    }
}
