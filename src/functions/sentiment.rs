//! OCR sentiment analyzer: OCR followed by sentiment detection on the text.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::ocr::recognize_image;
use super::{IMAGE_LIST, list_image_names};
use crate::api::Function;
use crate::clients::{
    ComprehendDetector, ObjectStore, S3ObjectStore, SentimentDetector, TesseractRecognizer,
    TextRecognizer,
};
use crate::core::config::OcrConfig;
use crate::core::models::{Invocation, Outcome};
use crate::errors::FunctionError;

pub const SENTIMENT_LANGUAGE: &str = "en";

pub struct OcrSentimentFunction<
    S = S3ObjectStore,
    R = TesseractRecognizer,
    D = ComprehendDetector,
> {
    config: OcrConfig,
    store: S,
    recognizer: R,
    detector: D,
}

impl<S, R, D> OcrSentimentFunction<S, R, D>
where
    S: ObjectStore,
    R: TextRecognizer,
    D: SentimentDetector,
{
    pub fn new(config: OcrConfig, store: S, recognizer: R, detector: D) -> Self {
        Self {
            config,
            store,
            recognizer,
            detector,
        }
    }
}

#[async_trait]
impl<S, R, D> Function for OcrSentimentFunction<S, R, D>
where
    S: ObjectStore,
    R: TextRecognizer,
    D: SentimentDetector,
{
    fn name(&self) -> &'static str {
        "ocr-sentiment-analyzer"
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
        let sentiment = self.detector.detect(&text, SENTIMENT_LANGUAGE).await?;
        info!(sentiment = %sentiment.sentiment, "Detected sentiment");

        Ok(Outcome::Json(json!({
            "text": text,
            "sentiment": sentiment,
        })))
    }
}
