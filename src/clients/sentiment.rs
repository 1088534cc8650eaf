//! Sentiment detection client backed by Amazon Comprehend

use async_trait::async_trait;
use aws_sdk_comprehend::Client as ComprehendClient;
use aws_sdk_comprehend::error::DisplayErrorContext;
use aws_sdk_comprehend::types::LanguageCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::FunctionError;

/// Confidence per sentiment class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentScore {
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
    pub mixed: f32,
}

/// Serializes with Comprehend's own key names (`Sentiment`, `SentimentScore`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentReport {
    pub sentiment: String,
    pub sentiment_score: SentimentScore,
}

#[async_trait]
pub trait SentimentDetector: Send + Sync {
    async fn detect(&self, text: &str, language: &str) -> Result<SentimentReport, FunctionError>;
}

#[async_trait]
impl<T: SentimentDetector + ?Sized> SentimentDetector for Arc<T> {
    async fn detect(&self, text: &str, language: &str) -> Result<SentimentReport, FunctionError> {
        (**self).detect(text, language).await
    }
}

pub struct ComprehendDetector {
    client: ComprehendClient,
}

impl ComprehendDetector {
    pub fn new(client: ComprehendClient) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(ComprehendClient::new(&shared))
    }
}

#[async_trait]
impl SentimentDetector for ComprehendDetector {
    async fn detect(&self, text: &str, language: &str) -> Result<SentimentReport, FunctionError> {
        let resp = self
            .client
            .detect_sentiment()
            .language_code(LanguageCode::from(language))
            .text(text)
            .send()
            .await
            .map_err(|e| {
                FunctionError::Upstream(format!(
                    "comprehend detect_sentiment: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let sentiment = resp
            .sentiment()
            .map(|s| s.as_str().to_string())
            .ok_or_else(|| {
                FunctionError::Upstream("comprehend returned no sentiment".to_string())
            })?;

        let sentiment_score = resp
            .sentiment_score()
            .map(|score| SentimentScore {
                positive: score.positive().unwrap_or_default(),
                negative: score.negative().unwrap_or_default(),
                neutral: score.neutral().unwrap_or_default(),
                mixed: score.mixed().unwrap_or_default(),
            })
            .unwrap_or_default();

        Ok(SentimentReport {
            sentiment,
            sentiment_score,
        })
    }
}
