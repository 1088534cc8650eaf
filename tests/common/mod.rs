#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use ap_faas::FunctionError;
use ap_faas::clients::{
    NewObject, ObjectPage, ObjectStore, SentimentDetector, SentimentReport, SentimentScore,
    TextRecognizer,
};
use ap_faas::core::config::{BucketConfig, OcrConfig};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn event(path: &str, query: Value) -> Value {
    json!({ "rawPath": path, "queryStringParameters": query })
}

pub fn bucket_config() -> BucketConfig {
    BucketConfig {
        bucket: "photos".to_string(),
        bucket_path: "images".to_string(),
        expiration_time: Some("3600".to_string()),
    }
}

pub fn ocr_config(scratch_dir: &Path) -> OcrConfig {
    OcrConfig {
        bucket: bucket_config(),
        tesseract_bin: "tesseract".to_string(),
        scratch_dir: scratch_dir.to_path_buf(),
    }
}

/// In-memory bucket. Listing pages are chained with `page-N` tokens.
#[derive(Default)]
pub struct FakeStore {
    pub pages: Vec<Vec<String>>,
    pub objects: HashMap<String, Vec<u8>>,
    pub fail_with: Option<String>,
    pub list_calls: Mutex<Vec<Option<String>>>,
    pub gets: Mutex<Vec<String>>,
    pub puts: Mutex<Vec<NewObject>>,
}

impl FakeStore {
    pub fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|page| page.iter().map(|k| (*k).to_string()).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_object(key: &str, body: Vec<u8>) -> Self {
        let mut store = Self::default();
        store.objects.insert(key.to_string(), body);
        store
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), FunctionError> {
        match &self.fail_with {
            Some(message) => Err(FunctionError::Upstream(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn list_page(
        &self,
        _prefix: &str,
        continuation: Option<String>,
    ) -> Result<ObjectPage, FunctionError> {
        self.check()?;
        self.list_calls.lock().unwrap().push(continuation.clone());

        let index = continuation
            .as_deref()
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        let keys = self.pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(ObjectPage { keys, next_token })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, FunctionError> {
        self.check()?;
        self.gets.lock().unwrap().push(key.to_string());
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| FunctionError::Upstream("The specified key does not exist.".to_string()))
    }

    async fn put(&self, object: NewObject) -> Result<(), FunctionError> {
        self.check()?;
        self.puts.lock().unwrap().push(object);
        Ok(())
    }
}

/// Recognizer that returns the staged file's bytes as text.
pub struct EchoRecognizer;

#[async_trait]
impl TextRecognizer for EchoRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<String, FunctionError> {
        let bytes = tokio::fs::read(image_path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct FailingRecognizer;

#[async_trait]
impl TextRecognizer for FailingRecognizer {
    async fn recognize(&self, _image_path: &Path) -> Result<String, FunctionError> {
        Err(FunctionError::Upstream("tesseract exited with 1".to_string()))
    }
}

#[derive(Default)]
pub struct FakeDetector {
    pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SentimentDetector for FakeDetector {
    async fn detect(&self, text: &str, language: &str) -> Result<SentimentReport, FunctionError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        Ok(SentimentReport {
            sentiment: "POSITIVE".to_string(),
            sentiment_score: SentimentScore {
                positive: 0.75,
                negative: 0.25,
                neutral: 0.0,
                mixed: 0.0,
            },
        })
    }
}

/// Local HTTP endpoint that answers exactly one request with a fixed response
/// and hands back the request head it received.
pub struct CannedServer {
    pub base_url: String,
    head: JoinHandle<String>,
}

impl CannedServer {
    pub async fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let head = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).into_owned()
        });

        Self { base_url, head }
    }

    /// Request line of the single request served, e.g. `GET /x?y=z HTTP/1.1`.
    pub async fn request_line(self) -> String {
        let head = self.head.await.unwrap();
        head.lines().next().unwrap_or_default().to_string()
    }
}
