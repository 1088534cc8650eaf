//! Text recognition (OCR) client

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::errors::FunctionError;

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in the image stored at `image_path`.
    async fn recognize(&self, image_path: &Path) -> Result<String, FunctionError>;
}

/// Runs the `tesseract` command line engine, reading the result from stdout.
pub struct TesseractRecognizer {
    binary: String,
}

impl TesseractRecognizer {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<String, FunctionError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .output()
            .await
            .map_err(|e| FunctionError::Upstream(format!("{}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FunctionError::Upstream(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.chars().count(), "Recognized text");
        Ok(text)
    }
}
