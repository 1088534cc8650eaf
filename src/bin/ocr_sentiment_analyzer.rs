use ap_faas::clients::{ComprehendDetector, S3ObjectStore, TesseractRecognizer};
use ap_faas::core::config::OcrConfig;
use ap_faas::functions::OcrSentimentFunction;
use lambda_runtime::Error;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    ap_faas::setup_logging();

    let config = OcrConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let store = S3ObjectStore::from_env(config.bucket.bucket.clone()).await;
    let recognizer = TesseractRecognizer::new(config.tesseract_bin.clone());
    let detector = ComprehendDetector::from_env().await;

    ap_faas::api::run(OcrSentimentFunction::new(
        config, store, recognizer, detector,
    ))
    .await
}
