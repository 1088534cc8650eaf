use ap_faas::clients::{S3ObjectStore, TesseractRecognizer};
use ap_faas::core::config::OcrConfig;
use ap_faas::functions::OcrFunction;
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
    ap_faas::api::run(OcrFunction::new(config, store, recognizer)).await
}
