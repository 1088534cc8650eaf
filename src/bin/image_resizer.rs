use ap_faas::clients::S3ObjectStore;
use ap_faas::core::config::BucketConfig;
use ap_faas::functions::ImageFunction;
use lambda_runtime::Error;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    ap_faas::setup_logging();

    let config = BucketConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let store = S3ObjectStore::from_env(config.bucket.clone()).await;
    ap_faas::api::run(ImageFunction::new(config, store)).await
}
