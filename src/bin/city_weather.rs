use ap_faas::core::config::WeatherConfig;
use ap_faas::functions::WeatherFunction;
use lambda_runtime::Error;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    ap_faas::setup_logging();

    let config = WeatherConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let function = WeatherFunction::new(config, reqwest::Client::new());
    ap_faas::api::run(function).await
}
