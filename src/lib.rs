//! Sample serverless functions, each a thin HTTP adapter over one external service.
//!
//! Every function is deployed as its own Lambda behind an HTTP trigger:
//! 1. `city-weather` forwards a city to a weather API
//! 2. `image-resizer` lists or resizes images kept in an S3 bucket
//! 3. `ocr-image` recognizes the text in a bucket image with tesseract
//! 4. `ocr-sentiment-analyzer` runs the recognized text through Comprehend
//! 5. `sport-scoring` reports today's games or one game's boxscore
//!
//! # Architecture
//!
//! All functions share one request lifecycle:
//! - [`api::invocation`] parses the trigger event into path segments and a query map
//! - a [`api::Function`] implementation calls its collaborator
//! - [`api::envelope`] wraps the outcome (or any error, as a 400) in the response envelope
//!
//! Configuration is read from the environment once per cold start into the
//! structs in [`core::config`] and handed to each function at construction.
//!
//! # Example
//!
//! ```no_run
//! use ap_faas::core::config::WeatherConfig;
//! use ap_faas::functions::WeatherFunction;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     ap_faas::setup_logging();
//!
//!     let config = WeatherConfig::from_env()?;
//!     let function = WeatherFunction::new(config, reqwest::Client::new());
//!     ap_faas::api::run(function).await
//! }
//! ```

// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod functions;

pub use errors::FunctionError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at the start of each
/// function binary.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// ap_faas::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
