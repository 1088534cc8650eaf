//! City weather: forwards the city to the weather API and returns its JSON as is.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Request};
use serde_json::Value;
use tracing::info;

use crate::api::Function;
use crate::core::config::WeatherConfig;
use crate::core::models::{Invocation, Outcome};
use crate::errors::FunctionError;

pub const DEFAULT_UNITS: &str = "imperial";

pub struct WeatherFunction {
    config: WeatherConfig,
    http: HttpClient,
}

/// Every `%` must start a two-hex-digit escape.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

impl WeatherFunction {
    pub fn new(config: WeatherConfig, http: HttpClient) -> Self {
        Self { config, http }
    }

    /// Build the outbound weather request for `city` (still percent-encoded).
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` when the city is not valid percent-encoded UTF-8,
    /// or `Upstream` when the configured URL cannot be parsed.
    pub fn request(&self, city: &str, units: Option<&str>) -> Result<Request, FunctionError> {
        if !has_valid_escapes(city) {
            return Err(FunctionError::BadRequest("URI malformed".to_string()));
        }
        let city = urlencoding::decode(city)
            .map_err(|e| FunctionError::BadRequest(format!("URI malformed: {e}")))?;
        let units = units.unwrap_or(DEFAULT_UNITS);

        let request = self
            .http
            .get(&self.config.api_url)
            .query(&[
                ("appid", self.config.api_key.as_str()),
                ("q", city.as_ref()),
                ("units", units),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl Function for WeatherFunction {
    fn name(&self) -> &'static str {
        "city-weather"
    }

    fn expiration_time(&self) -> Option<&str> {
        self.config.expiration_time.as_deref()
    }

    async fn call(&self, invocation: &Invocation) -> Result<Outcome, FunctionError> {
        let request = self.request(invocation.resource_id(), invocation.param("units"))?;
        info!(city = %invocation.resource_id(), "Fetching weather");

        let data: Value = self
            .http
            .execute(request)
            .await?
            .error_for_status()?
            .json()
            .await?;

        #[cfg(feature = "debug-logs")]
        tracing::debug!(payload = %data, "Weather API response");

        Ok(Outcome::Json(data))
    }
}
