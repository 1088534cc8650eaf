use thiserror::Error;

/// Body returned when the request path carries more than a resource id.
pub const INCONSISTENT_PARAMETERS: &str = "Inconsistent parameters";

/// Every failure an invocation can hit. Both kinds surface as a 400 whose body
/// is the bare message, so `Display` adds no prefix.
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Upstream(String),
}

impl FunctionError {
    #[must_use]
    pub fn inconsistent_parameters() -> Self {
        FunctionError::BadRequest(INCONSISTENT_PARAMETERS.to_string())
    }
}

// The request URL carries API keys in its query, keep it out of the message.
impl From<reqwest::Error> for FunctionError {
    fn from(error: reqwest::Error) -> Self {
        FunctionError::Upstream(error.without_url().to_string())
    }
}

impl From<serde_json::Error> for FunctionError {
    fn from(error: serde_json::Error) -> Self {
        FunctionError::Upstream(error.to_string())
    }
}

impl From<image::ImageError> for FunctionError {
    fn from(error: image::ImageError) -> Self {
        FunctionError::Upstream(error.to_string())
    }
}

impl From<std::io::Error> for FunctionError {
    fn from(error: std::io::Error) -> Self {
        FunctionError::Upstream(error.to_string())
    }
}

impl From<tokio::task::JoinError> for FunctionError {
    fn from(error: tokio::task::JoinError) -> Self {
        FunctionError::Upstream(format!("background task failed: {error}"))
    }
}
