//! Turns the HTTP trigger event into an [`Invocation`].

use serde_json::Value;

use crate::core::models::{Invocation, TriggerEvent};
use crate::errors::FunctionError;

/// Path segments allowed after the root: the route name and one resource id.
pub const MAX_SEGMENTS: usize = 2;

/// Split a request path into its segments, dropping the leading root character.
///
/// `/weather/London` yields `["weather", "London"]`.
///
/// # Errors
///
/// Returns `BadRequest("Inconsistent parameters")` when more than
/// [`MAX_SEGMENTS`] segments remain.
pub fn split_path(path: &str) -> Result<Vec<String>, FunctionError> {
    let mut chars = path.chars();
    chars.next();
    let segments: Vec<String> = chars.as_str().split('/').map(str::to_string).collect();

    if segments.len() > MAX_SEGMENTS {
        return Err(FunctionError::inconsistent_parameters());
    }
    Ok(segments)
}

/// Parse a trigger event, preferring a non-empty `rawPath` (HTTP API) over
/// `path` (REST API).
///
/// # Errors
///
/// Returns `BadRequest` when the event is not an object, carries no path, or
/// the path has too many segments.
pub fn parse_event(payload: &Value) -> Result<Invocation, FunctionError> {
    let event: TriggerEvent = serde_json::from_value(payload.clone())
        .map_err(|e| FunctionError::BadRequest(format!("Invalid event: {e}")))?;

    let Some(path) = event.raw_path.filter(|p| !p.is_empty()).or(event.path) else {
        return Err(FunctionError::BadRequest("Missing request path".to_string()));
    };

    let segments = split_path(&path)?;
    let query = event
        .query_string_parameters
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect();

    Ok(Invocation { segments, query })
}
