use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Subset of the HTTP trigger event the functions read.
#[derive(Debug, Default, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "rawPath", default)]
    pub raw_path: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<HashMap<String, Option<String>>>,
}

/// Normalized request: path segments after the root plus the query map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub segments: Vec<String>,
    pub query: HashMap<String, String>,
}

impl Invocation {
    /// Segment 1 of the path, empty when the path stops at the route name.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        self.segments.get(1).map_or("", String::as_str)
    }

    /// Query parameter value; empty values count as absent.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Successful result of a function, before it is wrapped in the envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Json(Value),
    Redirect(String),
}

/// Result object handed back to the HTTP trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
